// src/services/resale_router.rs
//
// Resale Router
//
// Picks the marketplace and asking price for items the classifier sent to
// marketplace resale. Decision table, first match wins:
//
//   value > 200 and Accessories/Luxury   → TheRealReal
//   Apparel in excellent condition        → Poshmark
//   value < 50                            → Mercari
//   anything else                         → eBay

use log::debug;

use crate::domain::disposition::{
    ClassificationResult, Disposition, ResalePlatform, ResaleRecommendation,
};
use crate::domain::return_item::{ItemCondition, ReturnItem};
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct ResaleRouter {
    /// Strictly above this, high-value categories go to an authenticated marketplace
    luxury_value_threshold: f64,

    /// Strictly below this, items go to a low-price marketplace
    low_value_threshold: f64,
}

impl Default for ResaleRouter {
    fn default() -> Self {
        Self {
            luxury_value_threshold: 200.0,
            low_value_threshold: 50.0,
        }
    }
}

impl ResaleRouter {
    /// Route an item the classifier marked for marketplace resale.
    ///
    /// Any other disposition is a caller bug and yields
    /// `DomainError::PreconditionViolation`.
    pub fn route(
        &self,
        item: &ReturnItem,
        classification: &ClassificationResult,
    ) -> DomainResult<ResaleRecommendation> {
        if classification.disposition != Disposition::MarketplaceResale {
            return Err(DomainError::PreconditionViolation(format!(
                "Resale routing requires a marketplace resale disposition, got {}",
                classification.disposition
            )));
        }

        let recommendation = self.recommend(item);
        debug!(
            "Routed '{}' to {} at {:.2}",
            item.product_name,
            recommendation.platform.display_name(),
            recommendation.listing_price
        );
        Ok(recommendation)
    }

    /// The decision table itself. Total over every value/category/condition.
    fn recommend(&self, item: &ReturnItem) -> ResaleRecommendation {
        let value = item.estimated_value;

        let (platform, rationale) = if value > self.luxury_value_threshold
            && item.category.is_high_value()
        {
            (
                ResalePlatform::TheRealReal,
                format!(
                    "{} item valued at {:.2}: high-value luxury item, authenticated marketplace.",
                    item.category, value
                ),
            )
        } else if item.category.is_apparel()
            && item.condition == ItemCondition::Excellent
        {
            (
                ResalePlatform::Poshmark,
                "Apparel in excellent condition: fashion item in excellent condition performs well here."
                    .to_string(),
            )
        } else if value < self.low_value_threshold {
            (
                ResalePlatform::Mercari,
                format!(
                    "Valued at {:.2}: lower-value item, good conversion rate.",
                    value
                ),
            )
        } else {
            (
                ResalePlatform::EBay,
                "No specialised marketplace matched: versatile platform, suitable for most item \
                 types and price ranges."
                    .to_string(),
            )
        };

        ResaleRecommendation::new(platform, value, rationale)
    }
}
