// src/services/decision_engine.rs
//
// Decision Engine
//
// Single entry point for deciding what happens to a returned item.
//
// CRITICAL RULES:
// - Validate first, classify second, route third (only for marketplace resale)
// - The result always satisfies the resale invariant:
//   resale is present iff disposition is MarketplaceResale
// - Stateless: no persistence, no events (ReturnService owns those)

use log::{debug, info};

use crate::domain::disposition::DecisionResult;
use crate::domain::return_item::{validate_return_item, ReturnItem, ReturnItemInput};
use crate::domain::DomainResult;
use crate::services::disposition_classifier::DispositionClassifier;
use crate::services::resale_router::ResaleRouter;

#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    classifier: DispositionClassifier,
    router: ResaleRouter,
}

impl DecisionEngine {
    pub fn new(classifier: DispositionClassifier, router: ResaleRouter) -> Self {
        Self { classifier, router }
    }

    pub fn classifier(&self) -> &DispositionClassifier {
        &self.classifier
    }

    pub fn router(&self) -> &ResaleRouter {
        &self.router
    }

    /// Classify the item and, when it goes to a marketplace, route it.
    ///
    /// # Errors
    /// `InvalidInput` when the item fails validation (blank name, negative or
    /// non-finite value).
    pub fn decide(&self, item: &ReturnItem) -> DomainResult<DecisionResult> {
        validate_return_item(item)?;

        let classification = self.classifier.classify(item);

        let resale = if classification.disposition.requires_resale() {
            Some(self.router.route(item, &classification)?)
        } else {
            None
        };

        let result = DecisionResult::new(classification, resale)?;

        info!(
            "Decision for '{}': {}{}",
            item.product_name,
            result.disposition(),
            result
                .resale
                .as_ref()
                .map(|r| format!(" via {}", r.platform.display_name()))
                .unwrap_or_default()
        );

        Ok(result)
    }

    /// Same as `decide`, starting from raw caller input.
    /// Unknown conditions are rejected before any rule runs.
    pub fn decide_input(&self, input: ReturnItemInput) -> DomainResult<DecisionResult> {
        let item = ReturnItem::try_from(input)?;
        debug!("Parsed return input for '{}'", item.product_name);
        self.decide(&item)
    }
}

/// Decide with the default rule set
pub fn decide(item: &ReturnItem) -> DomainResult<DecisionResult> {
    DecisionEngine::default().decide(item)
}
