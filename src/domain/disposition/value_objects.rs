// src/domain/disposition/value_objects.rs
//
// Disposition Value Objects
//
// Pure, immutable data describing what happens to a returned item.
// Built fresh per decision, fully determined by the input item.
//
// CRITICAL INVARIANTS:
// - Confidence is always within [0.0, 1.0]
// - A resale recommendation exists iff the disposition is MarketplaceResale
// - No timestamps or random ids: equal inputs give equal values

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{DomainError, DomainResult};

// ============================================================================
// DISPOSITION
// ============================================================================

/// Downstream handling chosen for a returned item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Back into the main store at full price
    Relist,

    /// Discounted outlet sale
    Outlet,

    /// Third-party resale platform, see `ResaleRecommendation`
    MarketplaceResale,

    Donate,

    Discard,

    /// No rule was confident enough; a human decides
    ManualReview,
}

impl Disposition {
    pub const ALL: [Disposition; 6] = [
        Disposition::Relist,
        Disposition::Outlet,
        Disposition::MarketplaceResale,
        Disposition::Donate,
        Disposition::Discard,
        Disposition::ManualReview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Relist => "relist",
            Disposition::Outlet => "outlet",
            Disposition::MarketplaceResale => "marketplace_resale",
            Disposition::Donate => "donate",
            Disposition::Discard => "discard",
            Disposition::ManualReview => "manual_review",
        }
    }

    pub fn requires_resale(&self) -> bool {
        matches!(self, Disposition::MarketplaceResale)
    }
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disposition {
    type Err = DomainError;

    /// Accepts the canonical labels plus the short forms stored by older rows
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relist" => Ok(Disposition::Relist),
            "outlet" => Ok(Disposition::Outlet),
            "marketplace_resale" | "marketplace" => Ok(Disposition::MarketplaceResale),
            "donate" => Ok(Disposition::Donate),
            "discard" => Ok(Disposition::Discard),
            "manual_review" | "review" => Ok(Disposition::ManualReview),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown disposition '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// CONFIDENCE
// ============================================================================

/// Confidence of a classification, from 0.0 (none) to 1.0 (certain)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispositionConfidence {
    score: f64,
}

impl DispositionConfidence {
    pub const SEVERE_DAMAGE: f64 = 0.90;
    pub const PERFECT_SIZE_RETURN: f64 = 0.95;
    pub const MINOR_DEFECT: f64 = 0.85;
    pub const HIGH_VALUE_CHANGED_MIND: f64 = 0.80;
    pub const FALLBACK: f64 = 0.70;

    /// Creates a new confidence score, clamped to [0.0, 1.0].
    /// NaN collapses to 0.0.
    pub fn new(score: f64) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        Self { score }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// A reviewer's own decision
    pub fn certain() -> Self {
        Self::new(1.0)
    }
}

impl PartialEq for DispositionConfidence {
    fn eq(&self, other: &Self) -> bool {
        (self.score - other.score).abs() < f64::EPSILON
    }
}

impl std::fmt::Display for DispositionConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.score * 100.0)
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub disposition: Disposition,
    pub confidence: DispositionConfidence,
    /// Human-readable, names the signal that triggered the rule
    pub rationale: String,
}

impl ClassificationResult {
    pub fn new(disposition: Disposition, confidence: f64, rationale: impl Into<String>) -> Self {
        Self {
            disposition,
            confidence: DispositionConfidence::new(confidence),
            rationale: rationale.into(),
        }
    }

    /// Classification made by a human reviewer
    pub fn manual(disposition: Disposition, rationale: impl Into<String>) -> Self {
        Self {
            disposition,
            confidence: DispositionConfidence::certain(),
            rationale: rationale.into(),
        }
    }
}

// ============================================================================
// RESALE PLATFORM
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResalePlatform {
    #[serde(rename = "ebay")]
    EBay,
    #[serde(rename = "poshmark")]
    Poshmark,
    #[serde(rename = "therealreal")]
    TheRealReal,
    #[serde(rename = "mercari")]
    Mercari,
    #[serde(rename = "thredup")]
    ThredUp,
    #[serde(rename = "depop")]
    Depop,
    #[serde(rename = "facebook_marketplace")]
    FacebookMarketplace,
    #[serde(rename = "etsy")]
    Etsy,
}

impl ResalePlatform {
    pub const ALL: [ResalePlatform; 8] = [
        ResalePlatform::EBay,
        ResalePlatform::Poshmark,
        ResalePlatform::TheRealReal,
        ResalePlatform::Mercari,
        ResalePlatform::ThredUp,
        ResalePlatform::Depop,
        ResalePlatform::FacebookMarketplace,
        ResalePlatform::Etsy,
    ];

    /// Storage / wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            ResalePlatform::EBay => "ebay",
            ResalePlatform::Poshmark => "poshmark",
            ResalePlatform::TheRealReal => "therealreal",
            ResalePlatform::Mercari => "mercari",
            ResalePlatform::ThredUp => "thredup",
            ResalePlatform::Depop => "depop",
            ResalePlatform::FacebookMarketplace => "facebook_marketplace",
            ResalePlatform::Etsy => "etsy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ResalePlatform::EBay => "eBay",
            ResalePlatform::Poshmark => "Poshmark",
            ResalePlatform::TheRealReal => "TheRealReal",
            ResalePlatform::Mercari => "Mercari",
            ResalePlatform::ThredUp => "ThredUp",
            ResalePlatform::Depop => "Depop",
            ResalePlatform::FacebookMarketplace => "Facebook Marketplace",
            ResalePlatform::Etsy => "Etsy",
        }
    }
}

impl std::fmt::Display for ResalePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResalePlatform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "ebay" => Ok(ResalePlatform::EBay),
            "poshmark" => Ok(ResalePlatform::Poshmark),
            "therealreal" => Ok(ResalePlatform::TheRealReal),
            "mercari" => Ok(ResalePlatform::Mercari),
            "thredup" => Ok(ResalePlatform::ThredUp),
            "depop" => Ok(ResalePlatform::Depop),
            "facebookmarketplace" | "facebook" => Ok(ResalePlatform::FacebookMarketplace),
            "etsy" => Ok(ResalePlatform::Etsy),
            _ => Err(DomainError::InvalidInput(format!(
                "Unknown resale platform '{}'",
                s.trim()
            ))),
        }
    }
}

// ============================================================================
// RESALE RECOMMENDATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResaleRecommendation {
    pub platform: ResalePlatform,
    /// Initial asking price, the item's estimated value rounded to cents
    pub listing_price: f64,
    pub rationale: String,
}

impl ResaleRecommendation {
    pub fn new(platform: ResalePlatform, listing_price: f64, rationale: impl Into<String>) -> Self {
        Self {
            platform,
            listing_price: round_to_cents(listing_price),
            rationale: rationale.into(),
        }
    }
}

pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// ============================================================================
// DECISION RESULT
// ============================================================================

/// Complete engine output.
/// `resale` is `Some` iff `classification.disposition` is MarketplaceResale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub classification: ClassificationResult,
    pub resale: Option<ResaleRecommendation>,
}

impl DecisionResult {
    /// Builds a result, rejecting combinations that break the resale invariant
    pub fn new(
        classification: ClassificationResult,
        resale: Option<ResaleRecommendation>,
    ) -> DomainResult<Self> {
        let result = Self {
            classification,
            resale,
        };
        result.check_resale_invariant()?;
        Ok(result)
    }

    pub fn disposition(&self) -> Disposition {
        self.classification.disposition
    }

    pub fn check_resale_invariant(&self) -> DomainResult<()> {
        let needs_resale = self.classification.disposition.requires_resale();
        match (needs_resale, self.resale.is_some()) {
            (true, false) => Err(DomainError::PreconditionViolation(
                "Marketplace resale decision is missing its resale recommendation".to_string(),
            )),
            (false, true) => Err(DomainError::PreconditionViolation(format!(
                "Disposition {} cannot carry a resale recommendation",
                self.classification.disposition
            ))),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamping() {
        assert_eq!(DispositionConfidence::new(1.5).score(), 1.0);
        assert_eq!(DispositionConfidence::new(-0.5).score(), 0.0);
        assert_eq!(DispositionConfidence::new(f64::NAN).score(), 0.0);
        assert_eq!(DispositionConfidence::new(0.85).score(), 0.85);
    }

    #[test]
    fn test_confidence_display() {
        assert_eq!(DispositionConfidence::new(0.95).to_string(), "95%");
    }

    #[test]
    fn test_disposition_labels() {
        for disposition in Disposition::ALL {
            let parsed: Disposition = disposition.as_str().parse().unwrap();
            assert_eq!(parsed, disposition);
        }
        assert_eq!("marketplace".parse::<Disposition>().unwrap(), Disposition::MarketplaceResale);
        assert_eq!("review".parse::<Disposition>().unwrap(), Disposition::ManualReview);
        assert!("recycle".parse::<Disposition>().is_err());
    }

    #[test]
    fn test_platform_parsing_tolerates_display_names() {
        assert_eq!("eBay".parse::<ResalePlatform>().unwrap(), ResalePlatform::EBay);
        assert_eq!(
            "Facebook Marketplace".parse::<ResalePlatform>().unwrap(),
            ResalePlatform::FacebookMarketplace
        );
        assert_eq!("The RealReal".parse::<ResalePlatform>().unwrap(), ResalePlatform::TheRealReal);
        assert!("Shopify".parse::<ResalePlatform>().is_err());
    }

    #[test]
    fn test_platform_serializes_to_storage_label() {
        let json = serde_json::to_string(&ResalePlatform::TheRealReal).unwrap();
        assert_eq!(json, "\"therealreal\"");
    }

    #[test]
    fn test_listing_price_rounds_to_cents() {
        let rec = ResaleRecommendation::new(ResalePlatform::EBay, 99.999, "x");
        assert_eq!(rec.listing_price, 100.0);
        let rec = ResaleRecommendation::new(ResalePlatform::EBay, 12.344, "x");
        assert_eq!(rec.listing_price, 12.34);
    }

    #[test]
    fn test_decision_result_enforces_resale_invariant() {
        let resale = ResaleRecommendation::new(ResalePlatform::EBay, 80.0, "versatile");

        let missing = DecisionResult::new(
            ClassificationResult::new(Disposition::MarketplaceResale, 0.8, "r"),
            None,
        );
        assert!(matches!(missing, Err(DomainError::PreconditionViolation(_))));

        let extra = DecisionResult::new(
            ClassificationResult::new(Disposition::Relist, 0.95, "r"),
            Some(resale.clone()),
        );
        assert!(matches!(extra, Err(DomainError::PreconditionViolation(_))));

        let ok = DecisionResult::new(
            ClassificationResult::new(Disposition::MarketplaceResale, 0.8, "r"),
            Some(resale),
        );
        assert!(ok.is_ok());
    }
}
