// src/services/disposition_classifier.rs
//
// Disposition Classifier
//
// Maps a returned item to a disposition with a confidence and a rationale.
//
// CRITICAL RULES:
// - Pure: no I/O, no repositories, no events
// - Deterministic: same item → same result
// - Total: every well-formed item gets a result (manual review fallback)
// - Prioritized cascade: first matching rule wins, order below is fixed
//
// CASCADE:
//   1. Severe damage in notes          → Discard            (0.90)
//   2. Perfect-condition size return   → Relist             (0.95)
//   3. Minor defect                    → Outlet             (0.85)
//   4. High-value changed-mind item    → MarketplaceResale  (0.80)
//   5. Nothing matched                 → ManualReview       (0.70)

use log::debug;

use crate::domain::disposition::{ClassificationResult, Disposition, DispositionConfidence};
use crate::domain::return_item::{ItemCondition, ReturnItem};

// ============================================================================
// DISPOSITION CLASSIFIER
// ============================================================================

/// Stateless classifier. Cheap to build, safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct DispositionClassifier {
    rules: DispositionRules,
}

impl DispositionClassifier {
    pub fn new(rules: DispositionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &DispositionRules {
        &self.rules
    }

    /// Run the cascade. Never fails for a typed `ReturnItem`.
    pub fn classify(&self, item: &ReturnItem) -> ClassificationResult {
        let notes = item.normalized_notes();

        let result = self
            .rules
            .severe_damage(&notes)
            .or_else(|| self.rules.perfect_condition_size_return(item, &notes))
            .or_else(|| self.rules.minor_defect(item, &notes))
            .or_else(|| self.rules.high_value_changed_mind(item))
            .unwrap_or_else(|| self.rules.fallback());

        debug!(
            "Classified '{}' as {} ({})",
            item.product_name, result.disposition, result.confidence
        );

        result
    }
}

// ============================================================================
// DISPOSITION RULES (DETERMINISTIC, ORDERED)
// ============================================================================

/// Keyword vocabulary of the cascade.
/// Every keyword is lower case; notes are lower-cased before matching.
#[derive(Debug, Clone)]
pub struct DispositionRules {
    /// Any of these in the notes means the item is beyond resale
    damage_keywords: &'static [&'static str],

    /// Notes phrase that confirms a size return is untouched
    perfect_condition_phrase: &'static str,

    /// Marks a defect as more than cosmetic
    significant_keyword: &'static str,
}

impl Default for DispositionRules {
    fn default() -> Self {
        Self {
            damage_keywords: &["damage", "tear", "broken", "significant"],
            perfect_condition_phrase: "perfect condition",
            significant_keyword: "significant",
        }
    }
}

impl DispositionRules {
    pub fn damage_keywords(&self) -> &[&'static str] {
        self.damage_keywords
    }

    /// Rule 1: damage keywords override everything else
    pub fn severe_damage(&self, notes: &str) -> Option<ClassificationResult> {
        let keyword = self
            .damage_keywords
            .iter()
            .find(|keyword| notes.contains(*keyword))?;

        Some(ClassificationResult::new(
            Disposition::Discard,
            DispositionConfidence::SEVERE_DAMAGE,
            format!(
                "Notes mention \"{}\": damage too extensive for resale.",
                keyword
            ),
        ))
    }

    /// Rule 2: sized wrong, otherwise untouched
    pub fn perfect_condition_size_return(
        &self,
        item: &ReturnItem,
        notes: &str,
    ) -> Option<ClassificationResult> {
        let as_new = matches!(item.condition, ItemCondition::New | ItemCondition::Excellent);

        if !item.return_reason.is_size_related()
            || !notes.contains(self.perfect_condition_phrase)
            || !as_new
        {
            return None;
        }

        Some(ClassificationResult::new(
            Disposition::Relist,
            DispositionConfidence::PERFECT_SIZE_RETURN,
            format!(
                "Returned for \"{}\", notes report perfect condition, condition {}: \
                 perfect condition, only a sizing issue.",
                item.return_reason, item.condition
            ),
        ))
    }

    /// Rule 3: defect that is not significant, item still usable
    pub fn minor_defect(&self, item: &ReturnItem, notes: &str) -> Option<ClassificationResult> {
        let usable = matches!(item.condition, ItemCondition::Good | ItemCondition::Fair);

        if !item.return_reason.is_defective()
            || notes.contains(self.significant_keyword)
            || !usable
        {
            return None;
        }

        Some(ClassificationResult::new(
            Disposition::Outlet,
            DispositionConfidence::MINOR_DEFECT,
            format!(
                "Returned as \"{}\" in {} condition with no significant damage noted: \
                 minor defect, suitable for discounted outlet sale.",
                item.return_reason, item.condition
            ),
        ))
    }

    /// Rule 4: accessories and luxury goods the customer simply didn't want
    pub fn high_value_changed_mind(&self, item: &ReturnItem) -> Option<ClassificationResult> {
        let good_enough = matches!(
            item.condition,
            ItemCondition::New | ItemCondition::Excellent | ItemCondition::Good
        );

        if !item.category.is_high_value()
            || !item.return_reason.is_changed_mind()
            || !good_enough
        {
            return None;
        }

        Some(ClassificationResult::new(
            Disposition::MarketplaceResale,
            DispositionConfidence::HIGH_VALUE_CHANGED_MIND,
            format!(
                "{} item returned as \"{}\" in {} condition: \
                 high-value item in good condition, suited to marketplace resale.",
                item.category, item.return_reason, item.condition
            ),
        ))
    }

    /// Rule 5
    pub fn fallback(&self) -> ClassificationResult {
        ClassificationResult::new(
            Disposition::ManualReview,
            DispositionConfidence::FALLBACK,
            "No disposition rule matched: insufficient signal for automatic disposition; \
             flag for human review.",
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
