use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::disposition::{ClassificationResult, DecisionResult, Disposition, ResalePlatform};
use crate::domain::{DomainError, DomainResult};

// ============================================================================
// ITEM CONDITION
// ============================================================================

/// Physical condition reported at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    New,
    Excellent,
    Good,
    Fair,
    Poor,
    Damaged,
}

impl ItemCondition {
    pub const ALL: [ItemCondition; 6] = [
        ItemCondition::New,
        ItemCondition::Excellent,
        ItemCondition::Good,
        ItemCondition::Fair,
        ItemCondition::Poor,
        ItemCondition::Damaged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCondition::New => "new",
            ItemCondition::Excellent => "excellent",
            ItemCondition::Good => "good",
            ItemCondition::Fair => "fair",
            ItemCondition::Poor => "poor",
            ItemCondition::Damaged => "damaged",
        }
    }
}

impl FromStr for ItemCondition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(ItemCondition::New),
            "excellent" => Ok(ItemCondition::Excellent),
            "good" => Ok(ItemCondition::Good),
            "fair" => Ok(ItemCondition::Fair),
            "poor" => Ok(ItemCondition::Poor),
            "damaged" => Ok(ItemCondition::Damaged),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown item condition '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ITEM CATEGORY
// ============================================================================

/// Product category.
///
/// A label spelled exactly like a canonical category (ignoring case and
/// surrounding whitespace) maps to its variant. Anything else is kept
/// verbatim as `Other`; the predicates below test the label itself with
/// case-insensitive substring matching, so "Luxury Watches" is still luxury.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Luxury,
    Accessories,
    Footwear,
    Apparel,
    Electronics,
    Home,
    Other(String),
}

impl ItemCategory {
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();

        match trimmed.to_lowercase().as_str() {
            "luxury" => ItemCategory::Luxury,
            "accessories" => ItemCategory::Accessories,
            "footwear" => ItemCategory::Footwear,
            "apparel" => ItemCategory::Apparel,
            "electronics" => ItemCategory::Electronics,
            "home" => ItemCategory::Home,
            _ => ItemCategory::Other(trimmed.to_string()),
        }
    }

    fn mentions(&self, keyword: &str) -> bool {
        self.label().to_lowercase().contains(keyword)
    }

    pub fn is_luxury(&self) -> bool {
        self.mentions("luxury")
    }

    pub fn is_accessory(&self) -> bool {
        self.mentions("accessor")
    }

    pub fn is_apparel(&self) -> bool {
        self.mentions("apparel")
    }

    /// Categories whose items hold value well on secondary markets
    pub fn is_high_value(&self) -> bool {
        self.is_luxury() || self.is_accessory()
    }

    pub fn label(&self) -> &str {
        match self {
            ItemCategory::Luxury => "Luxury",
            ItemCategory::Accessories => "Accessories",
            ItemCategory::Footwear => "Footwear",
            ItemCategory::Apparel => "Apparel",
            ItemCategory::Electronics => "Electronics",
            ItemCategory::Home => "Home",
            ItemCategory::Other(label) => label,
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// RETURN REASON
// ============================================================================

/// Why the customer sent the item back.
///
/// Same labelling as `ItemCategory`: exact canonical labels map to a
/// variant, free text stays verbatim in `Other`. A free-text reason can
/// carry several signals ("defective, also wrong size"), so the rules ask
/// the predicates rather than comparing variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnReason {
    WrongSize,
    Defective,
    ChangedMind,
    ShippingDamage,
    Other(String),
}

impl ReturnReason {
    const SIZE_PHRASES: [&'static str; 3] = ["wrong size", "size too small", "size too large"];

    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();

        match trimmed.to_lowercase().as_str() {
            "wrong size" => ReturnReason::WrongSize,
            "defective" => ReturnReason::Defective,
            "changed mind" => ReturnReason::ChangedMind,
            "damaged in shipping" => ReturnReason::ShippingDamage,
            _ => ReturnReason::Other(trimmed.to_string()),
        }
    }

    fn lowered(&self) -> String {
        self.label().to_lowercase()
    }

    pub fn is_size_related(&self) -> bool {
        let lowered = self.lowered();
        Self::SIZE_PHRASES.iter().any(|p| lowered.contains(p))
    }

    pub fn is_defective(&self) -> bool {
        self.lowered().contains("defective")
    }

    pub fn is_changed_mind(&self) -> bool {
        self.lowered().contains("changed mind")
    }

    pub fn label(&self) -> &str {
        match self {
            ReturnReason::WrongSize => "wrong size",
            ReturnReason::Defective => "defective",
            ReturnReason::ChangedMind => "changed mind",
            ReturnReason::ShippingDamage => "damaged in shipping",
            ReturnReason::Other(label) => label,
        }
    }
}

impl std::fmt::Display for ReturnReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// RETURN ITEM (ENGINE INPUT)
// ============================================================================

/// Immutable snapshot of a returned item, the input of the decision engine.
/// Not the persisted record: see `ReturnRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnItem {
    pub product_name: String,
    pub category: ItemCategory,
    pub return_reason: ReturnReason,
    pub condition: ItemCondition,
    pub notes: Option<String>,
    /// Defaults to 0 when unknown
    pub estimated_value: f64,
}

impl ReturnItem {
    pub fn new(
        product_name: impl Into<String>,
        category: ItemCategory,
        return_reason: ReturnReason,
        condition: ItemCondition,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            category,
            return_reason,
            condition,
            notes: None,
            estimated_value: 0.0,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_estimated_value(mut self, value: f64) -> Self {
        self.estimated_value = value;
        self
    }

    /// Lower-cased notes, empty when absent
    pub fn normalized_notes(&self) -> String {
        self.notes.as_deref().unwrap_or_default().to_lowercase()
    }
}

/// Raw item as it arrives from callers (request bodies, database columns).
/// Converted into a typed `ReturnItem` with `TryFrom`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnItemInput {
    pub product_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub return_reason: String,
    pub condition: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub estimated_value: Option<f64>,
}

impl TryFrom<ReturnItemInput> for ReturnItem {
    type Error = DomainError;

    fn try_from(input: ReturnItemInput) -> DomainResult<Self> {
        let condition: ItemCondition = input.condition.parse()?;

        Ok(ReturnItem {
            product_name: input.product_name,
            category: ItemCategory::from_label(&input.category),
            return_reason: ReturnReason::from_label(&input.return_reason),
            condition,
            notes: input.notes,
            estimated_value: input.estimated_value.unwrap_or(0.0),
        })
    }
}

// ============================================================================
// RETURN RECORD (PERSISTED)
// ============================================================================

/// Whether the return qualifies for automatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Pending,
    Eligible,
    Flagged,
    Denied,
}

impl EligibilityStatus {
    /// Discard and manual review need a human before anything else happens
    pub fn for_disposition(disposition: Disposition) -> Self {
        match disposition {
            Disposition::Discard | Disposition::ManualReview => EligibilityStatus::Flagged,
            _ => EligibilityStatus::Eligible,
        }
    }
}

impl std::fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EligibilityStatus::Pending => write!(f, "pending"),
            EligibilityStatus::Eligible => write!(f, "eligible"),
            EligibilityStatus::Flagged => write!(f, "flagged"),
            EligibilityStatus::Denied => write!(f, "denied"),
        }
    }
}

impl FromStr for EligibilityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EligibilityStatus::Pending),
            "eligible" => Ok(EligibilityStatus::Eligible),
            "flagged" => Ok(EligibilityStatus::Flagged),
            "denied" => Ok(EligibilityStatus::Denied),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown eligibility status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Pending,
    Processed,
}

impl RefundStatus {
    pub fn for_eligibility(eligibility: EligibilityStatus) -> Self {
        match eligibility {
            EligibilityStatus::Eligible => RefundStatus::Processed,
            _ => RefundStatus::Pending,
        }
    }
}

impl std::fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefundStatus::Pending => write!(f, "pending"),
            RefundStatus::Processed => write!(f, "processed"),
        }
    }
}

impl FromStr for RefundStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RefundStatus::Pending),
            "processed" => Ok(RefundStatus::Processed),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown refund status '{}'",
                other
            ))),
        }
    }
}

/// Decision written back by a human reviewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualOverride {
    pub disposition: Disposition,
    pub platform: Option<ResalePlatform>,
    pub note: Option<String>,
    pub overridden_at: DateTime<Utc>,
}

/// A return as stored in the "return items" table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    pub id: Uuid,
    pub order_id: Option<String>,
    pub product_id: Option<String>,
    pub item: ReturnItem,

    pub eligibility_status: EligibilityStatus,
    pub refund_status: RefundStatus,

    /// Engine output, `None` until the return is processed
    pub decision: Option<DecisionResult>,
    pub manual_override: Option<ManualOverride>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReturnRecord {
    pub fn new(item: ReturnItem, order_id: Option<String>, product_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            item,
            eligibility_status: EligibilityStatus::Pending,
            refund_status: RefundStatus::Pending,
            decision: None,
            manual_override: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_processed(&self) -> bool {
        self.decision.is_some()
    }

    /// Human override wins over the engine
    pub fn effective_disposition(&self) -> Option<Disposition> {
        self.manual_override
            .as_ref()
            .map(|o| o.disposition)
            .or_else(|| self.decision.as_ref().map(|d| d.classification.disposition))
    }

    /// Platform the item is (or would be) listed on
    pub fn effective_platform(&self) -> Option<ResalePlatform> {
        match &self.manual_override {
            Some(o) => o.platform,
            None => self
                .decision
                .as_ref()
                .and_then(|d| d.resale.as_ref())
                .map(|r| r.platform),
        }
    }

    /// Record the engine's decision and derive the downstream statuses
    pub fn record_decision(&mut self, decision: DecisionResult) {
        self.apply_statuses(decision.classification.disposition);
        self.decision = Some(decision);
        self.manual_override = None;
        self.updated_at = Utc::now();
    }

    /// Store a reviewer override next to the engine decision
    pub fn record_override(
        &mut self,
        disposition: Disposition,
        platform: Option<ResalePlatform>,
        note: Option<String>,
    ) -> DomainResult<()> {
        if !self.is_processed() {
            return Err(DomainError::InvalidStateTransition(format!(
                "Return {} has not been processed; nothing to override",
                self.id
            )));
        }

        let now = Utc::now();
        self.apply_statuses(disposition);
        self.manual_override = Some(ManualOverride {
            disposition,
            platform,
            note,
            overridden_at: now,
        });
        self.updated_at = now;
        Ok(())
    }

    fn apply_statuses(&mut self, disposition: Disposition) {
        self.eligibility_status = EligibilityStatus::for_disposition(disposition);
        self.refund_status = RefundStatus::for_eligibility(self.eligibility_status);
    }

    /// Classification as last decided by the engine
    pub fn classification(&self) -> Option<&ClassificationResult> {
        self.decision.as_ref().map(|d| &d.classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_labels_map_to_variants() {
        assert_eq!(ItemCategory::from_label(" apparel "), ItemCategory::Apparel);
        assert_eq!(ReturnReason::from_label("Changed Mind"), ReturnReason::ChangedMind);
        assert_eq!(ReturnReason::from_label("wrong size").label(), "wrong size");
    }

    #[test]
    fn test_free_text_is_kept_verbatim() {
        let category = ItemCategory::from_label("  Luxury Watches ");
        assert_eq!(category.label(), "Luxury Watches");
        assert!(category.is_high_value());
        assert!(!category.is_apparel());

        let reason = ReturnReason::from_label("Size too small");
        assert_eq!(reason.label(), "Size too small");
        assert!(reason.is_size_related());
    }

    #[test]
    fn test_reason_with_several_signals() {
        let reason = ReturnReason::from_label("Defective, also wrong size");

        assert!(reason.is_defective());
        assert!(reason.is_size_related());
        assert!(!reason.is_changed_mind());
    }

    #[test]
    fn test_category_predicates() {
        assert!(ItemCategory::Accessories.is_high_value());
        assert!(ItemCategory::from_label("Apparel accessories").is_apparel());
        assert!(ItemCategory::from_label("Apparel accessories").is_high_value());
        assert!(!ItemCategory::Footwear.is_high_value());
        assert!(!ItemCategory::Other("Toys".to_string()).is_high_value());
    }
}
