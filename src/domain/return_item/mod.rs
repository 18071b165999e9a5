pub mod entity;
pub mod invariants;

pub use entity::{
    EligibilityStatus, ItemCategory, ItemCondition, ManualOverride, RefundStatus, ReturnItem,
    ReturnItemInput, ReturnReason, ReturnRecord,
};
pub use invariants::{validate_return_item, validate_return_record};
