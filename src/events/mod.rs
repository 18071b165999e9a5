// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod handlers;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS
// ============================================================================

pub use types::DomainEvent;

pub use types::{
    // Returns
    ManualOverrideApplied,
    ReturnFlaggedForReview,
    ReturnItemCreated,
    ReturnItemDeleted,
    ReturnProcessed,
    // Resale
    ResaleListingCreated,
    ResaleListingSold,
    ResaleListingWithdrawn,
};

pub use bus::EventBus;

pub use handlers::{
    register_review_notification_handlers, LogReviewNotifier, ReviewNotice, ReviewNoticeKind,
    ReviewNotifier,
};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
