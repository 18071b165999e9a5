// src/events/handlers/mod.rs
//
// Event Handlers
//
// Handlers use closure-based subscription via EventBus::subscribe.

pub mod review_notification_handler;

pub use review_notification_handler::{
    register_review_notification_handlers, LogReviewNotifier, ReviewNotice, ReviewNoticeKind,
    ReviewNotifier,
};
