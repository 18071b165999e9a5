// src/events/handlers/review_notification_handler.rs
//
// Review Notification Handler
//
// Tells reviewers when a return needs a human, and tells them when someone
// has overridden the engine.
//
// CRITICAL RULES:
// - Only consumes ReturnFlaggedForReview and ManualOverrideApplied
// - Delivery goes through ReviewNotifier; the handler holds no logic of its own
// - A failed delivery is logged, never propagated into the bus

use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::events::types::{ManualOverrideApplied, ReturnFlaggedForReview};
use crate::events::EventBus;

// ============================================================================
// NOTICE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewNoticeKind {
    FlaggedForReview,
    ManualOverride,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewNotice {
    pub kind: ReviewNoticeKind,
    pub return_id: Uuid,
    pub subject: String,
    pub body: String,
}

impl ReviewNotice {
    fn flagged(event: &ReturnFlaggedForReview) -> Self {
        Self {
            kind: ReviewNoticeKind::FlaggedForReview,
            return_id: event.return_id,
            subject: format!("Return needs review: {}", event.product_name),
            body: event.rationale.clone(),
        }
    }

    fn overridden(event: &ManualOverrideApplied) -> Self {
        let previous = event
            .previous
            .map(|d| d.to_string())
            .unwrap_or_else(|| "none".to_string());

        let mut body = format!("Disposition changed from {} to {}", previous, event.disposition);
        if let Some(platform) = event.platform {
            body.push_str(&format!(" on {}", platform.display_name()));
        }
        if let Some(note) = &event.note {
            body.push_str(&format!(". Note: {}", note));
        }

        Self {
            kind: ReviewNoticeKind::ManualOverride,
            return_id: event.return_id,
            subject: format!("Manual override: {}", event.product_name),
            body,
        }
    }
}

// ============================================================================
// NOTIFIER
// ============================================================================

/// Delivery channel for review notices (mail, chat, ticketing...)
pub trait ReviewNotifier: Send + Sync {
    fn notify(&self, notice: &ReviewNotice) -> AppResult<()>;
}

/// Writes notices to the application log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReviewNotifier;

impl ReviewNotifier for LogReviewNotifier {
    fn notify(&self, notice: &ReviewNotice) -> AppResult<()> {
        info!(
            "[REVIEW] {} (return {}): {}",
            notice.subject, notice.return_id, notice.body
        );
        Ok(())
    }
}

// ============================================================================
// HANDLER REGISTRATION
// ============================================================================

pub fn register_review_notification_handlers(bus: &EventBus, notifier: Arc<dyn ReviewNotifier>) {
    let flagged_notifier = Arc::clone(&notifier);
    bus.subscribe::<ReturnFlaggedForReview, _>(move |event| {
        deliver(flagged_notifier.as_ref(), ReviewNotice::flagged(event));
    });

    bus.subscribe::<ManualOverrideApplied, _>(move |event| {
        deliver(notifier.as_ref(), ReviewNotice::overridden(event));
    });
}

fn deliver(notifier: &dyn ReviewNotifier, notice: ReviewNotice) {
    if let Err(e) = notifier.notify(&notice) {
        warn!(
            "Failed to deliver review notice for return {}: {}",
            notice.return_id, e
        );
    }
}
