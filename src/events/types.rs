// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::disposition::{Disposition, ResalePlatform};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// RETURN EVENTS
// ============================================================================

/// Emitted when a return is registered, before any decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnItemCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub return_id: Uuid,
    pub product_name: String,
    pub category: String,
}

impl ReturnItemCreated {
    pub fn new(return_id: Uuid, product_name: String, category: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            return_id,
            product_name,
            category,
        }
    }
}

impl DomainEvent for ReturnItemCreated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReturnItemCreated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnItemDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub return_id: Uuid,
}

impl ReturnItemDeleted {
    pub fn new(return_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            return_id,
        }
    }
}

impl DomainEvent for ReturnItemDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReturnItemDeleted" }
}

/// Emitted once the decision engine's result has been stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnProcessed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub return_id: Uuid,
    pub disposition: Disposition,
    pub confidence: f64,
    /// Present only for marketplace resale
    pub platform: Option<ResalePlatform>,
}

impl ReturnProcessed {
    pub fn new(
        return_id: Uuid,
        disposition: Disposition,
        confidence: f64,
        platform: Option<ResalePlatform>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            return_id,
            disposition,
            confidence,
            platform,
        }
    }
}

impl DomainEvent for ReturnProcessed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReturnProcessed" }
}

/// Emitted when the engine could not decide and a human must
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnFlaggedForReview {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub return_id: Uuid,
    pub product_name: String,
    pub rationale: String,
}

impl ReturnFlaggedForReview {
    pub fn new(return_id: Uuid, product_name: String, rationale: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            return_id,
            product_name,
            rationale,
        }
    }
}

impl DomainEvent for ReturnFlaggedForReview {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReturnFlaggedForReview" }
}

/// Emitted when a reviewer replaces the engine's disposition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualOverrideApplied {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub return_id: Uuid,
    pub product_name: String,
    /// Effective disposition before the override
    pub previous: Option<Disposition>,
    pub disposition: Disposition,
    pub platform: Option<ResalePlatform>,
    pub note: Option<String>,
}

impl ManualOverrideApplied {
    pub fn new(
        return_id: Uuid,
        product_name: String,
        previous: Option<Disposition>,
        disposition: Disposition,
        platform: Option<ResalePlatform>,
        note: Option<String>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            return_id,
            product_name,
            previous,
            disposition,
            platform,
            note,
        }
    }
}

impl DomainEvent for ManualOverrideApplied {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ManualOverrideApplied" }
}

// ============================================================================
// RESALE EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResaleListingCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub listing_id: Uuid,
    pub return_id: Uuid,
    pub platform: ResalePlatform,
    pub listing_price: f64,
}

impl ResaleListingCreated {
    pub fn new(listing_id: Uuid, return_id: Uuid, platform: ResalePlatform, listing_price: f64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            listing_id,
            return_id,
            platform,
            listing_price,
        }
    }
}

impl DomainEvent for ResaleListingCreated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ResaleListingCreated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResaleListingSold {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub listing_id: Uuid,
    pub return_id: Uuid,
    pub platform: ResalePlatform,
    pub sold_price: f64,
}

impl ResaleListingSold {
    pub fn new(listing_id: Uuid, return_id: Uuid, platform: ResalePlatform, sold_price: f64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            listing_id,
            return_id,
            platform,
            sold_price,
        }
    }
}

impl DomainEvent for ResaleListingSold {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ResaleListingSold" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResaleListingWithdrawn {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub listing_id: Uuid,
    pub return_id: Uuid,
}

impl ResaleListingWithdrawn {
    pub fn new(listing_id: Uuid, return_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            listing_id,
            return_id,
        }
    }
}

impl DomainEvent for ResaleListingWithdrawn {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ResaleListingWithdrawn" }
}
