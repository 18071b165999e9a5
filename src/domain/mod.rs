// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod analytics;
pub mod disposition;
pub mod resale;
pub mod return_item;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Return Item Domain
pub use return_item::{
    validate_return_item, validate_return_record, EligibilityStatus, ItemCategory, ItemCondition,
    ManualOverride, RefundStatus, ReturnItem, ReturnItemInput, ReturnReason, ReturnRecord,
};

// Disposition Domain (engine output)
pub use disposition::{
    ClassificationResult, DecisionResult, Disposition, DispositionConfidence, ResalePlatform,
    ResaleRecommendation,
};

// Resale Domain
pub use resale::{ListingStatus, ResaleListing};

// Analytics (Derived Data)
pub use analytics::{PlatformPerformance, ReturnsAnalytics};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed input: missing field, unknown enum label, negative value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A caller broke an operation's contract
    #[error("Precondition violation: {0}")]
    PreconditionViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
