// src/lib.rs
// ReLoop - Returns manager
//
// Architecture:
// - Domain-centric: all business rules live in domain types and the decision engine
// - Deterministic: the engine is a pure function of the item it is given
// - Event-driven: services coordinate side effects through the event bus
// - Explicit: statuses are always derived, never set by hand
// - Application Layer: command boundary used by the CLI

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_return_item,
    validate_return_record,
    // Engine output
    ClassificationResult,
    DecisionResult,
    Disposition,
    DispositionConfidence,
    DomainError,
    DomainResult,
    // Return items
    EligibilityStatus,
    ItemCategory,
    ItemCondition,
    // Resale
    ListingStatus,
    ManualOverride,
    PlatformPerformance,
    RefundStatus,
    ResaleListing,
    ResalePlatform,
    ResaleRecommendation,
    ReturnItem,
    ReturnItemInput,
    ReturnReason,
    ReturnRecord,
    // Analytics
    ReturnsAnalytics,
};

// ============================================================================
// PUBLIC API - Errors & Config
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    register_review_notification_handlers,
    DomainEvent,
    EventBus,
    LogReviewNotifier,
    ManualOverrideApplied,
    ResaleListingCreated,
    ResaleListingSold,
    ResaleListingWithdrawn,
    ReturnFlaggedForReview,
    ReturnItemCreated,
    ReturnItemDeleted,
    ReturnProcessed,
    ReviewNotice,
    ReviewNotifier,
};

// ============================================================================
// PUBLIC API - Database & Repositories
// ============================================================================

pub use db::{create_connection_pool, create_memory_pool, initialize_database, ConnectionPool};

pub use repositories::{
    ResaleListingRepository, ReturnRepository, SqliteResaleListingRepository,
    SqliteReturnRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Decision engine
    decide,
    DecisionEngine,
    DispositionClassifier,
    DispositionRules,
    ResaleRouter,
    // Workflow
    AnalyticsService,
    CreateReturnRequest,
    ManualOverrideRequest,
    ResaleService,
    ReturnService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

pub use application::commands;
pub use application::dto;
