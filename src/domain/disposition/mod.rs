// src/domain/disposition/mod.rs
//
// Disposition Domain
//
// Value objects produced by the decision engine.
//
// CRITICAL RULES:
// - All types are pure value objects (immutable)
// - No side effects
// - No persistence
// - Deterministic: same input → same output

pub mod value_objects;

pub use value_objects::{
    round_to_cents, ClassificationResult, DecisionResult, Disposition, DispositionConfidence,
    ResalePlatform, ResaleRecommendation,
};
