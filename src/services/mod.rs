// src/services/mod.rs
//
// Services Module
//
// - Decision engine: pure, stateless (classifier, router, engine)
// - Orchestration: engine + repositories + event bus

pub mod disposition_classifier;
pub mod resale_router;
pub mod decision_engine;

pub mod return_service;
pub mod resale_service;
pub mod analytics_service;

#[cfg(test)]
mod return_service_tests;

pub use disposition_classifier::{DispositionClassifier, DispositionRules};
pub use resale_router::ResaleRouter;
pub use decision_engine::{decide, DecisionEngine};

pub use return_service::{CreateReturnRequest, ManualOverrideRequest, ReturnService};
pub use resale_service::ResaleService;
pub use analytics_service::AnalyticsService;
