// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

mod mapping;

pub mod resale_listing_repository;
pub mod return_repository;

pub use resale_listing_repository::{ResaleListingRepository, SqliteResaleListingRepository};
pub use return_repository::{ReturnRepository, SqliteReturnRepository};

#[cfg(test)]
pub use resale_listing_repository::MockResaleListingRepository;
#[cfg(test)]
pub use return_repository::MockReturnRepository;
