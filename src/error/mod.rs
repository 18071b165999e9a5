// src/error/mod.rs
//
// Application-level errors. Domain rules raise `DomainError`; everything that
// crosses a service boundary is an `AppError`.

pub mod types;

pub use types::{AppError, AppResult};
