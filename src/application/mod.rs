// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits above services and owns the composition root
// - Translates between DTOs and domain entities
// - Maps AppError into ErrorResponse for front ends

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::CommandResult;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
