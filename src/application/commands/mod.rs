// src/application/commands/mod.rs
//
// Command handlers: the boundary any front end (CLI today) calls into.
// Every handler returns `CommandResult`, so callers only ever see
// `ErrorResponse` on failure.

pub mod analytics_commands;
pub mod resale_commands;
pub mod return_commands;

pub use analytics_commands::*;
pub use resale_commands::*;
pub use return_commands::*;

use uuid::Uuid;

use crate::application::error_handling::ErrorResponse;

pub type CommandResult<T> = Result<T, ErrorResponse>;

/// Parse an id argument, naming the resource in the error
pub(crate) fn parse_id(raw: &str, resource: &str) -> CommandResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| ErrorResponse::validation(format!("Invalid {} id '{}': {}", resource, raw, e)))
}
