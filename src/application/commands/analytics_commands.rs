// src/application/commands/analytics_commands.rs

use crate::application::{dto::AnalyticsDto, state::AppState};

use super::CommandResult;

/// Returns report, recomputed from stored returns and listings
pub fn get_analytics(state: &AppState) -> CommandResult<AnalyticsDto> {
    let analytics = state.analytics_service.compute()?;
    Ok(AnalyticsDto::from(analytics))
}
