// src/services/analytics_service.rs
//
// Read-only. Recomputes the report from scratch on every call.

use log::debug;
use std::sync::Arc;

use crate::domain::analytics::ReturnsAnalytics;
use crate::error::AppResult;
use crate::repositories::{ResaleListingRepository, ReturnRepository};

pub struct AnalyticsService {
    return_repo: Arc<dyn ReturnRepository>,
    listing_repo: Arc<dyn ResaleListingRepository>,
}

impl AnalyticsService {
    pub fn new(
        return_repo: Arc<dyn ReturnRepository>,
        listing_repo: Arc<dyn ResaleListingRepository>,
    ) -> Self {
        Self {
            return_repo,
            listing_repo,
        }
    }

    pub fn compute(&self) -> AppResult<ReturnsAnalytics> {
        let returns = self.return_repo.list_all()?;
        let listings = self.listing_repo.list_all()?;

        debug!(
            "Computing analytics over {} returns and {} listings",
            returns.len(),
            listings.len()
        );

        Ok(ReturnsAnalytics::compute(&returns, &listings))
    }
}
