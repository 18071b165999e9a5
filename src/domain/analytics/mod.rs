// src/domain/analytics/mod.rs
//
// Derived reporting data. Never a source of truth, always recomputable
// from return records and resale listings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::disposition::round_to_cents;
use crate::domain::resale::{ListingStatus, ResaleListing};
use crate::domain::return_item::{EligibilityStatus, RefundStatus, ReturnRecord};

/// Label used in the breakdown for returns without a decision
pub const PENDING_LABEL: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformPerformance {
    pub platform: String,
    pub listed: u32,
    pub sold: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsAnalytics {
    pub total_returns: u32,
    pub pending_classification: u32,
    pub eligible_returns: u32,
    pub flagged_returns: u32,
    pub denied_returns: u32,
    pub total_refunded_amount: f64,
    pub total_recovered_revenue: f64,
    /// Keyed by effective disposition label
    pub disposition_breakdown: BTreeMap<String, u32>,
    /// Sorted by platform label
    pub platform_performance: Vec<PlatformPerformance>,
}

impl ReturnsAnalytics {
    pub fn compute(returns: &[ReturnRecord], listings: &[ResaleListing]) -> Self {
        let mut disposition_breakdown = BTreeMap::new();
        let mut pending_classification = 0;
        let mut eligible_returns = 0;
        let mut flagged_returns = 0;
        let mut denied_returns = 0;
        let mut total_refunded_amount = 0.0;

        for record in returns {
            let label = match record.effective_disposition() {
                Some(disposition) => disposition.as_str().to_string(),
                None => {
                    pending_classification += 1;
                    PENDING_LABEL.to_string()
                }
            };
            *disposition_breakdown.entry(label).or_insert(0) += 1;

            match record.eligibility_status {
                EligibilityStatus::Eligible => eligible_returns += 1,
                EligibilityStatus::Flagged => flagged_returns += 1,
                EligibilityStatus::Denied => denied_returns += 1,
                EligibilityStatus::Pending => {}
            }

            if record.refund_status == RefundStatus::Processed {
                total_refunded_amount += record.item.estimated_value;
            }
        }

        let mut by_platform: BTreeMap<&'static str, PlatformPerformance> = BTreeMap::new();
        let mut total_recovered_revenue = 0.0;

        for listing in listings {
            let stats = by_platform
                .entry(listing.platform.as_str())
                .or_insert_with(|| PlatformPerformance {
                    platform: listing.platform.as_str().to_string(),
                    listed: 0,
                    sold: 0,
                    revenue: 0.0,
                });
            stats.listed += 1;

            if listing.status == ListingStatus::Sold {
                let sold_price = listing.sold_price.unwrap_or(0.0);
                stats.sold += 1;
                stats.revenue = round_to_cents(stats.revenue + sold_price);
                total_recovered_revenue += sold_price;
            }
        }

        Self {
            total_returns: returns.len() as u32,
            pending_classification,
            eligible_returns,
            flagged_returns,
            denied_returns,
            total_refunded_amount: round_to_cents(total_refunded_amount),
            total_recovered_revenue: round_to_cents(total_recovered_revenue),
            disposition_breakdown,
            platform_performance: by_platform.into_values().collect(),
        }
    }
}
