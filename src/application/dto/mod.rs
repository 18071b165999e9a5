// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are caller-friendly representations (camelCase JSON)
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only; inbound data uses the domain's
//   own raw input types (`ReturnItemInput`, `CreateReturnRequest`)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::analytics::{PlatformPerformance, ReturnsAnalytics};
use crate::domain::disposition::{DecisionResult, ResaleRecommendation};
use crate::domain::resale::ResaleListing;
use crate::domain::return_item::{ManualOverride, ReturnRecord};

// ============================================================================
// DECISION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResaleDto {
    pub platform: String,
    pub platform_name: String,
    pub listing_price: f64,
    pub rationale: String,
}

impl From<&ResaleRecommendation> for ResaleDto {
    fn from(resale: &ResaleRecommendation) -> Self {
        Self {
            platform: resale.platform.as_str().to_string(),
            platform_name: resale.platform.display_name().to_string(),
            listing_price: resale.listing_price,
            rationale: resale.rationale.clone(),
        }
    }
}

/// Engine output as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDto {
    pub disposition: String,
    pub confidence: f64,
    pub rationale: String,
    pub resale: Option<ResaleDto>,
}

impl From<&DecisionResult> for DecisionDto {
    fn from(decision: &DecisionResult) -> Self {
        Self {
            disposition: decision.disposition().as_str().to_string(),
            confidence: decision.classification.confidence.score(),
            rationale: decision.classification.rationale.clone(),
            resale: decision.resale.as_ref().map(ResaleDto::from),
        }
    }
}

impl From<DecisionResult> for DecisionDto {
    fn from(decision: DecisionResult) -> Self {
        Self::from(&decision)
    }
}

// ============================================================================
// RETURN DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideDto {
    pub disposition: String,
    pub platform: Option<String>,
    pub note: Option<String>,
    pub overridden_at: String,
}

impl From<&ManualOverride> for OverrideDto {
    fn from(manual: &ManualOverride) -> Self {
        Self {
            disposition: manual.disposition.as_str().to_string(),
            platform: manual.platform.map(|p| p.as_str().to_string()),
            note: manual.note.clone(),
            overridden_at: manual.overridden_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnDto {
    pub id: String,
    pub order_id: Option<String>,
    pub product_id: Option<String>,
    pub product_name: String,
    pub category: String,
    pub return_reason: String,
    pub condition: String,
    pub notes: Option<String>,
    pub estimated_value: f64,
    pub eligibility_status: String,
    pub refund_status: String,
    /// Override if present, else the engine's disposition
    pub effective_disposition: Option<String>,
    pub decision: Option<DecisionDto>,
    pub manual_override: Option<OverrideDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReturnRecord> for ReturnDto {
    fn from(record: ReturnRecord) -> Self {
        Self {
            id: record.id.to_string(),
            effective_disposition: record
                .effective_disposition()
                .map(|d| d.as_str().to_string()),
            decision: record.decision.as_ref().map(DecisionDto::from),
            manual_override: record.manual_override.as_ref().map(OverrideDto::from),
            order_id: record.order_id,
            product_id: record.product_id,
            category: record.item.category.to_string(),
            return_reason: record.item.return_reason.to_string(),
            condition: record.item.condition.to_string(),
            product_name: record.item.product_name,
            notes: record.item.notes,
            estimated_value: record.item.estimated_value,
            eligibility_status: record.eligibility_status.to_string(),
            refund_status: record.refund_status.to_string(),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// LISTING DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDto {
    pub id: String,
    pub return_item_id: String,
    pub product_name: String,
    pub platform: String,
    pub listing_price: f64,
    pub status: String,
    pub sold_price: Option<f64>,
    pub profit_margin: Option<f64>,
    pub sold_at: Option<String>,
    pub listed_at: String,
}

impl From<ResaleListing> for ListingDto {
    fn from(listing: ResaleListing) -> Self {
        Self {
            id: listing.id.to_string(),
            return_item_id: listing.return_item_id.to_string(),
            profit_margin: listing.profit_margin(),
            product_name: listing.product_name,
            platform: listing.platform.as_str().to_string(),
            listing_price: listing.listing_price,
            status: listing.status.to_string(),
            sold_price: listing.sold_price,
            sold_at: listing.sold_at.map(|dt| dt.to_rfc3339()),
            listed_at: listing.listed_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// ANALYTICS DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPerformanceDto {
    pub platform: String,
    pub listed: u32,
    pub sold: u32,
    pub revenue: f64,
}

impl From<PlatformPerformance> for PlatformPerformanceDto {
    fn from(p: PlatformPerformance) -> Self {
        Self {
            platform: p.platform,
            listed: p.listed,
            sold: p.sold,
            revenue: p.revenue,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub total_returns: u32,
    pub pending_classification: u32,
    pub eligible_returns: u32,
    pub flagged_returns: u32,
    pub denied_returns: u32,
    pub total_refunded_amount: f64,
    pub total_recovered_revenue: f64,
    pub disposition_breakdown: BTreeMap<String, u32>,
    pub platform_performance: Vec<PlatformPerformanceDto>,
}

impl From<ReturnsAnalytics> for AnalyticsDto {
    fn from(a: ReturnsAnalytics) -> Self {
        Self {
            total_returns: a.total_returns,
            pending_classification: a.pending_classification,
            eligible_returns: a.eligible_returns,
            flagged_returns: a.flagged_returns,
            denied_returns: a.denied_returns,
            total_refunded_amount: a.total_refunded_amount,
            total_recovered_revenue: a.total_recovered_revenue,
            disposition_breakdown: a.disposition_breakdown,
            platform_performance: a
                .platform_performance
                .into_iter()
                .map(PlatformPerformanceDto::from)
                .collect(),
        }
    }
}
