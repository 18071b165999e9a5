use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::disposition::{round_to_cents, ResalePlatform};
use crate::domain::{DomainError, DomainResult};

/// A returned item put up for sale on a third-party marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResaleListing {
    pub id: Uuid,

    /// The return this listing was created from (REQUIRED)
    pub return_item_id: Uuid,

    pub product_name: String,
    pub platform: ResalePlatform,
    pub listing_price: f64,
    pub status: ListingStatus,

    pub sold_price: Option<f64>,
    pub sold_at: Option<DateTime<Utc>>,

    pub listed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Pending,
    Listed,
    Sold,
    Withdrawn,
}

impl ResaleListing {
    /// New listings go live immediately
    pub fn new(
        return_item_id: Uuid,
        product_name: String,
        platform: ResalePlatform,
        listing_price: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            return_item_id,
            product_name,
            platform,
            listing_price: round_to_cents(listing_price),
            status: ListingStatus::Listed,
            sold_price: None,
            sold_at: None,
            listed_at: now,
            updated_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, ListingStatus::Pending | ListingStatus::Listed)
    }

    pub fn mark_sold(&mut self, sold_price: f64) -> DomainResult<()> {
        if !self.is_open() {
            return Err(DomainError::InvalidStateTransition(format!(
                "Listing {} is {} and cannot be sold",
                self.id, self.status
            )));
        }
        if !sold_price.is_finite() || sold_price < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Sold price must be a non-negative amount, got {}",
                sold_price
            )));
        }

        let now = Utc::now();
        self.status = ListingStatus::Sold;
        self.sold_price = Some(round_to_cents(sold_price));
        self.sold_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn withdraw(&mut self) -> DomainResult<()> {
        if !self.is_open() {
            return Err(DomainError::InvalidStateTransition(format!(
                "Listing {} is {} and cannot be withdrawn",
                self.id, self.status
            )));
        }
        self.status = ListingStatus::Withdrawn;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Sold price minus asking price; `None` until sold
    pub fn profit_margin(&self) -> Option<f64> {
        self.sold_price
            .map(|sold| round_to_cents(sold - self.listing_price))
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Pending => write!(f, "pending"),
            ListingStatus::Listed => write!(f, "listed"),
            ListingStatus::Sold => write!(f, "sold"),
            ListingStatus::Withdrawn => write!(f, "withdrawn"),
        }
    }
}

impl FromStr for ListingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ListingStatus::Pending),
            "listed" => Ok(ListingStatus::Listed),
            "sold" => Ok(ListingStatus::Sold),
            "withdrawn" => Ok(ListingStatus::Withdrawn),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown listing status '{}'",
                other
            ))),
        }
    }
}
