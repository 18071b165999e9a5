// src/services/resale_service.rs
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::resale::{ListingStatus, ResaleListing};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, ResaleListingSold, ResaleListingWithdrawn};
use crate::repositories::ResaleListingRepository;

pub struct ResaleService {
    listing_repo: Arc<dyn ResaleListingRepository>,
    event_bus: Arc<EventBus>,
}

impl ResaleService {
    pub fn new(listing_repo: Arc<dyn ResaleListingRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            listing_repo,
            event_bus,
        }
    }

    pub fn get_listing(&self, listing_id: Uuid) -> AppResult<Option<ResaleListing>> {
        self.listing_repo.get_by_id(listing_id)
    }

    pub fn list_listings(&self) -> AppResult<Vec<ResaleListing>> {
        self.listing_repo.list_all()
    }

    pub fn list_by_status(&self, status: ListingStatus) -> AppResult<Vec<ResaleListing>> {
        self.listing_repo.list_by_status(status)
    }

    pub fn listings_for_return(&self, return_id: Uuid) -> AppResult<Vec<ResaleListing>> {
        self.listing_repo.list_by_return_item(return_id)
    }

    pub fn mark_sold(&self, listing_id: Uuid, sold_price: f64) -> AppResult<ResaleListing> {
        let mut listing = self.load(listing_id)?;
        listing.mark_sold(sold_price)?;
        self.listing_repo.save(&listing)?;

        info!(
            "Listing {} sold on {} for {:.2} (margin {:.2})",
            listing.id,
            listing.platform.display_name(),
            listing.sold_price.unwrap_or_default(),
            listing.profit_margin().unwrap_or_default()
        );

        self.event_bus.emit(ResaleListingSold::new(
            listing.id,
            listing.return_item_id,
            listing.platform,
            listing.sold_price.unwrap_or_default(),
        ));

        Ok(listing)
    }

    pub fn withdraw(&self, listing_id: Uuid) -> AppResult<ResaleListing> {
        let mut listing = self.load(listing_id)?;
        listing.withdraw()?;
        self.listing_repo.save(&listing)?;

        info!("Listing {} withdrawn", listing.id);
        self.event_bus
            .emit(ResaleListingWithdrawn::new(listing.id, listing.return_item_id));

        Ok(listing)
    }

    fn load(&self, listing_id: Uuid) -> AppResult<ResaleListing> {
        self.listing_repo
            .get_by_id(listing_id)?
            .ok_or(AppError::NotFound)
    }
}
