// src/services/return_service.rs
//
// Return Service
//
// Orchestrates the life of a return: intake, engine decision, reviewer
// override. Composes the decision engine with persistence and events.
//
// CRITICAL RULES:
// - Decisions come from DecisionEngine only; this service never classifies
// - Persist first, emit events after
// - Listings are written before the return row; a failed write leaves the
//   return in its previous state and the call can be retried
// - Statuses are always derived from the effective disposition
// - A return is processed at most once; reviewers change it via override

use log::{info, warn};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::disposition::{
    ClassificationResult, DecisionResult, Disposition, ResalePlatform,
};
use crate::domain::resale::ResaleListing;
use crate::domain::return_item::{
    validate_return_item, validate_return_record, ReturnItem, ReturnItemInput, ReturnRecord,
};
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, ManualOverrideApplied, ResaleListingCreated, ResaleListingWithdrawn,
    ReturnFlaggedForReview, ReturnItemCreated, ReturnItemDeleted, ReturnProcessed,
};
use crate::repositories::{ResaleListingRepository, ReturnRepository};
use crate::services::decision_engine::DecisionEngine;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReturnRequest {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(flatten)]
    pub item: ReturnItemInput,
}

#[derive(Debug, Clone)]
pub struct ManualOverrideRequest {
    pub return_id: Uuid,
    pub disposition: Disposition,
    /// Only meaningful for marketplace resale; the router picks when absent
    pub platform: Option<ResalePlatform>,
    pub note: Option<String>,
}

pub struct ReturnService {
    return_repo: Arc<dyn ReturnRepository>,
    listing_repo: Arc<dyn ResaleListingRepository>,
    engine: DecisionEngine,
    event_bus: Arc<EventBus>,
}

impl ReturnService {
    pub fn new(
        return_repo: Arc<dyn ReturnRepository>,
        listing_repo: Arc<dyn ResaleListingRepository>,
        engine: DecisionEngine,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            return_repo,
            listing_repo,
            engine,
            event_bus,
        }
    }

    pub fn create_return(&self, request: CreateReturnRequest) -> AppResult<Uuid> {
        let item = ReturnItem::try_from(request.item)?;
        validate_return_item(&item)?;

        let record = ReturnRecord::new(item, request.order_id, request.product_id);
        validate_return_record(&record)?;
        self.return_repo.save(&record)?;

        info!("Registered return {} ({})", record.id, record.item.product_name);

        self.event_bus.emit(ReturnItemCreated::new(
            record.id,
            record.item.product_name.clone(),
            record.item.category.to_string(),
        ));

        Ok(record.id)
    }

    pub fn get_return(&self, return_id: Uuid) -> AppResult<Option<ReturnRecord>> {
        self.return_repo.get_by_id(return_id)
    }

    /// Newest first
    pub fn list_returns(&self) -> AppResult<Vec<ReturnRecord>> {
        self.return_repo.list_all()
    }

    /// Removes the return and, through the schema, its listings
    pub fn delete_return(&self, return_id: Uuid) -> AppResult<()> {
        self.return_repo.delete(return_id)?;
        self.event_bus.emit(ReturnItemDeleted::new(return_id));
        Ok(())
    }

    /// Run the decision engine on a stored return and act on the result
    pub fn process_return(&self, return_id: Uuid) -> AppResult<DecisionResult> {
        let mut record = self.load(return_id)?;

        if record.is_processed() {
            return Err(AppError::Domain(DomainError::InvalidStateTransition(format!(
                "Return {} has already been processed; use a manual override instead",
                return_id
            ))));
        }

        let decision = self.engine.decide(&record.item)?;
        record.record_decision(decision.clone());
        validate_return_record(&record)?;

        // A retry after a failed save finds the listing it already wrote
        let platform = decision.resale.as_ref().map(|r| r.platform);
        let (withdrawn, kept) = self.reconcile_listings(&record, platform)?;

        let listing = match &decision.resale {
            Some(resale) if !kept => {
                Some(self.create_listing(&record, resale.platform, resale.listing_price)?)
            }
            _ => None,
        };

        self.return_repo.save(&record)?;

        info!(
            "Processed return {}: {} ({}), eligibility {}",
            record.id,
            decision.disposition(),
            decision.classification.confidence,
            record.eligibility_status
        );

        self.event_bus.emit(ReturnProcessed::new(
            record.id,
            decision.disposition(),
            decision.classification.confidence.score(),
            decision.resale.as_ref().map(|r| r.platform),
        ));

        if decision.disposition() == Disposition::ManualReview {
            warn!("Return {} flagged for manual review", record.id);
            self.event_bus.emit(ReturnFlaggedForReview::new(
                record.id,
                record.item.product_name.clone(),
                decision.classification.rationale.clone(),
            ));
        }

        for listing in &withdrawn {
            self.event_bus
                .emit(ResaleListingWithdrawn::new(listing.id, listing.return_item_id));
        }
        if let Some(listing) = listing {
            self.emit_listing_created(&listing);
        }

        Ok(decision)
    }

    /// Replace the effective disposition with a reviewer's decision.
    ///
    /// Open listings that no longer match the effective disposition are
    /// withdrawn; a marketplace override gets a listing of its own.
    pub fn apply_manual_override(&self, request: ManualOverrideRequest) -> AppResult<ReturnRecord> {
        let mut record = self.load(request.return_id)?;
        let previous = record.effective_disposition();

        let platform = if request.disposition.requires_resale() {
            Some(match request.platform {
                Some(platform) => platform,
                None => self.route_override(&record.item)?,
            })
        } else {
            None
        };

        record.record_override(request.disposition, platform, request.note.clone())?;
        validate_return_record(&record)?;

        let (withdrawn, kept) = self.reconcile_listings(&record, platform)?;

        let created = match platform {
            Some(platform) if !kept => Some(self.create_listing(
                &record,
                platform,
                record.item.estimated_value,
            )?),
            _ => None,
        };

        self.return_repo.save(&record)?;

        info!(
            "Manual override on return {}: {} -> {}",
            record.id,
            previous.map(|d| d.to_string()).unwrap_or_else(|| "none".to_string()),
            request.disposition
        );

        for listing in &withdrawn {
            self.event_bus
                .emit(ResaleListingWithdrawn::new(listing.id, listing.return_item_id));
        }
        if let Some(listing) = &created {
            self.emit_listing_created(listing);
        }

        self.event_bus.emit(ManualOverrideApplied::new(
            record.id,
            record.item.product_name.clone(),
            previous,
            request.disposition,
            platform,
            request.note,
        ));

        Ok(record)
    }

    // ------------------------------------------------------------------------

    fn load(&self, return_id: Uuid) -> AppResult<ReturnRecord> {
        self.return_repo
            .get_by_id(return_id)?
            .ok_or(AppError::NotFound)
    }

    fn route_override(&self, item: &ReturnItem) -> AppResult<ResalePlatform> {
        let classification = ClassificationResult::manual(
            Disposition::MarketplaceResale,
            "Reviewer chose marketplace resale",
        );
        let recommendation = self.engine.router().route(item, &classification)?;
        Ok(recommendation.platform)
    }

    /// Withdraw open listings that don't match `platform`.
    /// Returns the withdrawn listings and whether a matching one stays open.
    fn reconcile_listings(
        &self,
        record: &ReturnRecord,
        platform: Option<ResalePlatform>,
    ) -> AppResult<(Vec<ResaleListing>, bool)> {
        let mut withdrawn = Vec::new();
        let mut kept = false;

        for mut listing in self.listing_repo.list_by_return_item(record.id)? {
            if !listing.is_open() {
                continue;
            }
            if Some(listing.platform) == platform && !kept {
                kept = true;
                continue;
            }
            listing.withdraw()?;
            self.listing_repo.save(&listing)?;
            withdrawn.push(listing);
        }

        Ok((withdrawn, kept))
    }

    fn create_listing(
        &self,
        record: &ReturnRecord,
        platform: ResalePlatform,
        price: f64,
    ) -> AppResult<ResaleListing> {
        let listing = ResaleListing::new(
            record.id,
            record.item.product_name.clone(),
            platform,
            price,
        );
        self.listing_repo.save(&listing)?;
        Ok(listing)
    }

    fn emit_listing_created(&self, listing: &ResaleListing) {
        info!(
            "Listed return {} on {} at {:.2}",
            listing.return_item_id,
            listing.platform.display_name(),
            listing.listing_price
        );
        self.event_bus.emit(ResaleListingCreated::new(
            listing.id,
            listing.return_item_id,
            listing.platform,
            listing.listing_price,
        ));
    }
}
