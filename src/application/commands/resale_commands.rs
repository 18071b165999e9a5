// src/application/commands/resale_commands.rs
//
// Resale Listing Command Handlers

use crate::application::{dto::ListingDto, error_handling::ErrorResponse, state::AppState};
use crate::domain::ListingStatus;

use super::{parse_id, CommandResult};

/// All listings, or only those in `status` when given
pub fn list_listings(state: &AppState, status: Option<&str>) -> CommandResult<Vec<ListingDto>> {
    let listings = match status {
        Some(label) => {
            let status: ListingStatus = label.trim().to_lowercase().parse()?;
            state.resale_service.list_by_status(status)?
        }
        None => state.resale_service.list_listings()?,
    };

    Ok(listings.into_iter().map(ListingDto::from).collect())
}

pub fn listings_for_return(state: &AppState, return_id: &str) -> CommandResult<Vec<ListingDto>> {
    let id = parse_id(return_id, "return")?;
    let listings = state.resale_service.listings_for_return(id)?;
    Ok(listings.into_iter().map(ListingDto::from).collect())
}

pub fn get_listing(state: &AppState, listing_id: &str) -> CommandResult<ListingDto> {
    let id = parse_id(listing_id, "listing")?;
    state
        .resale_service
        .get_listing(id)?
        .map(ListingDto::from)
        .ok_or_else(|| ErrorResponse::not_found("Listing"))
}

pub fn sell_listing(state: &AppState, listing_id: &str, sold_price: f64) -> CommandResult<ListingDto> {
    let id = parse_id(listing_id, "listing")?;
    let listing = state.resale_service.mark_sold(id, sold_price)?;
    Ok(ListingDto::from(listing))
}

pub fn withdraw_listing(state: &AppState, listing_id: &str) -> CommandResult<ListingDto> {
    let id = parse_id(listing_id, "listing")?;
    let listing = state.resale_service.withdraw(id)?;
    Ok(ListingDto::from(listing))
}
