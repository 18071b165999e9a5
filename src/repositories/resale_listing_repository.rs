// src/repositories/resale_listing_repository.rs
//
// Resale listing persistence

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use super::mapping::{parse_label, parse_optional_timestamp, parse_timestamp, parse_uuid};
use crate::db::ConnectionPool;
use crate::domain::resale::{ListingStatus, ResaleListing};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ResaleListingRepository: Send + Sync {
    fn save(&self, listing: &ResaleListing) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<ResaleListing>>;
    /// Newest first
    fn list_all(&self) -> AppResult<Vec<ResaleListing>>;
    fn list_by_return_item(&self, return_item_id: Uuid) -> AppResult<Vec<ResaleListing>>;
    fn list_by_status(&self, status: ListingStatus) -> AppResult<Vec<ResaleListing>>;
}

const SELECT_COLUMNS: &str = "SELECT id, return_item_id, product_name, platform, listing_price,
        status, sold_price, sold_at, listed_at, updated_at
     FROM resale_listings";

pub struct SqliteResaleListingRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteResaleListingRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_listing(row: &Row) -> Result<ResaleListing, rusqlite::Error> {
        let id: String = row.get("id")?;
        let return_item_id: String = row.get("return_item_id")?;
        let platform: String = row.get("platform")?;
        let status: String = row.get("status")?;
        let listed_at: String = row.get("listed_at")?;
        let updated_at: String = row.get("updated_at")?;

        Ok(ResaleListing {
            id: parse_uuid(&id)?,
            return_item_id: parse_uuid(&return_item_id)?,
            product_name: row.get("product_name")?,
            platform: parse_label(&platform)?,
            listing_price: row.get("listing_price")?,
            status: parse_label(&status)?,
            sold_price: row.get("sold_price")?,
            sold_at: parse_optional_timestamp(row.get("sold_at")?)?,
            listed_at: parse_timestamp(&listed_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn query(&self, filter: &str, value: Option<String>) -> AppResult<Vec<ResaleListing>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "{} {} ORDER BY listed_at DESC, id",
            SELECT_COLUMNS, filter
        ))?;

        let listings = match value {
            Some(value) => stmt.query_map(params![value], Self::row_to_listing)?,
            None => stmt.query_map([], Self::row_to_listing)?,
        }
        .collect::<Result<Vec<_>, _>>()?;

        Ok(listings)
    }
}

impl ResaleListingRepository for SqliteResaleListingRepository {
    fn save(&self, listing: &ResaleListing) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO resale_listings (
                id, return_item_id, product_name, platform, listing_price,
                status, sold_price, sold_at, listed_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(id) DO UPDATE SET
                product_name = excluded.product_name,
                platform = excluded.platform,
                listing_price = excluded.listing_price,
                status = excluded.status,
                sold_price = excluded.sold_price,
                sold_at = excluded.sold_at,
                updated_at = excluded.updated_at",
            params![
                listing.id.to_string(),
                listing.return_item_id.to_string(),
                listing.product_name,
                listing.platform.as_str(),
                listing.listing_price,
                listing.status.to_string(),
                listing.sold_price,
                listing.sold_at.map(|dt| dt.to_rfc3339()),
                listing.listed_at.to_rfc3339(),
                listing.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<ResaleListing>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_listing) {
            Ok(listing) => Ok(Some(listing)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<ResaleListing>> {
        self.query("", None)
    }

    fn list_by_return_item(&self, return_item_id: Uuid) -> AppResult<Vec<ResaleListing>> {
        self.query("WHERE return_item_id = ?1", Some(return_item_id.to_string()))
    }

    fn list_by_status(&self, status: ListingStatus) -> AppResult<Vec<ResaleListing>> {
        self.query("WHERE status = ?1", Some(status.to_string()))
    }
}
