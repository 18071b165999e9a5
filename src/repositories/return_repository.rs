// src/repositories/return_repository.rs
//
// Return persistence
//
// One row per return. The engine decision and the reviewer override are
// flattened into nullable columns of the same row.

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use super::mapping::{
    parse_label, parse_optional_label, parse_optional_timestamp, parse_timestamp, parse_uuid,
};
use crate::db::ConnectionPool;
use crate::domain::disposition::{
    ClassificationResult, DecisionResult, DispositionConfidence, ResaleRecommendation,
};
use crate::domain::return_item::{
    ItemCategory, ManualOverride, ReturnItem, ReturnReason, ReturnRecord,
};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ReturnRepository: Send + Sync {
    fn save(&self, record: &ReturnRecord) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<ReturnRecord>>;
    /// Newest first
    fn list_all(&self) -> AppResult<Vec<ReturnRecord>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

const SELECT_COLUMNS: &str = "SELECT id, order_id, product_id,
        product_name, category, return_reason, item_condition, notes, estimated_value,
        eligibility_status, refund_status,
        disposition, confidence, rationale, resale_platform, listing_price, resale_rationale,
        override_disposition, override_platform, override_note, overridden_at,
        created_at, updated_at
     FROM return_items";

pub struct SqliteReturnRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteReturnRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to ReturnRecord - returns rusqlite::Error for query_map compatibility
    fn row_to_record(row: &Row) -> Result<ReturnRecord, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let category: String = row.get("category")?;
        let return_reason: String = row.get("return_reason")?;
        let condition: String = row.get("item_condition")?;

        let item = ReturnItem {
            product_name: row.get("product_name")?,
            category: ItemCategory::from_label(&category),
            return_reason: ReturnReason::from_label(&return_reason),
            condition: parse_label(&condition)?,
            notes: row.get("notes")?,
            estimated_value: row.get("estimated_value")?,
        };

        let eligibility: String = row.get("eligibility_status")?;
        let refund: String = row.get("refund_status")?;
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;

        Ok(ReturnRecord {
            id: parse_uuid(&id_str)?,
            order_id: row.get("order_id")?,
            product_id: row.get("product_id")?,
            item,
            eligibility_status: parse_label(&eligibility)?,
            refund_status: parse_label(&refund)?,
            decision: Self::row_to_decision(row)?,
            manual_override: Self::row_to_override(row)?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn row_to_decision(row: &Row) -> Result<Option<DecisionResult>, rusqlite::Error> {
        let disposition: Option<String> = row.get("disposition")?;
        let Some(disposition) = disposition else {
            return Ok(None);
        };

        let confidence: f64 = row.get("confidence")?;
        let classification = ClassificationResult {
            disposition: parse_label(&disposition)?,
            confidence: DispositionConfidence::new(confidence),
            rationale: row.get::<_, Option<String>>("rationale")?.unwrap_or_default(),
        };

        let platform: Option<String> = row.get("resale_platform")?;
        let resale = match platform {
            Some(platform) => Some(ResaleRecommendation {
                platform: parse_label(&platform)?,
                listing_price: row.get::<_, Option<f64>>("listing_price")?.unwrap_or_default(),
                rationale: row
                    .get::<_, Option<String>>("resale_rationale")?
                    .unwrap_or_default(),
            }),
            None => None,
        };

        Ok(Some(DecisionResult {
            classification,
            resale,
        }))
    }

    fn row_to_override(row: &Row) -> Result<Option<ManualOverride>, rusqlite::Error> {
        let disposition: Option<String> = row.get("override_disposition")?;
        let Some(disposition) = disposition else {
            return Ok(None);
        };

        let overridden_at: Option<String> = row.get("overridden_at")?;
        let updated_at: String = row.get("updated_at")?;
        let overridden_at = match parse_optional_timestamp(overridden_at)? {
            Some(at) => at,
            None => parse_timestamp(&updated_at)?,
        };

        Ok(Some(ManualOverride {
            disposition: parse_label(&disposition)?,
            platform: parse_optional_label(row.get("override_platform")?)?,
            note: row.get("override_note")?,
            overridden_at,
        }))
    }
}

impl ReturnRepository for SqliteReturnRepository {
    fn save(&self, record: &ReturnRecord) -> AppResult<()> {
        let conn = self.pool.get()?;

        let classification = record.decision.as_ref().map(|d| &d.classification);
        let resale = record.decision.as_ref().and_then(|d| d.resale.as_ref());
        let manual = record.manual_override.as_ref();

        conn.execute(
            "INSERT INTO return_items (
                id, order_id, product_id,
                product_name, category, return_reason, item_condition, notes, estimated_value,
                eligibility_status, refund_status,
                disposition, confidence, rationale, resale_platform, listing_price, resale_rationale,
                override_disposition, override_platform, override_note, overridden_at,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                      ?17, ?18, ?19, ?20, ?21, ?22, ?23)
            ON CONFLICT(id) DO UPDATE SET
                order_id = excluded.order_id,
                product_id = excluded.product_id,
                product_name = excluded.product_name,
                category = excluded.category,
                return_reason = excluded.return_reason,
                item_condition = excluded.item_condition,
                notes = excluded.notes,
                estimated_value = excluded.estimated_value,
                eligibility_status = excluded.eligibility_status,
                refund_status = excluded.refund_status,
                disposition = excluded.disposition,
                confidence = excluded.confidence,
                rationale = excluded.rationale,
                resale_platform = excluded.resale_platform,
                listing_price = excluded.listing_price,
                resale_rationale = excluded.resale_rationale,
                override_disposition = excluded.override_disposition,
                override_platform = excluded.override_platform,
                override_note = excluded.override_note,
                overridden_at = excluded.overridden_at,
                updated_at = excluded.updated_at",
            params![
                record.id.to_string(),
                record.order_id,
                record.product_id,
                record.item.product_name,
                record.item.category.label(),
                record.item.return_reason.label(),
                record.item.condition.as_str(),
                record.item.notes,
                record.item.estimated_value,
                record.eligibility_status.to_string(),
                record.refund_status.to_string(),
                classification.map(|c| c.disposition.as_str()),
                classification.map(|c| c.confidence.score()),
                classification.map(|c| c.rationale.as_str()),
                resale.map(|r| r.platform.as_str()),
                resale.map(|r| r.listing_price),
                resale.map(|r| r.rationale.as_str()),
                manual.map(|m| m.disposition.as_str()),
                manual.and_then(|m| m.platform).map(|p| p.as_str()),
                manual.and_then(|m| m.note.as_deref()),
                manual.map(|m| m.overridden_at.to_rfc3339()),
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<ReturnRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_record) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<ReturnRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY created_at DESC, id",
            SELECT_COLUMNS
        ))?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM return_items WHERE id = ?1",
            params![id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
