//! Studio entity model.

use gameshelf_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A studio row from the `studios` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Studio {
    pub id: DbId,
    pub name: String,
    pub country: String,
    pub founded_at: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
