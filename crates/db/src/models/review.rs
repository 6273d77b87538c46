//! Review entity model.

use gameshelf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A review row from the `reviews` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewer: Option<String>,
    pub game_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
