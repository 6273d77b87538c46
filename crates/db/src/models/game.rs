//! Game entity model.

use gameshelf_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::review::Review;
use crate::models::studio::Studio;

/// A game row from the `games` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: DbId,
    pub title: String,
    pub genre: String,
    pub release_date: Date,
    pub platform: String,
    pub studio_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A game with its studio and reviews attached, as returned by reads.
#[derive(Debug, Clone, Serialize)]
pub struct GameWithRelations {
    #[serde(flatten)]
    pub game: Game,
    pub studio: Option<Studio>,
    pub reviews: Vec<Review>,
}
