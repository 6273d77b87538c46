//! Repository for the `games` table.

use std::collections::HashMap;

use gameshelf_core::types::DbId;
use gameshelf_core::validation::game::{GamePatch, NewGame};
use sqlx::PgPool;

use crate::models::game::{Game, GameWithRelations};
use crate::repositories::{ReviewRepo, StudioRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, genre, release_date, platform, studio_id, created_at, updated_at";

/// Provides CRUD operations for games.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewGame) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games (title, genre, release_date, platform, studio_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(&input.title)
            .bind(&input.genre)
            .bind(input.release_date)
            .bind(input.platform.as_str())
            .bind(input.studio_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all games in id order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games ORDER BY id");
        sqlx::query_as::<_, Game>(&query).fetch_all(pool).await
    }

    /// Update a game. Only `Some` fields in `input` are applied; an explicit
    /// `studio_id: Some(None)` clears the studio.
    ///
    /// Returns `None` if no row with the given `id` exists. An empty patch
    /// leaves the row (and `updated_at`) untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &GamePatch,
    ) -> Result<Option<Game>, sqlx::Error> {
        if input.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE games SET
                title = COALESCE($2, title),
                genre = COALESCE($3, genre),
                release_date = COALESCE($4, release_date),
                platform = COALESCE($5, platform),
                studio_id = CASE WHEN $6 THEN $7 ELSE studio_id END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.genre)
            .bind(input.release_date)
            .bind(input.platform.map(|p| p.as_str()))
            .bind(input.studio_id.is_some())
            .bind(input.studio_id.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a game and, by cascade, its reviews. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Attach each game's studio and reviews using two batched queries.
    pub async fn attach_relations(
        pool: &PgPool,
        games: Vec<Game>,
    ) -> Result<Vec<GameWithRelations>, sqlx::Error> {
        let game_ids: Vec<DbId> = games.iter().map(|g| g.id).collect();
        let studio_ids: Vec<DbId> = games.iter().filter_map(|g| g.studio_id).collect();

        let studios: HashMap<DbId, _> = StudioRepo::find_by_ids(pool, &studio_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut reviews: HashMap<DbId, Vec<_>> = HashMap::new();
        for review in ReviewRepo::list_by_game_ids(pool, &game_ids).await? {
            reviews.entry(review.game_id).or_default().push(review);
        }

        Ok(games
            .into_iter()
            .map(|game| GameWithRelations {
                studio: game.studio_id.and_then(|sid| studios.get(&sid).cloned()),
                reviews: reviews.remove(&game.id).unwrap_or_default(),
                game,
            })
            .collect())
    }
}
