//! Repository for the `reviews` table.

use gameshelf_core::types::DbId;
use gameshelf_core::validation::review::{NewReview, ReviewPatch};
use sqlx::PgPool;

use crate::models::review::Review;

const COLUMNS: &str = "id, rating, comment, reviewer, game_id, created_at, updated_at";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review. An unknown `game_id` fails on the foreign key.
    pub async fn create(pool: &PgPool, input: &NewReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (rating, comment, reviewer, game_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(&input.reviewer)
            .bind(input.game_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews ORDER BY id");
        sqlx::query_as::<_, Review>(&query).fetch_all(pool).await
    }

    /// Reviews belonging to any of `game_ids`, ordered by game then id.
    pub async fn list_by_game_ids(
        pool: &PgPool,
        game_ids: &[DbId],
    ) -> Result<Vec<Review>, sqlx::Error> {
        if game_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE game_id = ANY($1) ORDER BY game_id, id"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(game_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a review. Nullable text fields use `Some(None)` to clear.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ReviewPatch,
    ) -> Result<Option<Review>, sqlx::Error> {
        if input.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE reviews SET
                rating = COALESCE($2, rating),
                comment = CASE WHEN $3 THEN $4 ELSE comment END,
                reviewer = CASE WHEN $5 THEN $6 ELSE reviewer END,
                game_id = COALESCE($7, game_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(input.rating)
            .bind(input.comment.is_some())
            .bind(input.comment.clone().flatten())
            .bind(input.reviewer.is_some())
            .bind(input.reviewer.clone().flatten())
            .bind(input.game_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
