//! Repository for the `studios` table.

use gameshelf_core::types::DbId;
use gameshelf_core::validation::studio::{NewStudio, StudioPatch};
use sqlx::PgPool;

use crate::models::studio::Studio;

const COLUMNS: &str = "id, name, country, founded_at, created_at, updated_at";

/// Provides CRUD operations for studios.
pub struct StudioRepo;

impl StudioRepo {
    /// Insert a new studio. Duplicate names fail on `uq_studios_name`.
    pub async fn create(pool: &PgPool, input: &NewStudio) -> Result<Studio, sqlx::Error> {
        let query = format!(
            "INSERT INTO studios (name, country, founded_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Studio>(&query)
            .bind(&input.name)
            .bind(&input.country)
            .bind(input.founded_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Studio>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM studios WHERE id = $1");
        sqlx::query_as::<_, Studio>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Studio>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM studios WHERE id = ANY($1)");
        sqlx::query_as::<_, Studio>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Studio>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM studios ORDER BY id");
        sqlx::query_as::<_, Studio>(&query).fetch_all(pool).await
    }

    /// Update a studio. Only `Some` fields are applied; `founded_at: Some(None)` clears it.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &StudioPatch,
    ) -> Result<Option<Studio>, sqlx::Error> {
        if input.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE studios SET
                name = COALESCE($2, name),
                country = COALESCE($3, country),
                founded_at = CASE WHEN $4 THEN $5 ELSE founded_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Studio>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.country)
            .bind(input.founded_at.is_some())
            .bind(input.founded_at.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a studio. Its games keep existing with `studio_id` set to NULL.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM studios WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
