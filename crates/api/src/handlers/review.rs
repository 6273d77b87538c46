//! Handlers for the `/reviews` resource.

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use gameshelf_core::error::CoreError;
use gameshelf_core::hateoas::{with_links, ApiVersion};
use gameshelf_core::types::DbId;
use gameshelf_core::validation::review::{validate_new_review, validate_review_patch};
use gameshelf_db::repositories::ReviewRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Negotiated;
use crate::handlers::{json_object, link_all, path_id};
use crate::response::Reply;
use crate::state::AppState;

const KIND: &str = "review";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: KIND, id })
}

/// GET /api/{version}/reviews
pub async fn list(State(state): State<AppState>, ctx: Negotiated) -> Response {
    ctx.emit(list_reviews(&state, ctx.version).await)
}

async fn list_reviews(state: &AppState, version: ApiVersion) -> AppResult<Reply> {
    let reviews = ReviewRepo::list(&state.pool).await?;
    let data = link_all(&reviews, KIND, version, |r| r.id)?;
    Ok(Reply::ok("reviews", "reviews.list_success", data))
}

/// GET /api/{version}/reviews/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: Negotiated,
    id: Result<Path<DbId>, PathRejection>,
) -> Response {
    ctx.emit(get_review(&state, ctx.version, id).await)
}

async fn get_review(
    state: &AppState,
    version: ApiVersion,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Reply> {
    let id = path_id(id)?;
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Reply::ok(
        "review",
        "reviews.get_success",
        with_links(&review, KIND, id, version)?,
    ))
}

/// POST /api/{version}/reviews
///
/// An unknown `gameId` is rejected by the foreign key and surfaces as 400.
pub async fn create(State(state): State<AppState>, ctx: Negotiated, body: Bytes) -> Response {
    ctx.emit(create_review(&state, ctx.version, &body).await)
}

async fn create_review(state: &AppState, version: ApiVersion, body: &[u8]) -> AppResult<Reply> {
    let payload = json_object(body)?;
    let input = validate_new_review(&payload).map_err(CoreError::Validation)?;

    let review = ReviewRepo::create(&state.pool, &input).await?;
    tracing::info!(review_id = review.id, game_id = review.game_id, "Review created");

    Ok(Reply::created(
        "review",
        "reviews.create_success",
        with_links(&review, KIND, review.id, version)?,
    ))
}

/// PATCH /api/{version}/reviews/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: Negotiated,
    id: Result<Path<DbId>, PathRejection>,
    body: Bytes,
) -> Response {
    ctx.emit(update_review(&state, ctx.version, id, &body).await)
}

async fn update_review(
    state: &AppState,
    version: ApiVersion,
    id: Result<Path<DbId>, PathRejection>,
    body: &[u8],
) -> AppResult<Reply> {
    let id = path_id(id)?;
    let payload = json_object(body)?;
    let patch = validate_review_patch(&payload).map_err(CoreError::Validation)?;

    let review = ReviewRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(review_id = id, "Review updated");

    Ok(Reply::ok(
        "review",
        "reviews.update_success",
        with_links(&review, KIND, id, version)?,
    ))
}

/// DELETE /api/{version}/reviews/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: Negotiated,
    id: Result<Path<DbId>, PathRejection>,
) -> Response {
    ctx.emit(delete_review(&state, id).await)
}

async fn delete_review(state: &AppState, id: Result<Path<DbId>, PathRejection>) -> AppResult<Reply> {
    let id = path_id(id)?;
    if !ReviewRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(review_id = id, "Review deleted");
    Ok(Reply::NoContent)
}
