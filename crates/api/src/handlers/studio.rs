//! Handlers for the `/studios` resource.

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use gameshelf_core::error::CoreError;
use gameshelf_core::hateoas::{with_links, ApiVersion};
use gameshelf_core::types::DbId;
use gameshelf_core::validation::studio::{validate_new_studio, validate_studio_patch};
use gameshelf_db::repositories::StudioRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Negotiated;
use crate::handlers::{json_object, link_all, path_id};
use crate::response::Reply;
use crate::state::AppState;

const KIND: &str = "studio";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: KIND, id })
}

/// GET /api/{version}/studios
pub async fn list(State(state): State<AppState>, ctx: Negotiated) -> Response {
    ctx.emit(list_studios(&state, ctx.version).await)
}

async fn list_studios(state: &AppState, version: ApiVersion) -> AppResult<Reply> {
    let studios = StudioRepo::list(&state.pool).await?;
    let data = link_all(&studios, KIND, version, |s| s.id)?;
    Ok(Reply::ok("studios", "studios.list_success", data))
}

/// GET /api/{version}/studios/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: Negotiated,
    id: Result<Path<DbId>, PathRejection>,
) -> Response {
    ctx.emit(get_studio(&state, ctx.version, id).await)
}

async fn get_studio(
    state: &AppState,
    version: ApiVersion,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Reply> {
    let id = path_id(id)?;
    let studio = StudioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Reply::ok(
        "studio",
        "studios.get_success",
        with_links(&studio, KIND, id, version)?,
    ))
}

/// POST /api/{version}/studios
///
/// Studio names are unique; a duplicate yields 409.
pub async fn create(State(state): State<AppState>, ctx: Negotiated, body: Bytes) -> Response {
    ctx.emit(create_studio(&state, ctx.version, &body).await)
}

async fn create_studio(state: &AppState, version: ApiVersion, body: &[u8]) -> AppResult<Reply> {
    let payload = json_object(body)?;
    let input = validate_new_studio(&payload).map_err(CoreError::Validation)?;

    let studio = StudioRepo::create(&state.pool, &input).await?;
    tracing::info!(studio_id = studio.id, name = %studio.name, "Studio created");

    Ok(Reply::created(
        "studio",
        "studios.create_success",
        with_links(&studio, KIND, studio.id, version)?,
    ))
}

/// PATCH /api/{version}/studios/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: Negotiated,
    id: Result<Path<DbId>, PathRejection>,
    body: Bytes,
) -> Response {
    ctx.emit(update_studio(&state, ctx.version, id, &body).await)
}

async fn update_studio(
    state: &AppState,
    version: ApiVersion,
    id: Result<Path<DbId>, PathRejection>,
    body: &[u8],
) -> AppResult<Reply> {
    let id = path_id(id)?;
    let payload = json_object(body)?;
    let patch = validate_studio_patch(&payload).map_err(CoreError::Validation)?;

    let studio = StudioRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(studio_id = id, "Studio updated");

    Ok(Reply::ok(
        "studio",
        "studios.update_success",
        with_links(&studio, KIND, id, version)?,
    ))
}

/// DELETE /api/{version}/studios/{id}
///
/// Games of the studio remain, with their studio cleared.
pub async fn delete(
    State(state): State<AppState>,
    ctx: Negotiated,
    id: Result<Path<DbId>, PathRejection>,
) -> Response {
    ctx.emit(delete_studio(&state, id).await)
}

async fn delete_studio(state: &AppState, id: Result<Path<DbId>, PathRejection>) -> AppResult<Reply> {
    let id = path_id(id)?;
    if !StudioRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(studio_id = id, "Studio deleted");
    Ok(Reply::NoContent)
}
