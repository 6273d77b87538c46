//! Handlers for the `/games` resource.
//!
//! Every handler shapes its response through [`Negotiated::emit`]; the API
//! version only affects the links attached to each game.

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use gameshelf_core::error::CoreError;
use gameshelf_core::hateoas::{with_links, ApiVersion};
use gameshelf_core::types::DbId;
use gameshelf_core::validation::game::{validate_game_patch, validate_new_game};
use gameshelf_db::repositories::GameRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Negotiated;
use crate::handlers::{json_object, link_all, path_id};
use crate::response::Reply;
use crate::state::AppState;

const KIND: &str = "game";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: KIND, id })
}

/// GET /api/{version}/games
pub async fn list(State(state): State<AppState>, ctx: Negotiated) -> Response {
    ctx.emit(list_games(&state, ctx.version).await)
}

async fn list_games(state: &AppState, version: ApiVersion) -> AppResult<Reply> {
    let games = GameRepo::list(&state.pool).await?;
    let games = GameRepo::attach_relations(&state.pool, games).await?;
    let data = link_all(&games, KIND, version, |g| g.game.id)?;
    Ok(Reply::ok("games", "games.list_success", data))
}

/// GET /api/{version}/games/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: Negotiated,
    id: Result<Path<DbId>, PathRejection>,
) -> Response {
    ctx.emit(get_game(&state, ctx.version, id).await)
}

async fn get_game(
    state: &AppState,
    version: ApiVersion,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Reply> {
    let id = path_id(id)?;
    let game = GameRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let game = GameRepo::attach_relations(&state.pool, vec![game])
        .await?
        .pop()
        .ok_or_else(|| not_found(id))?;

    let data = with_links(&game, KIND, id, version)?;
    Ok(Reply::ok("game", "games.get_success", data))
}

/// POST /api/{version}/games
pub async fn create(State(state): State<AppState>, ctx: Negotiated, body: Bytes) -> Response {
    ctx.emit(create_game(&state, ctx.version, &body).await)
}

async fn create_game(state: &AppState, version: ApiVersion, body: &[u8]) -> AppResult<Reply> {
    let payload = json_object(body)?;
    let input = validate_new_game(&payload).map_err(CoreError::Validation)?;

    let game = GameRepo::create(&state.pool, &input).await?;
    tracing::info!(game_id = game.id, title = %game.title, "Game created");

    let data = with_links(&game, KIND, game.id, version)?;
    Ok(Reply::created("game", "games.create_success", data))
}

/// PATCH /api/{version}/games/{id}
///
/// Only fields present in the body are changed.
pub async fn update(
    State(state): State<AppState>,
    ctx: Negotiated,
    id: Result<Path<DbId>, PathRejection>,
    body: Bytes,
) -> Response {
    ctx.emit(update_game(&state, ctx.version, id, &body).await)
}

async fn update_game(
    state: &AppState,
    version: ApiVersion,
    id: Result<Path<DbId>, PathRejection>,
    body: &[u8],
) -> AppResult<Reply> {
    let id = path_id(id)?;
    let payload = json_object(body)?;
    let patch = validate_game_patch(&payload).map_err(CoreError::Validation)?;

    let game = GameRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(game_id = id, "Game updated");

    let data = with_links(&game, KIND, id, version)?;
    Ok(Reply::ok("game", "games.update_success", data))
}

/// DELETE /api/{version}/games/{id}
///
/// Reviews of the game are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    ctx: Negotiated,
    id: Result<Path<DbId>, PathRejection>,
) -> Response {
    ctx.emit(delete_game(&state, id).await)
}

async fn delete_game(state: &AppState, id: Result<Path<DbId>, PathRejection>) -> AppResult<Reply> {
    let id = path_id(id)?;
    if !GameRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(game_id = id, "Game deleted");
    Ok(Reply::NoContent)
}
