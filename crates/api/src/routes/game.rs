//! Route definitions for the `/games` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::game;
use crate::state::AppState;

/// Routes mounted at `/games`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(game::list).post(game::create))
        .route(
            "/{id}",
            get(game::get_by_id).patch(game::update).delete(game::delete),
        )
}
