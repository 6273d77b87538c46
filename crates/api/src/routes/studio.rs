//! Route definitions for the `/studios` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::studio;
use crate::state::AppState;

/// Routes mounted at `/studios`.
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
        .route("/", get(studio::list).post(studio::create))
        .route(
            "/{id}",
            get(studio::get_by_id).patch(studio::update).delete(studio::delete),
        )
}
