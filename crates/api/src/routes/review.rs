use axum::routing::get;
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Review CRUD, same shape as games and studios.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(review::list).post(review::create))
        .route(
            "/{id}",
            get(review::get_by_id).patch(review::update).delete(review::delete),
        )
}
