pub mod game;
pub mod health;
pub mod review;
pub mod studio;

use axum::Router;

use crate::state::AppState;

/// Build the resource routes mounted under each `/api/{version}` prefix.
///
/// ```text
/// /games     game CRUD (list, get, create, partial update, delete)
/// /studios   studio CRUD
/// /reviews   review CRUD
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/games", game::router())
        .nest("/studios", studio::router())
        .nest("/reviews", review::router())
}
