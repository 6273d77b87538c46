//! Handler for requests that match no route.

use axum::extract::OriginalUri;
use axum::response::Response;

use crate::error::AppError;
use crate::extract::Negotiated;

/// Any unmatched path: 404 error envelope naming the path.
///
/// `OriginalUri` keeps the version prefix when the miss happens inside a nest.
pub async fn route_not_found(ctx: Negotiated, OriginalUri(uri): OriginalUri) -> Response {
    ctx.emit(Err(AppError::RouteNotFound(uri.path().to_string())))
}
