pub mod fallback;
pub mod game;
pub mod review;
pub mod studio;

use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use gameshelf_core::hateoas::{with_links, ApiVersion};
use gameshelf_core::types::DbId;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Unwrap a `/{id}` path parameter, mapping non-integers to a 400.
pub(crate) fn path_id(id: Result<Path<DbId>, PathRejection>) -> AppResult<DbId> {
    id.map(|Path(id)| id)
        .map_err(|rejection| AppError::InvalidId(rejection.body_text()))
}

/// Parse a request body as a JSON object. An empty body reads as `{}`.
pub(crate) fn json_object(body: &[u8]) -> AppResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::InvalidBody("expected a JSON object".into())),
        Err(e) => Err(AppError::InvalidBody(e.to_string())),
    }
}

/// Attach links to every resource of a list, keyed by `id_of`.
pub(crate) fn link_all<T: Serialize>(
    resources: &[T],
    kind: &str,
    version: ApiVersion,
    id_of: impl Fn(&T) -> DbId,
) -> AppResult<Value> {
    let linked = resources
        .iter()
        .map(|resource| with_links(resource, kind, id_of(resource), version))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Array(linked))
}
