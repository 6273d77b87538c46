//! Per-request negotiation extractor.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::{ACCEPT, ACCEPT_LANGUAGE};
use axum::http::request::Parts;
use axum::http::HeaderName;
use gameshelf_core::hateoas::ApiVersion;
use gameshelf_core::i18n::{Locale, Translate};
use gameshelf_core::negotiation::{self, Format};
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters that steer response shaping (`?format=&lng=`).
#[derive(Debug, Default, Deserialize)]
pub struct NegotiationParams {
    pub format: Option<String>,
    pub lng: Option<String>,
}

/// Everything a handler needs to shape its response: wire format, locale,
/// API version and the translator.
///
/// The version comes from the `ApiVersion` extension installed on each
/// versioned nest by [`crate::router::build_app_router`]; routes outside a
/// version (health, fallback) see the default.
///
/// ```ignore
/// async fn handler(ctx: Negotiated) -> Response {
///     ctx.emit(Ok(Reply::NoContent))
/// }
/// ```
#[derive(Clone)]
pub struct Negotiated {
    pub format: Format,
    pub locale: Locale,
    pub version: ApiVersion,
    pub(crate) translator: Arc<dyn Translate>,
}

impl Negotiated {
    pub fn translate(&self, code: &str) -> String {
        self.translator.translate(self.locale, code)
    }
}

impl FromRequestParts<AppState> for Negotiated {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Malformed query strings negotiate as if no parameters were given.
        let params = Query::<NegotiationParams>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();

        let header = |name: HeaderName| parts.headers.get(name).and_then(|v| v.to_str().ok());

        let format = negotiation::negotiate(params.format.as_deref(), header(ACCEPT));
        let locale = Locale::negotiate(
            params.lng.as_deref(),
            header(ACCEPT_LANGUAGE),
            state.config.default_locale,
        );
        let version = parts
            .extensions
            .get::<ApiVersion>()
            .copied()
            .unwrap_or_default();

        Ok(Negotiated {
            format,
            locale,
            version,
            translator: Arc::clone(&state.translator),
        })
    }
}
