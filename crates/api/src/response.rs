//! Response emission: envelope, render, headers.
//!
//! Handlers compute an [`AppResult<Reply>`] and hand it to
//! [`Negotiated::emit`], the one place where envelopes are built, messages
//! localized and bodies rendered in the negotiated format.

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use gameshelf_core::envelope::{Envelope, ErrorBody};
use gameshelf_core::render;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::Negotiated;

/// Root element / file name used for error documents.
const ERROR_ROOT: &str = "error";

/// A successful handler outcome, before shaping.
#[derive(Debug)]
pub enum Reply {
    /// A resource (or list) wrapped in a data envelope.
    Resource {
        status: StatusCode,
        /// XML root element and CSV file name (`games`, `game`, ...).
        root: &'static str,
        /// Translation code of the success message.
        message: &'static str,
        data: Value,
    },
    /// 204 with an empty body.
    NoContent,
}

impl Reply {
    pub fn ok(root: &'static str, message: &'static str, data: Value) -> Self {
        Reply::Resource {
            status: StatusCode::OK,
            root,
            message,
            data,
        }
    }

    pub fn created(root: &'static str, message: &'static str, data: Value) -> Self {
        Reply::Resource {
            status: StatusCode::CREATED,
            root,
            message,
            data,
        }
    }
}

impl Negotiated {
    /// Turn a handler outcome into a formatted HTTP response.
    pub fn emit(&self, result: AppResult<Reply>) -> Response {
        match result {
            Ok(Reply::NoContent) => StatusCode::NO_CONTENT.into_response(),
            Ok(Reply::Resource {
                status,
                root,
                message,
                data,
            }) => self.respond(status, root, &Envelope::data(data, self.translate(message))),
            Err(err) => {
                let (status, body) = err.to_error_body(&*self.translator, self.locale);
                self.respond(status, ERROR_ROOT, &Envelope::<Value>::error(body))
            }
        }
    }

    fn respond<T: Serialize>(&self, status: StatusCode, root: &str, envelope: &Envelope<T>) -> Response {
        let rendered = serde_json::to_value(envelope)
            .map_err(|e| e.to_string())
            .and_then(|value| render::render(self.format, root, &value).map_err(|e| e.to_string()));

        let rendered = match rendered {
            Ok(rendered) => rendered,
            Err(error) => return self.render_failure(&error),
        };

        let mut response = (
            status,
            [(CONTENT_TYPE, rendered.content_type)],
            rendered.body,
        )
            .into_response();

        if let Some(disposition) = rendered.disposition {
            if let Ok(value) = HeaderValue::from_str(&disposition) {
                response.headers_mut().insert(CONTENT_DISPOSITION, value);
            }
        }

        response
    }

    /// Last resort when a body cannot be rendered: a plain JSON 500.
    fn render_failure(&self, error: &str) -> Response {
        tracing::error!(%error, format = %self.format, "Failed to render response body");
        let body = ErrorBody::new(self.translate("errors.internal_server_error"), "INTERNAL_ERROR")
            .with_details(Value::String(error.to_string()));
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(Envelope::<Value>::error(body)),
        )
            .into_response()
    }
}
