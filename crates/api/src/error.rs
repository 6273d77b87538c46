use axum::http::StatusCode;
use gameshelf_core::envelope::ErrorBody;
use gameshelf_core::error::CoreError;
use gameshelf_core::i18n::{Locale, Translate};
use gameshelf_core::validation::FieldViolation;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Errors are turned into a localized [`ErrorBody`] by
/// [`AppError::to_error_body`] at the single emit point in
/// [`crate::extract::Negotiated::emit`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `gameshelf_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body is not a JSON object.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A path identifier is not an integer.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// No route matched the request path.
    #[error("No route for {0}")]
    RouteNotFound(String),
}

/// Convenience type alias for handler results.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Map this error to its HTTP status and localized error body.
    ///
    /// Internal errors are logged here, once, before they reach the client.
    pub fn to_error_body(&self, translator: &dyn Translate, locale: Locale) -> (StatusCode, ErrorBody) {
        let t = |code: &str| translator.translate(locale, code);

        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    ErrorBody::new(t(&format!("errors.{entity}_not_found")), "NOT_FOUND"),
                ),
                CoreError::Validation(violations) => (
                    StatusCode::BAD_REQUEST,
                    ErrorBody::new(t("errors.validation_error"), "VALIDATION_ERROR")
                        .with_details(violation_details(violations, translator, locale)),
                ),
                CoreError::Conflict(msg) => (
                    StatusCode::CONFLICT,
                    ErrorBody::new(t("errors.conflict"), "CONFLICT").with_details(json!(msg)),
                ),
                CoreError::Internal(msg) => internal_error(msg, translator, locale),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err, translator, locale),

            // --- HTTP-specific errors ---
            AppError::InvalidBody(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(t("errors.invalid_body"), "BAD_REQUEST").with_details(json!(detail)),
            ),
            AppError::InvalidId(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(t("errors.invalid_id"), "BAD_REQUEST").with_details(json!(detail)),
            ),
            AppError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new(t("errors.route_not_found"), "NOT_FOUND").with_path(path.as_str()),
            ),
        }
    }
}

/// `[{field, message}]` with each message localized and interpolated.
fn violation_details(
    violations: &[FieldViolation],
    translator: &dyn Translate,
    locale: Locale,
) -> Value {
    let items = violations
        .iter()
        .map(|violation| {
            let args = violation.rule.message_args();
            let mut pairs = vec![("field", violation.field)];
            pairs.extend(args.iter().map(|(name, value)| (*name, value.as_str())));

            json!({
                "field": violation.field,
                "message": translator.translate_with(locale, violation.rule.message_code(), &pairs),
            })
        })
        .collect();

    Value::Array(items)
}

/// 500 with the generic localized message and the raw error text in `details`.
fn internal_error(detail: &str, translator: &dyn Translate, locale: Locale) -> (StatusCode, ErrorBody) {
    tracing::error!(error = %detail, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::new(translator.translate(locale, "errors.internal_server_error"), "INTERNAL_ERROR")
            .with_details(json!(detail)),
    )
}

/// Classify a sqlx error into an HTTP status and error body.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (`23505`) map to 409.
/// - Foreign-key violations (`23503`) map to 400 against the referencing field.
/// - Everything else maps to 500.
fn classify_sqlx_error(
    err: &sqlx::Error,
    translator: &dyn Translate,
    locale: Locale,
) -> (StatusCode, ErrorBody) {
    let t = |code: &str| translator.translate(locale, code);

    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            ErrorBody::new(t("errors.not_found"), "NOT_FOUND"),
        ),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                (
                    StatusCode::CONFLICT,
                    ErrorBody::new(t("errors.conflict"), "CONFLICT").with_details(json!(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    ))),
                )
            }
            Some("23503") => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(t("errors.validation_error"), "VALIDATION_ERROR").with_details(json!([{
                    "field": reference_field(db_err.constraint()),
                    "message": t("errors.invalid_reference"),
                }])),
            ),
            _ => internal_error(&db_err.to_string(), translator, locale),
        },
        other => internal_error(&other.to_string(), translator, locale),
    }
}

/// Wire name of the column behind a Postgres-named foreign key (`<table>_<column>_fkey`).
fn reference_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(c) if c.ends_with("studio_id_fkey") => "studioId",
        Some(c) if c.ends_with("game_id_fkey") => "gameId",
        _ => "id",
    }
}
