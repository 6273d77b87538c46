//! Multi-format rendering of JSON-like value trees.
//!
//! Every response body passes through [`render`] after the envelope has been
//! built and converted to a [`serde_json::Value`]. Fidelity differs per format:
//!
//! - JSON and YAML are structural and lossless for the value tree.
//! - XML renders every scalar as text, so numbers, booleans and nulls only
//!   survive as strings (`null` becomes an empty element).
//! - CSV is tabular: only the `data` rows are emitted, envelope metadata and
//!   per-row `_links` are dropped.

pub mod csv;
pub mod xml;

use std::borrow::Cow;

use serde_json::Value;

use crate::error::CoreError;
use crate::negotiation::Format;

/// A rendered response body plus the headers that describe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub body: String,
    pub content_type: &'static str,
    /// `Content-Disposition` value, set for CSV downloads only.
    pub disposition: Option<String>,
}

/// Render `value` in `format`.
///
/// `root` names the XML document element and the CSV download file
/// (e.g. `games`, `game`, `error`). JSON and YAML ignore it.
pub fn render(format: Format, root: &str, value: &Value) -> Result<Rendered, CoreError> {
    let body = match format {
        Format::Json => serde_json::to_string(value)
            .map_err(|e| CoreError::Internal(format!("JSON serialization failed: {e}")))?,
        Format::Yaml => serde_yaml::to_string(value)
            .map_err(|e| CoreError::Internal(format!("YAML serialization failed: {e}")))?,
        Format::Xml => xml::to_document(root, value),
        Format::Csv => csv::to_csv(csv_payload(value)),
    };

    let disposition = match format {
        Format::Csv => Some(format!("attachment; filename=\"{root}.csv\"")),
        _ => None,
    };

    Ok(Rendered {
        body,
        content_type: format.content_type(),
        disposition,
    })
}

/// The part of an envelope that CSV tabulates: `data` when present, else the whole value.
fn csv_payload(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map.get("data").unwrap_or(value),
        _ => value,
    }
}

/// String form of a value as it appears in XML text and CSV cells.
///
/// `null` is empty, strings are verbatim, numbers and booleans use their JSON
/// spelling. Arrays and objects (which only reach here from CSV) become
/// compact JSON.
pub(crate) fn text_form(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}
