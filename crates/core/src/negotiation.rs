//! Response format negotiation.
//!
//! Resolution order, first match wins:
//!
//! 1. explicit override (the `format` query parameter) naming one of the four formats
//! 2. `text/csv` in the `Accept` header
//! 3. `application/xml`
//! 4. `application/yaml` or `text/yaml`
//! 5. JSON
//!
//! There is no error path. Anything unrecognised resolves to JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A wire format the renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Xml,
    Yaml,
    Csv,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Json, Format::Xml, Format::Yaml, Format::Csv];

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Yaml => "yaml",
            Format::Csv => "csv",
        }
    }

    /// Parse an explicit override token (`json`, `xml`, `yaml`, `csv`).
    ///
    /// Surrounding whitespace and ASCII case are ignored.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(token))
    }

    /// `Content-Type` header value for a response body in this format.
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
            Format::Yaml => "application/yaml",
            Format::Csv => "text/csv; charset=utf-8",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split an `Accept`-style header into bare MIME tokens.
///
/// Each comma-separated entry is stripped of parameters (`;q=0.9` etc.) and
/// trimmed. Empty entries are dropped.
pub fn accept_tokens(header: &str) -> Vec<&str> {
    header
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Resolve the response format from an explicit override and an `Accept` header.
///
/// Quality values are ignored; the fixed precedence above decides.
pub fn negotiate(explicit: Option<&str>, accept: Option<&str>) -> Format {
    if let Some(format) = explicit.and_then(Format::from_token) {
        return format;
    }

    let tokens = accept.map(accept_tokens).unwrap_or_default();
    let has = |mime: &str| tokens.iter().any(|t| t.eq_ignore_ascii_case(mime));

    if has("text/csv") {
        Format::Csv
    } else if has("application/xml") {
        Format::Xml
    } else if has("application/yaml") || has("text/yaml") {
        Format::Yaml
    } else {
        Format::Json
    }
}
