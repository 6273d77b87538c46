//! Payload validation for create and partial-update requests.
//!
//! Validators take the raw JSON object from the request body, check every
//! rule and collect *all* violations in field order rather than stopping at
//! the first. On success they return typed inputs ready for persistence.
//!
//! The same per-field rules serve both schemas. In create mode a missing
//! (or `null`) required field is a violation; in update mode absent fields
//! are skipped and only present ones are checked.

pub mod game;
pub mod review;
pub mod studio;

use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};
use validator::ValidateLength;

use crate::platform::Platform;
use crate::types::{Date, DbId};

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire name of the offending field (`releaseDate`, `studioId`, ...).
    pub field: &'static str,
    pub rule: Rule,
}

/// The rule a field failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    NonEmptyString,
    TooShort { min: u64 },
    TooLong { max: u64 },
    InvalidDate,
    InvalidPlatform,
    PositiveInteger,
    IntegerRange { min: i64, max: i64 },
    StringOrNull,
}

impl Rule {
    /// Translation code of the message describing this rule.
    pub fn message_code(&self) -> &'static str {
        match self {
            Rule::Required => "validation.required",
            Rule::NonEmptyString => "validation.non_empty_string",
            Rule::TooShort { .. } => "validation.too_short",
            Rule::TooLong { .. } => "validation.too_long",
            Rule::InvalidDate => "validation.invalid_date",
            Rule::InvalidPlatform => "validation.invalid_platform",
            Rule::PositiveInteger => "validation.positive_integer",
            Rule::IntegerRange { .. } => "validation.integer_range",
            Rule::StringOrNull => "validation.string_or_null",
        }
    }

    /// Placeholder values for the message template (besides `field`).
    pub fn message_args(&self) -> Vec<(&'static str, String)> {
        match self {
            Rule::TooShort { min } => vec![("min", min.to_string())],
            Rule::TooLong { max } => vec![("max", max.to_string())],
            Rule::IntegerRange { min, max } => {
                vec![("min", min.to_string()), ("max", max.to_string())]
            }
            Rule::InvalidPlatform => vec![("allowed", Platform::allowed_values())],
            _ => Vec::new(),
        }
    }
}

/// Parse a calendar date from an ISO 8601 date or date-time string.
///
/// Date-times keep only their date part (in their own offset).
pub fn parse_date(input: &str) -> Option<Date> {
    let input = input.trim();

    Date::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Create,
    Update,
}

/// Reads typed fields out of a payload while recording violations.
///
/// Every accessor returns `Some` only when the field is present and valid;
/// nullable accessors return `Some(None)` for an explicit `null`.
pub(crate) struct FieldReader<'a> {
    payload: &'a Map<String, Value>,
    mode: Mode,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(payload: &'a Map<String, Value>, mode: Mode) -> Self {
        Self {
            payload,
            mode,
            violations: Vec::new(),
        }
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub(crate) fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    fn fail<T>(&mut self, field: &'static str, rule: Rule) -> Option<T> {
        self.violations.push(FieldViolation { field, rule });
        None
    }

    /// A field that must be supplied on create. Absent fields are skipped on update.
    fn required(&mut self, field: &'static str) -> Option<&'a Value> {
        match (self.payload.get(field), self.mode) {
            (None | Some(Value::Null), Mode::Create) => self.fail(field, Rule::Required),
            (None, Mode::Update) => None,
            (Some(value), _) => Some(value),
        }
    }

    /// Non-blank string whose trimmed length (in characters) lies in `min..=max`.
    pub(crate) fn text(&mut self, field: &'static str, min: u64, max: u64) -> Option<String> {
        let value = self.required(field)?;

        let Some(s) = value.as_str().filter(|s| !s.trim().is_empty()) else {
            return self.fail(field, Rule::NonEmptyString);
        };

        let trimmed = s.trim();
        if !trimmed.validate_length(Some(min), Some(max), None) {
            let rule = if (trimmed.chars().count() as u64) < min {
                Rule::TooShort { min }
            } else {
                Rule::TooLong { max }
            };
            return self.fail(field, rule);
        }

        Some(s.to_string())
    }

    pub(crate) fn date(&mut self, field: &'static str) -> Option<Date> {
        let value = self.required(field)?;
        match value.as_str().and_then(parse_date) {
            Some(date) => Some(date),
            None => self.fail(field, Rule::InvalidDate),
        }
    }

    pub(crate) fn platform(&mut self, field: &'static str) -> Option<Platform> {
        let value = self.required(field)?;
        match value.as_str().and_then(|s| s.parse::<Platform>().ok()) {
            Some(platform) => Some(platform),
            None => self.fail(field, Rule::InvalidPlatform),
        }
    }

    /// Required foreign key: a positive integer.
    pub(crate) fn id(&mut self, field: &'static str) -> Option<DbId> {
        let value = self.required(field)?;
        match positive_id(value) {
            Some(id) => Some(id),
            None => self.fail(field, Rule::PositiveInteger),
        }
    }

    pub(crate) fn integer_in(&mut self, field: &'static str, min: i64, max: i64) -> Option<i64> {
        let value = self.required(field)?;
        match value.as_i64().filter(|n| (min..=max).contains(n)) {
            Some(n) => Some(n),
            None => self.fail(field, Rule::IntegerRange { min, max }),
        }
    }

    /// Optional foreign key: absent, `null`, or a positive integer.
    pub(crate) fn nullable_id(&mut self, field: &'static str) -> Option<Option<DbId>> {
        match self.payload.get(field)? {
            Value::Null => Some(None),
            value => match positive_id(value) {
                Some(id) => Some(Some(id)),
                None => self.fail(field, Rule::PositiveInteger),
            },
        }
    }

    pub(crate) fn nullable_date(&mut self, field: &'static str) -> Option<Option<Date>> {
        match self.payload.get(field)? {
            Value::Null => Some(None),
            value => match value.as_str().and_then(parse_date) {
                Some(date) => Some(Some(date)),
                None => self.fail(field, Rule::InvalidDate),
            },
        }
    }

    /// Optional free text: absent, `null`, or a string of at most `max` characters.
    pub(crate) fn nullable_text(
        &mut self,
        field: &'static str,
        max: Option<u64>,
    ) -> Option<Option<String>> {
        match self.payload.get(field)? {
            Value::Null => Some(None),
            Value::String(s) => match max {
                Some(max) if !s.validate_length(None, Some(max), None) => {
                    self.fail(field, Rule::TooLong { max })
                }
                _ => Some(Some(s.clone())),
            },
            _ => self.fail(field, Rule::StringOrNull),
        }
    }
}

fn positive_id(value: &Value) -> Option<DbId> {
    value.as_i64().filter(|id| *id > 0)
}
