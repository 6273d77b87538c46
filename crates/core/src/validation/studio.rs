//! Studio payload schemas.

use serde_json::{Map, Value};

use super::{FieldReader, FieldViolation, Mode};
use crate::types::Date;

pub const NAME_MIN_CHARS: u64 = 2;
pub const NAME_MAX_CHARS: u64 = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudio {
    pub name: String,
    pub country: String,
    pub founded_at: Option<Date>,
}

/// Partial studio update. `founded_at: Some(None)` clears the date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudioPatch {
    pub name: Option<String>,
    pub country: Option<String>,
    pub founded_at: Option<Option<Date>>,
}

impl StudioPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn validate_new_studio(
    payload: &Map<String, Value>,
) -> Result<NewStudio, Vec<FieldViolation>> {
    let mut reader = FieldReader::new(payload, Mode::Create);

    let name = reader.text("name", NAME_MIN_CHARS, NAME_MAX_CHARS);
    let country = reader.text("country", NAME_MIN_CHARS, NAME_MAX_CHARS);
    let founded_at = reader.nullable_date("foundedAt");

    match (name, country) {
        (Some(name), Some(country)) if reader.is_clean() => Ok(NewStudio {
            name,
            country,
            founded_at: founded_at.flatten(),
        }),
        _ => Err(reader.into_violations()),
    }
}

pub fn validate_studio_patch(
    payload: &Map<String, Value>,
) -> Result<StudioPatch, Vec<FieldViolation>> {
    let mut reader = FieldReader::new(payload, Mode::Update);

    let patch = StudioPatch {
        name: reader.text("name", NAME_MIN_CHARS, NAME_MAX_CHARS),
        country: reader.text("country", NAME_MIN_CHARS, NAME_MAX_CHARS),
        founded_at: reader.nullable_date("foundedAt"),
    };

    if reader.is_clean() {
        Ok(patch)
    } else {
        Err(reader.into_violations())
    }
}
