//! Review payload schemas.

use serde_json::{Map, Value};

use super::{FieldReader, FieldViolation, Mode};
use crate::types::DbId;

pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 10;
pub const REVIEWER_MAX_CHARS: u64 = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewer: Option<String>,
    pub game_id: DbId,
}

/// Partial review update. Nullable text fields use `Some(None)` to clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewPatch {
    pub rating: Option<i32>,
    pub comment: Option<Option<String>>,
    pub reviewer: Option<Option<String>>,
    pub game_id: Option<DbId>,
}

impl ReviewPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn validate_new_review(
    payload: &Map<String, Value>,
) -> Result<NewReview, Vec<FieldViolation>> {
    let mut reader = FieldReader::new(payload, Mode::Create);

    let rating = read_rating(&mut reader);
    let comment = reader.nullable_text("comment", None);
    let reviewer = reader.nullable_text("reviewer", Some(REVIEWER_MAX_CHARS));
    let game_id = reader.id("gameId");

    match (rating, game_id) {
        (Some(rating), Some(game_id)) if reader.is_clean() => Ok(NewReview {
            rating,
            comment: comment.flatten(),
            reviewer: reviewer.flatten(),
            game_id,
        }),
        _ => Err(reader.into_violations()),
    }
}

pub fn validate_review_patch(
    payload: &Map<String, Value>,
) -> Result<ReviewPatch, Vec<FieldViolation>> {
    let mut reader = FieldReader::new(payload, Mode::Update);

    let patch = ReviewPatch {
        rating: read_rating(&mut reader),
        comment: reader.nullable_text("comment", None),
        reviewer: reader.nullable_text("reviewer", Some(REVIEWER_MAX_CHARS)),
        game_id: reader.id("gameId"),
    };

    if reader.is_clean() {
        Ok(patch)
    } else {
        Err(reader.into_violations())
    }
}

fn read_rating(reader: &mut FieldReader<'_>) -> Option<i32> {
    reader
        .integer_in("rating", RATING_MIN, RATING_MAX)
        .and_then(|n| i32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::Rule;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn accepts_minimal_review() {
        let review = validate_new_review(&object(json!({"rating": 10, "gameId": 4}))).unwrap();
        assert_eq!(review.rating, 10);
        assert_eq!(review.game_id, 4);
        assert_eq!(review.comment, None);
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        for rating in [1, 10] {
            assert!(validate_new_review(&object(json!({"rating": rating, "gameId": 1}))).is_ok());
        }
        for rating in [0, 11] {
            let violations =
                validate_new_review(&object(json!({"rating": rating, "gameId": 1}))).unwrap_err();
            assert_eq!(violations[0].rule, Rule::IntegerRange { min: 1, max: 10 });
        }
    }

    #[test]
    fn collects_all_violations() {
        let violations = validate_new_review(&object(json!({
            "rating": 7.5,
            "comment": 12,
            "reviewer": "r".repeat(256)
        })))
        .unwrap_err();
        assert_eq!(
            violations.iter().map(|v| v.field).collect::<Vec<_>>(),
            vec!["rating", "comment", "reviewer", "gameId"]
        );
    }

    #[test]
    fn patch_can_clear_comment() {
        let patch = validate_review_patch(&object(json!({"comment": null}))).unwrap();
        assert_eq!(patch.comment, Some(None));
        assert_eq!(patch.rating, None);
    }
}
