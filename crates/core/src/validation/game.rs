//! Game payload schemas.

use serde_json::{Map, Value};

use super::{FieldReader, FieldViolation, Mode};
use crate::platform::Platform;
use crate::types::{Date, DbId};

pub const TITLE_MAX_CHARS: u64 = 255;
pub const GENRE_MAX_CHARS: u64 = 100;

/// A validated game creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub title: String,
    pub genre: String,
    pub release_date: Date,
    pub platform: Platform,
    pub studio_id: Option<DbId>,
}

/// A validated partial update. `None` means "leave unchanged".
///
/// `studio_id` is doubly optional: `Some(None)` clears the studio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamePatch {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<Date>,
    pub platform: Option<Platform>,
    pub studio_id: Option<Option<DbId>>,
}

impl GamePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn validate_new_game(payload: &Map<String, Value>) -> Result<NewGame, Vec<FieldViolation>> {
    let mut reader = FieldReader::new(payload, Mode::Create);

    let title = reader.text("title", 1, TITLE_MAX_CHARS);
    let genre = reader.text("genre", 1, GENRE_MAX_CHARS);
    let release_date = reader.date("releaseDate");
    let platform = reader.platform("platform");
    let studio_id = reader.nullable_id("studioId");

    match (title, genre, release_date, platform) {
        (Some(title), Some(genre), Some(release_date), Some(platform)) if reader.is_clean() => {
            Ok(NewGame {
                title,
                genre,
                release_date,
                platform,
                studio_id: studio_id.flatten(),
            })
        }
        _ => Err(reader.into_violations()),
    }
}

pub fn validate_game_patch(payload: &Map<String, Value>) -> Result<GamePatch, Vec<FieldViolation>> {
    let mut reader = FieldReader::new(payload, Mode::Update);

    let patch = GamePatch {
        title: reader.text("title", 1, TITLE_MAX_CHARS),
        genre: reader.text("genre", 1, GENRE_MAX_CHARS),
        release_date: reader.date("releaseDate"),
        platform: reader.platform("platform"),
        studio_id: reader.nullable_id("studioId"),
    };

    if reader.is_clean() {
        Ok(patch)
    } else {
        Err(reader.into_violations())
    }
}
