//! Integration tests for the repository layer.
//!
//! Exercises the repositories against a real database:
//! - Create and read back games, studios and reviews
//! - Partial updates, including clearing nullable columns
//! - Cascade and set-null behaviour on delete
//! - Unique and foreign-key violations

use assert_matches::assert_matches;
use chrono::NaiveDate;
use gameshelf_core::platform::Platform;
use gameshelf_core::validation::game::{GamePatch, NewGame};
use gameshelf_core::validation::review::{NewReview, ReviewPatch};
use gameshelf_core::validation::studio::{NewStudio, StudioPatch};
use gameshelf_db::repositories::{GameRepo, ReviewRepo, StudioRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_game(title: &str, studio_id: Option<i64>) -> NewGame {
    NewGame {
        title: title.to_string(),
        genre: "Adventure".to_string(),
        release_date: NaiveDate::from_ymd_opt(2012, 3, 13).unwrap(),
        platform: Platform::PlayStation,
        studio_id,
    }
}

fn new_studio(name: &str) -> NewStudio {
    NewStudio {
        name: name.to_string(),
        country: "United States".to_string(),
        founded_at: None,
    }
}

fn new_review(game_id: i64, rating: i32) -> NewReview {
    NewReview {
        rating,
        comment: Some("Great".to_string()),
        reviewer: None,
        game_id,
    }
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_and_find_game(pool: PgPool) {
    let game = GameRepo::create(&pool, &new_game("Journey", None)).await.unwrap();

    assert_eq!(game.title, "Journey");
    assert_eq!(game.platform, "PlayStation");
    assert_eq!(game.studio_id, None);

    let found = GameRepo::find_by_id(&pool, game.id).await.unwrap();
    assert_eq!(found, Some(game));
}

#[sqlx::test(migrations = "./migrations")]
async fn list_is_ordered_by_id(pool: PgPool) {
    let first = GameRepo::create(&pool, &new_game("B", None)).await.unwrap();
    let second = GameRepo::create(&pool, &new_game("A", None)).await.unwrap();

    let ids: Vec<i64> = GameRepo::list(&pool).await.unwrap().iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn partial_update_leaves_other_columns(pool: PgPool) {
    let game = GameRepo::create(&pool, &new_game("Flower", None)).await.unwrap();

    let patch = GamePatch {
        genre: Some("Relaxing".to_string()),
        platform: Some(Platform::Pc),
        ..GamePatch::default()
    };
    let updated = GameRepo::update(&pool, game.id, &patch).await.unwrap().unwrap();

    assert_eq!(updated.genre, "Relaxing");
    assert_eq!(updated.platform, "PC");
    assert_eq!(updated.title, game.title);
    assert_eq!(updated.release_date, game.release_date);
    assert!(updated.updated_at >= game.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_patch_returns_row_unchanged(pool: PgPool) {
    let game = GameRepo::create(&pool, &new_game("Abzu", None)).await.unwrap();

    let same = GameRepo::update(&pool, game.id, &GamePatch::default()).await.unwrap();
    assert_eq!(same, Some(game));
}

#[sqlx::test(migrations = "./migrations")]
async fn update_missing_game_returns_none(pool: PgPool) {
    let patch = GamePatch {
        title: Some("Ghost".to_string()),
        ..GamePatch::default()
    };
    assert_eq!(GameRepo::update(&pool, 999_999, &patch).await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
async fn studio_can_be_set_then_cleared(pool: PgPool) {
    let studio = StudioRepo::create(&pool, &new_studio("thatgamecompany")).await.unwrap();
    let game = GameRepo::create(&pool, &new_game("Sky", None)).await.unwrap();

    let set = GamePatch {
        studio_id: Some(Some(studio.id)),
        ..GamePatch::default()
    };
    let updated = GameRepo::update(&pool, game.id, &set).await.unwrap().unwrap();
    assert_eq!(updated.studio_id, Some(studio.id));

    let untouched = GamePatch {
        title: Some("Sky: Children of the Light".to_string()),
        ..GamePatch::default()
    };
    let updated = GameRepo::update(&pool, game.id, &untouched).await.unwrap().unwrap();
    assert_eq!(updated.studio_id, Some(studio.id));

    let clear = GamePatch {
        studio_id: Some(None),
        ..GamePatch::default()
    };
    let updated = GameRepo::update(&pool, game.id, &clear).await.unwrap().unwrap();
    assert_eq!(updated.studio_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_reports_whether_a_row_was_removed(pool: PgPool) {
    let game = GameRepo::create(&pool, &new_game("Rime", None)).await.unwrap();

    assert!(GameRepo::delete(&pool, game.id).await.unwrap());
    assert!(!GameRepo::delete(&pool, game.id).await.unwrap());
    assert_eq!(GameRepo::find_by_id(&pool, game.id).await.unwrap(), None);
}

// ---------------------------------------------------------------------------
// Relations and integrity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn attach_relations_groups_reviews_per_game(pool: PgPool) {
    let studio = StudioRepo::create(&pool, &new_studio("Playdead")).await.unwrap();
    let limbo = GameRepo::create(&pool, &new_game("Limbo", Some(studio.id))).await.unwrap();
    let inside = GameRepo::create(&pool, &new_game("Inside", None)).await.unwrap();
    ReviewRepo::create(&pool, &new_review(limbo.id, 9)).await.unwrap();
    ReviewRepo::create(&pool, &new_review(limbo.id, 8)).await.unwrap();

    let games = GameRepo::list(&pool).await.unwrap();
    let games = GameRepo::attach_relations(&pool, games).await.unwrap();

    assert_eq!(games.len(), 2);
    assert_eq!(games[0].game.id, limbo.id);
    assert_eq!(games[0].studio.as_ref().map(|s| s.id), Some(studio.id));
    assert_eq!(
        games[0].reviews.iter().map(|r| r.rating).collect::<Vec<_>>(),
        vec![9, 8]
    );
    assert_eq!(games[1].game.id, inside.id);
    assert!(games[1].studio.is_none());
    assert!(games[1].reviews.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_game_cascades_to_reviews(pool: PgPool) {
    let game = GameRepo::create(&pool, &new_game("Gris", None)).await.unwrap();
    let review = ReviewRepo::create(&pool, &new_review(game.id, 10)).await.unwrap();

    GameRepo::delete(&pool, game.id).await.unwrap();

    assert_eq!(ReviewRepo::find_by_id(&pool, review.id).await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_studio_nulls_game_reference(pool: PgPool) {
    let studio = StudioRepo::create(&pool, &new_studio("Mojang")).await.unwrap();
    let game = GameRepo::create(&pool, &new_game("Minecraft", Some(studio.id))).await.unwrap();

    assert!(StudioRepo::delete(&pool, studio.id).await.unwrap());

    let game = GameRepo::find_by_id(&pool, game.id).await.unwrap().unwrap();
    assert_eq!(game.studio_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_studio_name_violates_unique_constraint(pool: PgPool) {
    StudioRepo::create(&pool, &new_studio("Valve")).await.unwrap();

    let err = StudioRepo::create(&pool, &new_studio("Valve")).await.unwrap_err();
    assert_matches!(&err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"));
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_game_reference_violates_foreign_key(pool: PgPool) {
    let err = ReviewRepo::create(&pool, &new_review(999_999, 5)).await.unwrap_err();
    assert_matches!(
        &err,
        sqlx::Error::Database(db) if db.constraint() == Some("reviews_game_id_fkey")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn studio_and_review_patches_clear_nullable_columns(pool: PgPool) {
    let mut input = new_studio("Remedy");
    input.founded_at = NaiveDate::from_ymd_opt(1995, 8, 18);
    let studio = StudioRepo::create(&pool, &input).await.unwrap();

    let patch = StudioPatch {
        founded_at: Some(None),
        ..StudioPatch::default()
    };
    let studio = StudioRepo::update(&pool, studio.id, &patch).await.unwrap().unwrap();
    assert_eq!(studio.founded_at, None);
    assert_eq!(studio.name, "Remedy");

    let game = GameRepo::create(&pool, &new_game("Control", Some(studio.id))).await.unwrap();
    let review = ReviewRepo::create(&pool, &new_review(game.id, 7)).await.unwrap();
    let patch = ReviewPatch {
        comment: Some(None),
        reviewer: Some(Some("jesse".to_string())),
        ..ReviewPatch::default()
    };
    let review = ReviewRepo::update(&pool, review.id, &patch).await.unwrap().unwrap();
    assert_eq!(review.comment, None);
    assert_eq!(review.reviewer.as_deref(), Some("jesse"));
    assert_eq!(review.rating, 7);
}
