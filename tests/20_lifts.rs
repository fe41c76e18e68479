// Lift catalog service behaviour against a real schema.

mod common;

use girya::models::LiftInput;
use girya::services::{lifts, ServiceError};

fn input(name: &str, slug: &str) -> LiftInput {
    LiftInput {
        name: name.to_string(),
        slug: slug.to_string(),
    }
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let pool = common::test_pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let created = lifts::create(&mut conn, &input("Bench Press", "bench-press"))
        .await
        .unwrap();
    assert_eq!(created.name, "Bench Press");

    let fetched = lifts::get_by_slug(&mut conn, "bench-press")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let pool = common::test_pool().await;
    let mut conn = pool.acquire().await.unwrap();

    lifts::create(&mut conn, &input("Bench Press", "bench-press"))
        .await
        .unwrap();
    let err = lifts::create(&mut conn, &input("Incline Bench", "bench-press"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)), "{err:?}");
}

#[tokio::test]
async fn update_rewrites_name_and_slug_in_place() {
    let pool = common::test_pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let created = lifts::create(&mut conn, &input("Squt", "squt")).await.unwrap();
    let updated = lifts::update_by_slug(&mut conn, "squt", &input("Squat", "squat"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.slug, "squat");
    assert!(lifts::get_by_slug(&mut conn, "squt").await.unwrap().is_none());
}

#[tokio::test]
async fn update_missing_lift_returns_none() {
    let pool = common::test_pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let result = lifts::update_by_slug(&mut conn, "ghost", &input("Ghost", "ghost"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn renaming_onto_a_taken_slug_conflicts() {
    let pool = common::test_pool().await;
    let mut conn = pool.acquire().await.unwrap();

    lifts::create(&mut conn, &input("Squat", "squat")).await.unwrap();
    lifts::create(&mut conn, &input("Deadlift", "deadlift"))
        .await
        .unwrap();

    let err = lifts::update_by_slug(&mut conn, "deadlift", &input("Squat", "squat"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)), "{err:?}");
}

#[tokio::test]
async fn delete_missing_lift_is_not_found() {
    let pool = common::test_pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let err = lifts::delete_by_slug(&mut conn, "ghost").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)), "{err:?}");
}

#[tokio::test]
async fn list_orders_by_name() {
    let pool = common::test_pool().await;
    let mut conn = pool.acquire().await.unwrap();

    lifts::create(&mut conn, &input("Squat", "squat")).await.unwrap();
    lifts::create(&mut conn, &input("Bench Press", "bench-press"))
        .await
        .unwrap();
    lifts::create(&mut conn, &input("Deadlift", "deadlift"))
        .await
        .unwrap();

    let names: Vec<String> = lifts::list(&mut conn)
        .await
        .unwrap()
        .into_iter()
        .map(|lift| lift.name)
        .collect();
    assert_eq!(names, ["Bench Press", "Deadlift", "Squat"]);
}
