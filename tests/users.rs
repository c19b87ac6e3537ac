//! End-to-end persistence tests against a live Postgres.
//!
//! These need `POSTGRES_CONNECTION_URI` pointing at a database the tests may
//! write to. Run with `cargo test -- --ignored`.

use std::time::{SystemTime, UNIX_EPOCH};

use users_api::configuration::DatabaseSettings;
use users_api::errors::ApiError;
use users_api::services::user::UserService;
use users_api::store::{Storage, UserRepository};

async fn service() -> UserService {
    let settings = DatabaseSettings::from_env();
    assert!(
        settings.connection_uri.is_some(),
        "POSTGRES_CONNECTION_URI must be set for these tests"
    );
    let storage = Storage::connect(&settings).expect("bad connection uri");
    storage.init().await.expect("schema bootstrap failed");
    UserService::new(UserRepository::new(storage.pool()))
}

fn fresh_email(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{tag}-{nanos}@test.invalid")
}

#[tokio::test]
#[ignore]
async fn create_then_lookup_round_trips() {
    let service = service().await;
    let email = fresh_email("create");

    let created = service.create(&email, "secret").await.unwrap();
    assert!(created.is_persisted());

    let found = service.lookup(&email).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.email, email);
    assert_eq!(found.password, "secret");
}

#[tokio::test]
#[ignore]
async fn update_overwrites_fields_and_keeps_the_id() {
    let service = service().await;
    let email = fresh_email("update");

    let created = service.create(&email, "first").await.unwrap();
    let updated = service.update(&email, "second").await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.password, "second");

    let found = service.lookup(&email).await.unwrap().unwrap();
    assert_eq!(found.password, "second");
}

#[tokio::test]
#[ignore]
async fn lookup_of_unknown_email_is_none() {
    let service = service().await;
    let email = fresh_email("never-created");

    assert!(service.lookup(&email).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn duplicate_email_is_a_conflict_and_leaves_the_first_row_alone() {
    let service = service().await;
    let email = fresh_email("duplicate");

    let first = service.create(&email, "original").await.unwrap();

    let second = service.create(&email, "imposter").await;
    assert!(matches!(second, Err(ApiError::EmailTaken)));

    let found = service.lookup(&email).await.unwrap().unwrap();
    assert_eq!(found.id, first.id);
    assert_eq!(found.password, "original");
}

#[tokio::test]
#[ignore]
async fn update_of_unknown_email_is_not_found() {
    let service = service().await;
    let email = fresh_email("missing");

    let result = service.update(&email, "whatever").await;
    assert!(matches!(result, Err(ApiError::UserNotFound)));
}
