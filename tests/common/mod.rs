#![allow(dead_code)]

use axum::{Router, body::Body, http::Response};
use folio::config::{Config, Profile};
use folio::db::Store;
use folio::entities::{projects, users};
use folio::state::AppState;
use http_body_util::BodyExt;
use std::sync::Arc;

/// A fresh file-backed database per test.
pub async fn test_store() -> Store {
    let path = std::env::temp_dir().join(format!("folio-test-{}.db", uuid::Uuid::new_v4()));
    let url = format!("sqlite:{}", path.display());
    Store::new(&url).await.expect("Failed to open test database")
}

pub fn test_config() -> Config {
    Config::for_profile(Profile::Testing)
}

pub async fn spawn_app() -> (Router, Store) {
    let store = test_store().await;
    let state = AppState::with_store(test_config(), store.clone());
    (folio::api::router(Arc::new(state)), store)
}

pub async fn seed_user(store: &Store, username: &str) -> users::Model {
    store
        .session()
        .create(users::ActiveModel::new_user(
            username,
            format!("{username}@example.com"),
        ))
        .await
        .expect("Failed to seed user")
}

pub async fn seed_project(
    store: &Store,
    owner: &users::Model,
    title: &str,
    featured: bool,
    completed: bool,
) -> projects::Model {
    use sea_orm::Set;

    let mut record = projects::ActiveModel::new_project(owner.id, title);
    record.featured = Set(featured);
    record.completed = Set(completed);
    store
        .session()
        .create(record)
        .await
        .expect("Failed to seed project")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
