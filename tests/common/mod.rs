// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use dekast_gym::config::Config;
use dekast_gym::db::FirestoreDb;
use dekast_gym::models::{AppointmentDraft, DraftField};
use dekast_gym::routes::create_router;
use dekast_gym::storage::{keys, MemoryStore, AUTH_TRUE};
use dekast_gym::AppState;
use http_body_util::BodyExt;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app over `store` with the remote store offline.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_store(store: MemoryStore) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        Config::default(),
        Arc::new(store),
        FirestoreDb::new_mock(),
    ));
    (create_router(state.clone()), state)
}

/// Create a test app for a member who has never logged in.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemoryStore) {
    let store = MemoryStore::new();
    let (app, state) = create_test_app_with_store(store.clone());
    (app, state, store)
}

/// Create a test app for a member who is logged in.
#[allow(dead_code)]
pub fn create_authenticated_app() -> (axum::Router, Arc<AppState>, MemoryStore) {
    let store = MemoryStore::new().with_value(keys::AUTH, AUTH_TRUE);
    let (app, state) = create_test_app_with_store(store.clone());
    (app, state, store)
}

/// Build a request with an optional JSON body.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A draft that passes validation: Jan booking trainer Jake.
#[allow(dead_code)]
pub fn jan_with_jake() -> AppointmentDraft {
    let mut draft = AppointmentDraft::default();
    for (field, value) in [
        (DraftField::Name, "Jan"),
        (DraftField::Email, "jan@x.nl"),
        (DraftField::Phone, "0612345678"),
        (DraftField::Date, "2025-03-01"),
        (DraftField::Time, "10:00"),
        (DraftField::Trainer, "jake"),
    ] {
        draft.set(field, value).unwrap();
    }
    draft
}
