// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (FIRESTORE_EMULATOR_HOST set). Every test works under a fresh user ID,
//! so runs do not interfere with each other.

use dekast_gym::models::{AppointmentDraft, PlanId};
use dekast_gym::services::RemoteMirror;
use dekast_gym::storage::{keys, MemoryStore};
use std::sync::Arc;

mod common;
use common::{jan_with_jake, test_db};

fn booked(id: &str) -> dekast_gym::models::Appointment {
    jan_with_jake().to_appointment(id).unwrap()
}

#[tokio::test]
async fn test_create_user_with_subscription() {
    require_emulator!();

    let db = test_db().await;
    let (user_id, subscription_id) = db
        .create_user("Jan", "jan@x.nl", Some(PlanId::Premium))
        .await
        .unwrap();

    assert!(!user_id.is_empty());
    assert!(subscription_id.is_some());
}

#[tokio::test]
async fn test_create_user_without_subscription() {
    require_emulator!();

    let db = test_db().await;
    let (_, subscription_id) = db.create_user("An", "an@x.nl", None).await.unwrap();
    assert!(subscription_id.is_none());
}

#[tokio::test]
async fn test_unknown_username() {
    require_emulator!();

    let db = test_db().await;
    let user = db
        .find_user_by_username(&format!("nobody-{}", uuid::Uuid::new_v4()))
        .await
        .unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_course_enrollment_round_trip() {
    require_emulator!();

    let db = test_db().await;
    let (user_id, _) = db.create_user("Jan", "jan@x.nl", None).await.unwrap();

    let enrollment_id = db.add_user_to_course(&user_id, "yoga").await.unwrap();

    let courses = db.list_courses_for_user(&user_id).await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, enrollment_id);
    assert_eq!(courses[0].course_type, "yoga");
}

#[tokio::test]
async fn test_appointments_for_user() {
    require_emulator!();

    let db = test_db().await;
    let (user_id, _) = db.create_user("Jan", "jan@x.nl", None).await.unwrap();
    let appointment = booked(&uuid::Uuid::new_v4().to_string());

    db.add_appointment_for_user(&user_id, &appointment)
        .await
        .unwrap();

    let stored = db.list_appointments_for_user(&user_id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].appointment, appointment);
}

#[tokio::test]
async fn test_mirror_copies_booking() {
    require_emulator!();

    let db = test_db().await;
    let (user_id, _) = db.create_user("Jan", "jan@x.nl", None).await.unwrap();
    let store = MemoryStore::new().with_value(keys::USER_ID, &user_id);
    let mirror = RemoteMirror::new(Arc::new(store), db.clone());

    let appointment = booked(&uuid::Uuid::new_v4().to_string());
    mirror.appointment_booked(&appointment).await.unwrap();
    mirror.subscription_confirmed(PlanId::Basic).await.unwrap();

    let stored = db.list_appointments_for_user(&user_id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].appointment.id, appointment.id);
}

#[tokio::test]
async fn test_mirror_without_linked_account_is_noop() {
    require_emulator!();

    let db = test_db().await;
    let mirror = RemoteMirror::new(Arc::new(MemoryStore::new()), db);

    let draft = AppointmentDraft {
        course: "yoga".to_string(),
        ..jan_with_jake()
    };
    mirror
        .appointment_booked(&draft.to_appointment("local-only").unwrap())
        .await
        .unwrap();
}
