// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Documents stored in Firestore.
//!
//! Document IDs are read back through the `_firestore_id` alias the
//! firestore crate injects. Records are written with an empty `id` so the
//! ID is not duplicated into the document body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::appointment::Appointment;
use super::subscription::PlanId;

/// Member profile (`users/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Login name; accounts created in the app have none until set by staff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Plan held by a user (`users/{id}/subscriptions/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubscription {
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type")]
    pub plan: String,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub started_at: DateTime<Utc>,
}

impl UserSubscription {
    pub fn new(plan: PlanId) -> Self {
        Self {
            id: String::new(),
            plan: plan.as_str().to_string(),
            started_at: Utc::now(),
        }
    }
}

/// Course offered by the gym (`courses/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Enrollment of a user in a course (`users/{id}/courses/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEnrollment {
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type")]
    pub course_type: String,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Plan advertised by the gym (`subscribtions/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionOffer {
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Booked session mirrored to Firestore.
///
/// The document ID is the local appointment ID, which the record also
/// carries as its `id` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAppointment {
    #[serde(flatten)]
    pub appointment: Appointment,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<&Appointment> for RemoteAppointment {
    fn from(appointment: &Appointment) -> Self {
        Self {
            appointment: appointment.clone(),
            created_at: Utc::now(),
        }
    }
}
