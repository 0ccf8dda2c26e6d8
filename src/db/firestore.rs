// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles with their plan, courses and appointments)
//! - Courses and advertised subscription plans
//! - Appointments (all, or per user)
//!
//! Document IDs are generated client-side as UUIDs.

use crate::db::collections;
use crate::error::AppError;
use crate::models::remote::{
    Course, CourseEnrollment, RemoteAppointment, SubscriptionOffer, User, UserSubscription,
};
use crate::models::{Appointment, PlanId};
use chrono::Utc;
use uuid::Uuid;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

fn remote_error(e: impl std::fmt::Display) -> AppError {
    AppError::Remote(e.to_string())
}

impl FirestoreDb {
    /// Connect to Firestore.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Remote(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Emulator connection with a dummy token, so no local credentials are read.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| AppError::Remote(format!("Failed to connect to Firestore Emulator: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore emulator");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Offline client: every operation fails with [`AppError::Remote`].
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Whether a remote project is connected.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Remote("Remote store not connected (offline mode)".to_string()))
    }

    fn user_path(&self, user_id: &str) -> Result<firestore::ParentPathBuilder, AppError> {
        self.get_client()?
            .parent_path(collections::USERS, user_id)
            .map_err(remote_error)
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Look up a user by login name.
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let mut users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("username").eq(username)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(remote_error)?;

        Ok(users.pop())
    }

    /// Create a user, plus an initial subscription when a plan is given.
    ///
    /// Returns the user ID and the subscription document ID.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        plan: Option<PlanId>,
    ) -> Result<(String, Option<String>), AppError> {
        let user_id = Uuid::new_v4().to_string();
        let user = User {
            id: String::new(),
            name: name.to_string(),
            email: email.to_string(),
            username: None,
            created_at: Utc::now(),
        };

        let _: User = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user_id)
            .object(&user)
            .execute()
            .await
            .map_err(remote_error)?;

        let subscription_id = match plan {
            Some(plan) => Some(self.add_subscription_for_user(&user_id, plan).await?),
            None => None,
        };

        tracing::info!(
            user_id = %user_id,
            subscription_id = ?subscription_id,
            "Created user"
        );

        Ok((user_id, subscription_id))
    }

    /// Record a plan for a user. Returns the subscription document ID.
    pub async fn add_subscription_for_user(
        &self,
        user_id: &str,
        plan: PlanId,
    ) -> Result<String, AppError> {
        let parent_path = self.user_path(user_id)?;
        let subscription_id = Uuid::new_v4().to_string();

        let _: UserSubscription = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USER_SUBSCRIPTIONS)
            .document_id(&subscription_id)
            .parent(&parent_path)
            .object(&UserSubscription::new(plan))
            .execute()
            .await
            .map_err(remote_error)?;

        Ok(subscription_id)
    }

    // ─── Course Operations ───────────────────────────────────────

    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::COURSES)
            .obj()
            .query()
            .await
            .map_err(remote_error)
    }

    /// Courses a user is enrolled in.
    pub async fn list_courses_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<CourseEnrollment>, AppError> {
        let parent_path = self.user_path(user_id)?;
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USER_COURSES)
            .parent(&parent_path)
            .obj()
            .query()
            .await
            .map_err(remote_error)
    }

    /// Enroll a user in a course. Returns the enrollment document ID.
    pub async fn add_user_to_course(
        &self,
        user_id: &str,
        course_type: &str,
    ) -> Result<String, AppError> {
        let parent_path = self.user_path(user_id)?;
        let enrollment_id = Uuid::new_v4().to_string();
        let enrollment = CourseEnrollment {
            id: String::new(),
            course_type: course_type.to_string(),
            created_at: Utc::now(),
        };

        let _: CourseEnrollment = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USER_COURSES)
            .document_id(&enrollment_id)
            .parent(&parent_path)
            .object(&enrollment)
            .execute()
            .await
            .map_err(remote_error)?;

        tracing::info!(user_id, enrollment_id = %enrollment_id, "Enrolled user in course");
        Ok(enrollment_id)
    }

    // ─── Subscription Offers ─────────────────────────────────────

    pub async fn list_subscription_offers(&self) -> Result<Vec<SubscriptionOffer>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SUBSCRIPTION_OFFERS)
            .obj()
            .query()
            .await
            .map_err(remote_error)
    }

    // ─── Appointment Operations ──────────────────────────────────

    pub async fn list_all_appointments(&self) -> Result<Vec<RemoteAppointment>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::APPOINTMENTS)
            .obj()
            .query()
            .await
            .map_err(remote_error)
    }

    pub async fn list_appointments_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<RemoteAppointment>, AppError> {
        let parent_path = self.user_path(user_id)?;
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USER_APPOINTMENTS)
            .parent(&parent_path)
            .obj()
            .query()
            .await
            .map_err(remote_error)
    }

    /// Store a booked appointment under the user, keyed by its local ID.
    pub async fn add_appointment_for_user(
        &self,
        user_id: &str,
        appointment: &Appointment,
    ) -> Result<(), AppError> {
        let parent_path = self.user_path(user_id)?;
        let record = RemoteAppointment::from(appointment);

        let _: RemoteAppointment = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USER_APPOINTMENTS)
            .document_id(&appointment.id)
            .parent(&parent_path)
            .object(&record)
            .execute()
            .await
            .map_err(remote_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_client_reports_remote_error() {
        let db = FirestoreDb::new_mock();
        assert!(!db.is_connected());

        assert!(matches!(
            db.find_user_by_username("jan").await,
            Err(AppError::Remote(_))
        ));
        assert!(matches!(
            db.add_user_to_course("u-1", "yoga").await,
            Err(AppError::Remote(_))
        ));
        assert!(matches!(
            db.create_user("Jan", "jan@x.nl", Some(PlanId::Basic)).await,
            Err(AppError::Remote(_))
        ));
    }
}
