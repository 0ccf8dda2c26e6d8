// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fire-and-forget copies of local writes into Firestore.
//!
//! Only members who logged in or registered against the remote store have
//! a stored `userId`; for everyone else mirroring is a no-op. Failures are
//! logged and never reach the caller.

use crate::db::FirestoreDb;
use crate::models::{Appointment, PlanId};
use crate::storage::{keys, KeyValueStore};
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct RemoteMirror {
    store: Arc<dyn KeyValueStore>,
    db: FirestoreDb,
}

impl RemoteMirror {
    pub fn new(store: Arc<dyn KeyValueStore>, db: FirestoreDb) -> Self {
        Self { store, db }
    }

    /// Mirror a booked appointment into `users/{id}/appointments`.
    pub fn appointment_booked(&self, appointment: &Appointment) -> JoinHandle<()> {
        let mirror = self.clone();
        let appointment = appointment.clone();
        tokio::spawn(async move {
            let Some(user_id) = mirror.remote_user().await else {
                return;
            };
            match mirror
                .db
                .add_appointment_for_user(&user_id, &appointment)
                .await
            {
                Ok(()) => tracing::debug!(
                    user_id = %user_id,
                    appointment_id = %appointment.id,
                    "Mirrored appointment"
                ),
                Err(e) => tracing::warn!(
                    error = %e,
                    appointment_id = %appointment.id,
                    "Failed to mirror appointment"
                ),
            }
        })
    }

    /// Mirror a confirmed plan into `users/{id}/subscriptions`.
    pub fn subscription_confirmed(&self, plan: PlanId) -> JoinHandle<()> {
        let mirror = self.clone();
        tokio::spawn(async move {
            let Some(user_id) = mirror.remote_user().await else {
                return;
            };
            if let Err(e) = mirror.db.add_subscription_for_user(&user_id, plan).await {
                tracing::warn!(error = %e, plan = %plan, "Failed to mirror subscription");
            }
        })
    }

    async fn remote_user(&self) -> Option<String> {
        if !self.db.is_connected() {
            return None;
        }
        match self.store.get(keys::USER_ID).await {
            Ok(Some(id)) if !id.is_empty() => Some(id),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read remote user ID");
                None
            }
        }
    }
}
