// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Appointment booking form.
//!
//! Holds the in-progress draft and appends validated appointments to the
//! persisted list:
//! 1. Validate the draft (required fields plus the active selector)
//! 2. Under the list's lock, read the stored appointments
//! 3. Pick an ID not already in use and append the new record
//! 4. Write the whole list back

use crate::error::{AppError, Result};
use crate::models::{Appointment, AppointmentDraft, DraftField};
use crate::storage::{self, keys, KeyLocks, KeyValueStore};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Booking form controller.
pub struct AppointmentForm {
    store: Arc<dyn KeyValueStore>,
    locks: KeyLocks,
    draft: Mutex<AppointmentDraft>,
}

impl AppointmentForm {
    pub fn new(store: Arc<dyn KeyValueStore>, locks: KeyLocks) -> Self {
        Self {
            store,
            locks,
            draft: Mutex::new(AppointmentDraft::default()),
        }
    }

    /// Snapshot of the current draft.
    pub async fn draft(&self) -> AppointmentDraft {
        self.draft.lock().await.clone()
    }

    /// Replace one draft field. Returns the updated draft.
    pub async fn update_field(&self, field: DraftField, value: &str) -> Result<AppointmentDraft> {
        let mut draft = self.draft.lock().await;
        draft
            .set(field, value)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(draft.clone())
    }

    /// Restore the empty form.
    pub async fn reset_draft(&self) {
        *self.draft.lock().await = AppointmentDraft::default();
    }

    /// Book the current draft. The draft is left as it was.
    pub async fn submit(&self) -> Result<Appointment> {
        let draft = self.draft().await;
        self.book(&draft).await
    }

    /// Validate `draft` and append it to the stored appointments.
    pub async fn book(&self, draft: &AppointmentDraft) -> Result<Appointment> {
        let template = draft.to_appointment(String::new()).map_err(|missing| {
            tracing::debug!(missing = %missing, "Booking rejected");
            AppError::Validation(missing)
        })?;

        let appointment = storage::modify_json_list(
            self.store.as_ref(),
            &self.locks,
            keys::APPOINTMENTS,
            move |items| {
                let id = {
                    let taken: HashSet<&str> = items
                        .iter()
                        .filter_map(|item| item.get("id").and_then(Value::as_str))
                        .collect();
                    unused_id(&taken)
                };

                let mut appointment = template;
                appointment.id = id;
                items.push(serde_json::to_value(&appointment)?);
                Ok(appointment)
            },
        )
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to save appointment");
            AppError::Persistence(e)
        })?;

        tracing::info!(
            appointment_id = %appointment.id,
            kind = appointment.target.kind().as_str(),
            date = %appointment.date,
            time = %appointment.time,
            "Appointment booked"
        );

        Ok(appointment)
    }

    /// All stored appointments, oldest first.
    pub async fn appointments(&self) -> Result<Vec<Appointment>> {
        Ok(storage::read_json_list(self.store.as_ref(), keys::APPOINTMENTS).await?)
    }

    /// Stored appointments on one date, ordered by time.
    pub async fn appointments_on(&self, date: &str) -> Result<Vec<Appointment>> {
        let mut day: Vec<Appointment> = self
            .appointments()
            .await?
            .into_iter()
            .filter(|a| a.date == date)
            .collect();
        // Stable, so bookings in the same slot keep their order
        day.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(day)
    }
}

fn unused_id(taken: &HashSet<&str>) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !taken.contains(id.as_str()) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn form(store: &MemoryStore) -> AppointmentForm {
        AppointmentForm::new(Arc::new(store.clone()), KeyLocks::default())
    }

    #[tokio::test]
    async fn test_update_field_rejects_unknown_option() {
        let store = MemoryStore::new();
        let form = form(&store);

        let result = form.update_field(DraftField::Experience, "pro").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(form.draft().await, AppointmentDraft::default());
    }

    #[tokio::test]
    async fn test_reset_draft() {
        let store = MemoryStore::new();
        let form = form(&store);
        form.update_field(DraftField::Name, "Jan").await.unwrap();
        form.reset_draft().await;
        assert!(form.draft().await.name.is_empty());
    }

    #[tokio::test]
    async fn test_appointments_on_sorts_by_time() {
        let store = MemoryStore::new().with_value(
            keys::APPOINTMENTS,
            r#"[
                {"id":"b","appointmentType":"trainer","trainer":"jake","name":"B","email":"b@x","phone":"1","date":"2025-03-01","time":"14:00"},
                {"id":"c","appointmentType":"course","course":"weight-loss","name":"C","email":"c@x","phone":"1","date":"2025-03-02","time":"08:00"},
                {"id":"a","appointmentType":"trainer","trainer":"anna","name":"A","email":"a@x","phone":"1","date":"2025-03-01","time":"09:00"}
            ]"#,
        );
        let form = form(&store);

        let day = form.appointments_on("2025-03-01").await.unwrap();
        let ids: Vec<&str> = day.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_unused_id_avoids_taken() {
        let taken = HashSet::new();
        let id = unused_id(&taken);
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
