// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Appointment booking model: the form draft and the persisted record.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Who the session is booked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum AppointmentKind {
    #[default]
    Trainer,
    Course,
}

impl AppointmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentKind::Trainer => "trainer",
            AppointmentKind::Course => "course",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "trainer" => Some(AppointmentKind::Trainer),
            "course" => Some(AppointmentKind::Course),
            _ => None,
        }
    }
}

/// Session length. Stored as the minute count in a string, as the app does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub enum SessionDuration {
    #[serde(rename = "30")]
    Minutes30,
    #[default]
    #[serde(rename = "60")]
    Minutes60,
    #[serde(rename = "90")]
    Minutes90,
}

impl SessionDuration {
    pub const ALL: [SessionDuration; 3] = [
        SessionDuration::Minutes30,
        SessionDuration::Minutes60,
        SessionDuration::Minutes90,
    ];

    pub fn minutes(&self) -> u32 {
        match self {
            SessionDuration::Minutes30 => 30,
            SessionDuration::Minutes60 => 60,
            SessionDuration::Minutes90 => 90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionDuration::Minutes30 => "30",
            SessionDuration::Minutes60 => "60",
            SessionDuration::Minutes90 => "90",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionDuration::Minutes30 => "30 minuten",
            SessionDuration::Minutes60 => "60 minuten",
            SessionDuration::Minutes90 => "90 minuten",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Beginner => "beginner",
            Experience::Intermediate => "intermediate",
            Experience::Advanced => "advanced",
        }
    }

    /// Label shown on the level buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Experience::Beginner => "Beginner",
            Experience::Intermediate => "Gemiddeld",
            Experience::Advanced => "Gevorderd",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Experience::Beginner),
            "intermediate" => Some(Experience::Intermediate),
            "advanced" => Some(Experience::Advanced),
            _ => None,
        }
    }
}

/// The trainer or course an appointment is booked with.
///
/// Serialized inline into the appointment as `appointmentType` plus a
/// `trainer` or `course` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(tag = "appointmentType", rename_all = "lowercase")]
pub enum AppointmentTarget {
    Trainer {
        #[serde(rename = "trainer")]
        id: String,
    },
    Course {
        #[serde(rename = "course")]
        id: String,
    },
}

impl AppointmentTarget {
    pub fn kind(&self) -> AppointmentKind {
        match self {
            AppointmentTarget::Trainer { .. } => AppointmentKind::Trainer,
            AppointmentTarget::Course { .. } => AppointmentKind::Course,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AppointmentTarget::Trainer { id } | AppointmentTarget::Course { id } => id,
        }
    }
}

/// Accept both string IDs and the numeric timestamps older app versions wrote.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// A booked session as persisted in the local appointment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(flatten)]
    pub target: AppointmentTarget,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Calendar date as picked (`YYYY-MM-DD` from the date picker)
    pub date: String,
    /// Time slot as picked (`HH:MM`)
    pub time: String,
    #[serde(default)]
    pub duration: SessionDuration,
    #[serde(default)]
    pub experience: Experience,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub notes: String,
}

/// Names of the draft fields, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    AppointmentType,
    Name,
    Email,
    Phone,
    Date,
    Time,
    Duration,
    Trainer,
    Course,
    Experience,
    Goals,
    Notes,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::AppointmentType => "appointmentType",
            DraftField::Name => "name",
            DraftField::Email => "email",
            DraftField::Phone => "phone",
            DraftField::Date => "date",
            DraftField::Time => "time",
            DraftField::Duration => "duration",
            DraftField::Trainer => "trainer",
            DraftField::Course => "course",
            DraftField::Experience => "experience",
            DraftField::Goals => "goals",
            DraftField::Notes => "notes",
        }
    }

    /// Parse a form field name. Accepts the snake_case struct names too.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "appointmentType" | "appointment_type" => Some(DraftField::AppointmentType),
            "name" => Some(DraftField::Name),
            "email" => Some(DraftField::Email),
            "phone" => Some(DraftField::Phone),
            "date" => Some(DraftField::Date),
            "time" => Some(DraftField::Time),
            "duration" => Some(DraftField::Duration),
            "trainer" => Some(DraftField::Trainer),
            "course" => Some(DraftField::Course),
            "experience" => Some(DraftField::Experience),
            "goals" => Some(DraftField::Goals),
            "notes" => Some(DraftField::Notes),
            _ => None,
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected value for a draft field.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid value {value:?} for field {field}")]
pub struct InvalidFieldValue {
    pub field: DraftField,
    pub value: String,
}

/// Required fields left empty, in [`DraftField`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(Vec<DraftField>);

impl MissingFields {
    pub fn new(mut fields: Vec<DraftField>) -> Self {
        fields.sort();
        fields.dedup();
        Self(fields)
    }

    /// The field the form should point at.
    pub fn first(&self) -> Option<DraftField> {
        self.0.first().copied()
    }

    pub fn fields(&self) -> &[DraftField] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_errors(errors: &validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        for (field, errs) in errors.field_errors() {
            let name: &str = &field;
            if let Some(parsed) = DraftField::parse(name) {
                fields.push(parsed);
                continue;
            }
            // Struct-level errors carry the field name in their code
            for err in errs.iter() {
                if let Some(parsed) = DraftField::parse(&err.code) {
                    fields.push(parsed);
                }
            }
        }
        Self::new(fields)
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(DraftField::as_str).collect();
        write!(f, "missing required fields: {}", names.join(", "))
    }
}

fn validate_selection(draft: &AppointmentDraft) -> Result<(), ValidationError> {
    match draft.appointment_type {
        AppointmentKind::Trainer if draft.trainer.is_empty() => {
            Err(ValidationError::new("trainer"))
        }
        AppointmentKind::Course if draft.course.is_empty() => Err(ValidationError::new("course")),
        _ => Ok(()),
    }
}

/// In-progress booking form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase", default)]
#[validate(schema(function = "validate_selection", skip_on_field_errors = false))]
pub struct AppointmentDraft {
    pub appointment_type: AppointmentKind,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub date: String,
    #[validate(length(min = 1))]
    pub time: String,
    pub duration: SessionDuration,
    pub trainer: String,
    pub course: String,
    pub experience: Experience,
    pub goals: String,
    pub notes: String,
}

impl AppointmentDraft {
    /// Set one field from its form value.
    ///
    /// Free-text fields take any value. Enumerated fields must name a known
    /// option. Switching the appointment type keeps the trainer and course
    /// selections, only the active one is checked and saved.
    pub fn set(&mut self, field: DraftField, value: &str) -> Result<(), InvalidFieldValue> {
        let invalid = || InvalidFieldValue {
            field,
            value: value.to_string(),
        };

        match field {
            DraftField::AppointmentType => {
                self.appointment_type = AppointmentKind::parse(value).ok_or_else(invalid)?
            }
            DraftField::Duration => {
                self.duration = SessionDuration::parse(value).ok_or_else(invalid)?
            }
            DraftField::Experience => {
                self.experience = Experience::parse(value).ok_or_else(invalid)?
            }
            DraftField::Name => self.name = value.to_string(),
            DraftField::Email => self.email = value.to_string(),
            DraftField::Phone => self.phone = value.to_string(),
            DraftField::Date => self.date = value.to_string(),
            DraftField::Time => self.time = value.to_string(),
            DraftField::Trainer => self.trainer = value.to_string(),
            DraftField::Course => self.course = value.to_string(),
            DraftField::Goals => self.goals = value.to_string(),
            DraftField::Notes => self.notes = value.to_string(),
        }
        Ok(())
    }

    /// Required fields that are still empty.
    pub fn missing_fields(&self) -> MissingFields {
        match self.validate() {
            Ok(()) => MissingFields::new(Vec::new()),
            Err(errors) => MissingFields::from_errors(&errors),
        }
    }

    /// Build the appointment record, or report what is missing.
    pub fn to_appointment(&self, id: impl Into<String>) -> Result<Appointment, MissingFields> {
        if let Err(errors) = self.validate() {
            return Err(MissingFields::from_errors(&errors));
        }

        let target = match self.appointment_type {
            AppointmentKind::Trainer => AppointmentTarget::Trainer {
                id: self.trainer.clone(),
            },
            AppointmentKind::Course => AppointmentTarget::Course {
                id: self.course.clone(),
            },
        };

        Ok(Appointment {
            id: id.into(),
            target,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            duration: self.duration,
            experience: self.experience,
            goals: self.goals.clone(),
            notes: self.notes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled_draft() -> AppointmentDraft {
        AppointmentDraft {
            name: "Jan".to_string(),
            email: "jan@x.nl".to_string(),
            phone: "0612345678".to_string(),
            date: "2025-03-01".to_string(),
            time: "10:00".to_string(),
            trainer: "jake".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_draft() {
        let draft = AppointmentDraft::default();
        assert_eq!(draft.appointment_type, AppointmentKind::Trainer);
        assert_eq!(draft.duration, SessionDuration::Minutes60);
        assert_eq!(draft.experience, Experience::Beginner);
        assert!(draft.name.is_empty());
    }

    #[test]
    fn test_empty_draft_reports_fields_in_order() {
        let missing = AppointmentDraft::default().missing_fields();
        assert_eq!(
            missing.fields(),
            &[
                DraftField::Name,
                DraftField::Email,
                DraftField::Phone,
                DraftField::Date,
                DraftField::Time,
                DraftField::Trainer,
            ]
        );
        assert_eq!(missing.first(), Some(DraftField::Name));
    }

    #[test]
    fn test_trainer_required_only_for_trainer_type() {
        let mut draft = filled_draft();
        draft.trainer.clear();
        assert_eq!(draft.missing_fields().fields(), &[DraftField::Trainer]);

        draft.set(DraftField::AppointmentType, "course").unwrap();
        assert_eq!(draft.missing_fields().fields(), &[DraftField::Course]);

        draft.set(DraftField::Course, "yoga").unwrap();
        assert!(draft.missing_fields().is_empty());
    }

    #[test]
    fn test_set_rejects_unknown_options() {
        let mut draft = AppointmentDraft::default();
        let err = draft.set(DraftField::Duration, "45").unwrap_err();
        assert_eq!(err.field, DraftField::Duration);
        assert!(draft.set(DraftField::Experience, "expert").is_err());
        assert!(draft.set(DraftField::AppointmentType, "group").is_err());

        draft.set(DraftField::Duration, "90").unwrap();
        assert_eq!(draft.duration, SessionDuration::Minutes90);
    }

    #[test]
    fn test_to_appointment_uses_active_selection() {
        let mut draft = filled_draft();
        draft.course = "yoga".to_string();

        let appointment = draft.to_appointment("a-1").unwrap();
        assert_eq!(
            appointment.target,
            AppointmentTarget::Trainer {
                id: "jake".to_string()
            }
        );

        let value = serde_json::to_value(&appointment).unwrap();
        assert_eq!(value["appointmentType"], "trainer");
        assert_eq!(value["trainer"], "jake");
        assert!(value.get("course").is_none());
        assert_eq!(value["duration"], "60");
        assert_eq!(value["experience"], "beginner");
    }

    #[test]
    fn test_appointment_accepts_numeric_legacy_id() {
        let raw = json!({
            "id": 1700000000000u64,
            "appointmentType": "course",
            "course": "yoga",
            "name": "An",
            "email": "an@x.nl",
            "phone": "06",
            "date": "2025-03-02",
            "time": "09:00"
        });
        let appointment: Appointment = serde_json::from_value(raw).unwrap();
        assert_eq!(appointment.id, "1700000000000");
        assert_eq!(appointment.target.kind(), AppointmentKind::Course);
        assert_eq!(appointment.target.id(), "yoga");
        assert_eq!(appointment.duration, SessionDuration::Minutes60);
        assert!(appointment.notes.is_empty());
    }

    #[test]
    fn test_field_names_parse_both_cases() {
        assert_eq!(
            DraftField::parse("appointment_type"),
            Some(DraftField::AppointmentType)
        );
        assert_eq!(
            DraftField::parse("appointmentType"),
            Some(DraftField::AppointmentType)
        );
        assert_eq!(DraftField::parse("address"), None);
        assert_eq!(DraftField::Goals.to_string(), "goals");
    }
}
