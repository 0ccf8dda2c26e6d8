// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixed picker options for the booking form.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::appointment::SessionDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
}

const fn entry(id: &'static str, name: &'static str) -> CatalogEntry {
    CatalogEntry { id, name }
}

pub const TRAINERS: &[CatalogEntry] = &[
    entry("jake", "Jake - Strength Training"),
    entry("sarah", "Sarah - Cardio & HIIT"),
    entry("mike", "Mike - CrossFit"),
    entry("anna", "Anna - Yoga & Flexibility"),
];

pub const COURSES: &[CatalogEntry] = &[
    entry("beginners-fitness", "Beginners Fitness Course"),
    entry("weight-loss", "Weight Loss Program"),
    entry("strength-building", "Strength Building Course"),
    entry("hiit-intensive", "HIIT Intensive Course"),
];

pub const TIME_SLOTS: &[&str] = &[
    "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
    "18:00", "19:00",
];

/// Duration options as (value, label) entries.
pub fn durations() -> Vec<CatalogEntry> {
    SessionDuration::ALL
        .iter()
        .map(|d| entry(d.as_str(), d.label()))
        .collect()
}

pub fn trainer_name(id: &str) -> Option<&'static str> {
    TRAINERS.iter().find(|t| t.id == id).map(|t| t.name)
}

pub fn course_name(id: &str) -> Option<&'static str> {
    COURSES.iter().find(|c| c.id == id).map(|c| c.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_names() {
        assert_eq!(trainer_name("jake"), Some("Jake - Strength Training"));
        assert_eq!(course_name("hiit-intensive"), Some("HIIT Intensive Course"));
        assert_eq!(trainer_name("bob"), None);
    }

    #[test]
    fn test_time_slots_are_hourly() {
        assert_eq!(TIME_SLOTS.len(), 12);
        assert_eq!(TIME_SLOTS.first(), Some(&"08:00"));
        assert_eq!(TIME_SLOTS.last(), Some(&"19:00"));
    }

    #[test]
    fn test_durations_follow_session_lengths() {
        let durations = durations();
        assert_eq!(durations.len(), 3);
        assert_eq!(durations[0], entry("30", "30 minuten"));
    }
}
