// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod appointment;
pub mod catalog;
pub mod remote;
pub mod subscription;

pub use appointment::{
    Appointment, AppointmentDraft, AppointmentKind, AppointmentTarget, DraftField, Experience,
    InvalidFieldValue, MissingFields, SessionDuration,
};
pub use catalog::CatalogEntry;
pub use subscription::{Plan, PlanId, SelectorState, PLANS};
