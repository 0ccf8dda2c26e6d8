// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the app's controllers.

pub mod auth_gate;
pub mod booking;
pub mod mirror;
pub mod subscription;

pub use auth_gate::{AuthGate, AuthStatus};
pub use booking::AppointmentForm;
pub use mirror::RemoteMirror;
pub use subscription::SubscriptionSelector;
