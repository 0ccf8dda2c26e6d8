// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screen routes and the navigation capability the controllers drive.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Named destinations of the app shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Login,
    Landing,
    Home,
    SubscriptionPicker,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::Landing => "landing",
            Route::Home => "home",
            Route::SubscriptionPicker => "subscription-picker",
        }
    }
}

/// Replace the current screen with `route`.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: Route);
}

/// Navigator that records requested routes.
///
/// The HTTP layer hands one to each controller call and reports the last
/// route to the UI shell, which performs the actual transition.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    pub fn history(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, route: Route) {
        tracing::debug!(route = route.as_str(), "Navigate");
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
