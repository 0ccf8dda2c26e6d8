// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication gate.
//!
//! Decides at startup whether the member lands on the public landing page or
//! stays in the app, and records login/logout in the persisted auth flag.
//! A flag that cannot be read counts as logged out.

use crate::error::{storage_failure, Result};
use crate::navigation::{Navigator, Route};
use crate::storage::{keys, KeyValueStore, AUTH_TRUE};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// The flag has not been read yet
    Loading,
    Authenticated,
    Unauthenticated,
}

pub struct AuthGate {
    store: Arc<dyn KeyValueStore>,
    status: RwLock<AuthStatus>,
}

impl AuthGate {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            status: RwLock::new(AuthStatus::Loading),
        }
    }

    pub async fn status(&self) -> AuthStatus {
        *self.status.read().await
    }

    /// Resolve the startup status from the stored flag.
    ///
    /// Only the first call reads the store; later calls return the resolved
    /// status without navigating.
    pub async fn start(&self, nav: &dyn Navigator) -> AuthStatus {
        let current = self.status().await;
        if current != AuthStatus::Loading {
            return current;
        }

        let mut status = self.status.write().await;
        if *status != AuthStatus::Loading {
            return *status;
        }

        let resolved = match self.store.get(keys::AUTH).await {
            Ok(Some(flag)) if flag == AUTH_TRUE => AuthStatus::Authenticated,
            Ok(_) => AuthStatus::Unauthenticated,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read auth flag, treating as logged out");
                AuthStatus::Unauthenticated
            }
        };
        *status = resolved;
        drop(status);

        tracing::info!(status = ?resolved, "Auth status resolved");
        if resolved == AuthStatus::Unauthenticated {
            nav.navigate_to(Route::Landing);
        }
        resolved
    }

    /// Persist the auth flag and enter the app.
    ///
    /// The flag is read back before navigating; if it did not stick the
    /// member stays where they are.
    pub async fn login(&self, nav: &dyn Navigator) -> Result<AuthStatus> {
        let mut status = self.status.write().await;
        let was_authenticated = *status == AuthStatus::Authenticated;

        self.store
            .set(keys::AUTH, AUTH_TRUE)
            .await
            .map_err(storage_failure("login"))?;
        let stored = self
            .store
            .get(keys::AUTH)
            .await
            .map_err(storage_failure("login"))?;

        if stored.as_deref() != Some(AUTH_TRUE) {
            tracing::warn!("Auth flag did not persist, staying on login");
            if *status == AuthStatus::Loading {
                *status = AuthStatus::Unauthenticated;
            }
            return Ok(*status);
        }

        *status = AuthStatus::Authenticated;
        drop(status);

        if !was_authenticated {
            tracing::info!("Logged in");
            nav.navigate_to(Route::Home);
        }
        Ok(AuthStatus::Authenticated)
    }

    /// Clear the auth flag and return to the landing page.
    ///
    /// Navigation happens even when the flag could not be removed; the
    /// failure is still reported.
    pub async fn logout(&self, nav: &dyn Navigator) -> Result<()> {
        let removed = self.store.remove(keys::AUTH).await;
        *self.status.write().await = AuthStatus::Unauthenticated;

        tracing::info!("Logged out");
        nav.navigate_to(Route::Landing);

        removed.map_err(storage_failure("logout"))
    }
}
