// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! De Kast gym: booking, subscription and login flow of the member app.
//!
//! The controllers in [`services`] own the flow and persist through the
//! [`storage::KeyValueStore`] seam. The binary serves them as a local JSON
//! API for the UI shell.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod services;
pub mod storage;

use config::Config;
use db::FirestoreDb;
use services::{AppointmentForm, AuthGate, RemoteMirror, SubscriptionSelector};
use std::sync::Arc;
use storage::{KeyLocks, KeyValueStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub db: FirestoreDb,
    pub auth_gate: AuthGate,
    pub booking: AppointmentForm,
    pub subscriptions: SubscriptionSelector,
    pub mirror: RemoteMirror,
}

impl AppState {
    /// Wire the controllers to one store.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>, db: FirestoreDb) -> Self {
        let locks = KeyLocks::default();
        Self {
            auth_gate: AuthGate::new(store.clone()),
            booking: AppointmentForm::new(store.clone(), locks),
            subscriptions: SubscriptionSelector::new(store.clone()),
            mirror: RemoteMirror::new(store.clone(), db.clone()),
            config,
            store,
            db,
        }
    }
}
