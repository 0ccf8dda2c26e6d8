// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subscription selector.
//!
//! Picking a plan only marks it pending; it becomes the member's plan once
//! confirmed. The confirmed plan is a single stored value.

use crate::error::{storage_failure, AppError, Result};
use crate::models::{PlanId, SelectorState};
use crate::navigation::{Navigator, Route};
use crate::storage::{keys, KeyValueStore};
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct SubscriptionSelector {
    store: Arc<dyn KeyValueStore>,
    pending: Mutex<Option<PlanId>>,
}

impl SubscriptionSelector {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            pending: Mutex::new(None),
        }
    }

    /// The confirmed plan, if any.
    ///
    /// A stored value that names no known plan counts as no plan.
    pub async fn current(&self) -> Result<Option<PlanId>> {
        let stored = self
            .store
            .get(keys::SUBSCRIPTION)
            .await
            .map_err(storage_failure("read"))?;
        Ok(stored_plan(stored.as_deref()))
    }

    pub async fn state(&self) -> SelectorState {
        match *self.pending.lock().await {
            Some(plan) => SelectorState::PendingConfirmation { plan },
            None => SelectorState::Idle,
        }
    }

    /// Mark `plan` as pending, replacing any earlier choice.
    pub async fn choose(&self, plan: PlanId) -> SelectorState {
        *self.pending.lock().await = Some(plan);
        tracing::debug!(plan = %plan, "Plan chosen");
        SelectorState::PendingConfirmation { plan }
    }

    /// Drop the pending choice without touching the stored plan.
    pub async fn dismiss(&self) {
        *self.pending.lock().await = None;
    }

    /// Store the pending plan as current and go home.
    ///
    /// If the write fails the plan stays pending so it can be confirmed again.
    pub async fn confirm(&self, nav: &dyn Navigator) -> Result<PlanId> {
        let mut pending = self.pending.lock().await;
        let plan = (*pending).ok_or(AppError::NoPendingSelection)?;

        self.store
            .set(keys::SUBSCRIPTION, plan.as_str())
            .await
            .map_err(storage_failure("confirm"))?;

        *pending = None;
        drop(pending);

        tracing::info!(plan = %plan, "Subscription confirmed");
        nav.navigate_to(Route::Home);
        Ok(plan)
    }

    /// Remove the stored plan and go home.
    ///
    /// Fails with `NoCurrentSubscription` whenever `current()` would report
    /// no plan, including for an unrecognised stored value.
    pub async fn cancel_current(&self, nav: &dyn Navigator) -> Result<()> {
        let mut pending = self.pending.lock().await;

        let stored = self
            .store
            .get(keys::SUBSCRIPTION)
            .await
            .map_err(storage_failure("read"))?;
        let plan = stored_plan(stored.as_deref()).ok_or(AppError::NoCurrentSubscription)?;

        self.store
            .remove(keys::SUBSCRIPTION)
            .await
            .map_err(storage_failure("cancel"))?;

        *pending = None;
        drop(pending);

        tracing::info!(plan = %plan, "Subscription cancelled");
        nav.navigate_to(Route::Home);
        Ok(())
    }
}

fn stored_plan(raw: Option<&str>) -> Option<PlanId> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
    let plan = PlanId::parse(raw);
    if plan.is_none() {
        tracing::warn!(value = %raw, "Ignoring unknown stored plan");
    }
    plan
}
