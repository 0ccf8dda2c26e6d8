// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, logout and registration routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::Navigated;
use crate::error::{AppError, Result};
use crate::models::PlanId;
use crate::navigation::{Navigator, RecordingNavigator, Route};
use crate::services::AuthStatus;
use crate::storage::keys;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/status", get(status))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/register", post(register))
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatusResponse {
    pub status: AuthStatus,
}

async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let nav = RecordingNavigator::new();
    let status = state.auth_gate.start(&nav).await;
    Json(StatusResponse { status })
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// Remote account to log in as; a local-only login when absent
    #[serde(default)]
    pub username: Option<String>,
}

/// Log in, optionally against a remote account.
async fn login(
    State(state): State<Arc<AppState>>,
    body: Option<Json<LoginRequest>>,
) -> Result<Json<Navigated<StatusResponse>>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();

    if let Some(username) = request.username.as_deref().map(str::trim) {
        if username.is_empty() {
            return Err(AppError::BadRequest("username must not be empty".to_string()));
        }
        let user = state
            .db
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))?;

        state.store.set(keys::USER_ID, &user.id).await?;
        tracing::info!(user_id = %user.id, "Remote user found");
    }

    let nav = RecordingNavigator::new();
    state.auth_gate.start(&nav).await;
    // The startup redirect is not part of this response
    let nav = RecordingNavigator::new();
    let status = state.auth_gate.login(&nav).await?;

    Ok(Json(Navigated::new(StatusResponse { status }, &nav)))
}

async fn logout(State(state): State<Arc<AppState>>) -> Result<Json<Navigated<StatusResponse>>> {
    let nav = RecordingNavigator::new();
    state
        .auth_gate
        .logout(&nav)
        .await
        .map_err(|e| e.with_navigation(&nav))?;
    let status = state.auth_gate.status().await;
    Ok(Json(Navigated::new(StatusResponse { status }, &nav)))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subscription: Option<PlanId>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterResponse {
    pub user_id: String,
    pub subscription_id: Option<String>,
    pub status: AuthStatus,
}

/// Create a remote account and log in as it.
///
/// Without a plan the member is sent to the plan picker next.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Navigated<RegisterResponse>>> {
    let name = request.name.trim();
    let email = request.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::BadRequest(
            "name and email are required".to_string(),
        ));
    }

    let (user_id, subscription_id) = state
        .db
        .create_user(name, email, request.subscription)
        .await?;

    state.store.set(keys::USER_ID, &user_id).await?;
    if let Some(plan) = request.subscription {
        state.store.set(keys::SUBSCRIPTION, plan.as_str()).await?;
    }

    let nav = RecordingNavigator::new();
    state.auth_gate.start(&nav).await;
    let nav = RecordingNavigator::new();
    let status = state.auth_gate.login(&nav).await?;
    if request.subscription.is_none() && status == AuthStatus::Authenticated {
        nav.navigate_to(Route::SubscriptionPicker);
    }

    Ok(Json(Navigated::new(
        RegisterResponse {
            user_id,
            subscription_id,
            status,
        },
        &nav,
    )))
}
