// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth gate middleware.

use crate::error::AppError;
use crate::navigation::RecordingNavigator;
use crate::services::AuthStatus;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires the auth gate to be open.
///
/// Resolves the gate on first use when the binary did not already do so.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let nav = RecordingNavigator::new();
    match state.auth_gate.start(&nav).await {
        AuthStatus::Authenticated => Ok(next.run(request).await),
        status => {
            tracing::debug!(
                status = ?status,
                path = %request.uri().path(),
                "Rejected request while logged out"
            );
            Err(AppError::Unauthorized)
        }
    }
}
