// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Every error carries a user-facing `notice` (the Dutch message the app
//! shows) next to the machine-readable `error` code.

use crate::models::{DraftField, MissingFields};
use crate::navigation::{RecordingNavigator, Route};
use crate::storage::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(MissingFields),

    #[error("Storage error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("No subscription selected")]
    NoPendingSelection,

    #[error("No current subscription")]
    NoCurrentSubscription,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    /// Failure reported after the controller already moved to `route`
    #[error("{source}")]
    Navigated {
        route: Route,
        source: Box<AppError>,
    },
}

/// Map a store failure to `AppError`, logging the action that failed.
pub fn storage_failure(action: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |e| {
        tracing::warn!(error = %e, action, "Storage operation failed");
        AppError::Persistence(e)
    }
}

impl AppError {
    /// Attach the last route `nav` recorded, so the client still follows it.
    pub fn with_navigation(self, nav: &RecordingNavigator) -> AppError {
        match nav.last() {
            Some(route) => AppError::Navigated {
                route,
                source: Box::new(self),
            },
            None => self,
        }
    }

    /// Where the client should go next, if anywhere.
    pub fn navigate_to(&self) -> Option<Route> {
        match self {
            AppError::Unauthorized => Some(Route::Login),
            AppError::Navigated { route, .. } => Some(*route),
            _ => None,
        }
    }

    /// Message shown to the member.
    pub fn notice(&self) -> &'static str {
        match self {
            AppError::Validation(missing) => match missing.first() {
                Some(DraftField::Trainer) => "Selecteer een personal trainer",
                Some(DraftField::Course) => "Selecteer een cursus",
                _ => "Vul alle verplichte velden in",
            },
            AppError::UserNotFound(_) => "Gebruiker niet gevonden",
            AppError::NoPendingSelection => "Kies eerst een abonnement",
            AppError::NoCurrentSubscription => "Je hebt geen actief abonnement",
            AppError::Unauthorized => "Log eerst in",
            AppError::BadRequest(_) => "Ongeldige invoer",
            AppError::Persistence(_) | AppError::Remote(_) | AppError::Internal(_) => {
                "Er ging iets mis bij het opslaan."
            }
            AppError::Navigated { source, .. } => source.notice(),
        }
    }

    fn status_parts(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            AppError::Validation(missing) => (
                StatusCode::BAD_REQUEST,
                "validation_failed",
                Some(missing.to_string()),
            ),
            AppError::Persistence(err) => {
                tracing::error!(error = %err, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Remote(msg) => {
                tracing::error!(error = %msg, "Remote store error");
                (StatusCode::BAD_GATEWAY, "remote_error", Some(msg.clone()))
            }
            AppError::UserNotFound(username) => (
                StatusCode::NOT_FOUND,
                "user_not_found",
                Some(username.clone()),
            ),
            AppError::NoPendingSelection => (StatusCode::CONFLICT, "no_pending_selection", None),
            AppError::NoCurrentSubscription => {
                (StatusCode::CONFLICT, "no_current_subscription", None)
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            AppError::Navigated { source, .. } => source.status_parts(),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    notice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    navigate_to: Option<Route>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.status_parts();

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            notice: self.notice().to_string(),
            navigate_to: self.navigate_to(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Navigator;

    #[test]
    fn test_validation_notice_follows_first_missing_field() {
        let contact = AppError::Validation(MissingFields::new(vec![
            DraftField::Trainer,
            DraftField::Phone,
        ]));
        assert_eq!(contact.notice(), "Vul alle verplichte velden in");

        let trainer = AppError::Validation(MissingFields::new(vec![DraftField::Trainer]));
        assert_eq!(trainer.notice(), "Selecteer een personal trainer");

        let course = AppError::Validation(MissingFields::new(vec![DraftField::Course]));
        assert_eq!(course.notice(), "Selecteer een cursus");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                AppError::UserNotFound("jan".into()),
                StatusCode::NOT_FOUND,
            ),
            (AppError::NoPendingSelection, StatusCode::CONFLICT),
            (
                AppError::Persistence(StoreError::Unavailable("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Remote("offline".into()), StatusCode::BAD_GATEWAY),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_with_navigation_keeps_inner_error() {
        let nav = RecordingNavigator::new();
        let err = AppError::NoPendingSelection.with_navigation(&nav);
        assert!(matches!(err, AppError::NoPendingSelection));

        nav.navigate_to(Route::Landing);
        let err = AppError::Persistence(StoreError::Unavailable("down".into()))
            .with_navigation(&nav);
        assert_eq!(err.navigate_to(), Some(Route::Landing));
        assert_eq!(err.notice(), "Er ging iets mis bij het opslaan.");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
