// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for logged-in members.

use super::Navigated;
use crate::error::{AppError, Result};
use crate::models::catalog::{self, CatalogEntry};
use crate::models::remote::{Course, CourseEnrollment, RemoteAppointment, SubscriptionOffer};
use crate::models::{Appointment, AppointmentDraft, DraftField, Plan, PlanId, SelectorState, PLANS};
use crate::navigation::RecordingNavigator;
use crate::storage::keys;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require an open auth gate).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/catalog", get(get_catalog))
        .route(
            "/api/appointments/draft",
            get(get_draft).patch(update_draft).delete(reset_draft),
        )
        .route(
            "/api/appointments",
            get(list_appointments).post(submit_appointment),
        )
        .route(
            "/api/subscription",
            get(get_subscription).delete(cancel_subscription),
        )
        .route("/api/subscription/choose", post(choose_plan))
        .route("/api/subscription/confirm", post(confirm_plan))
        .route("/api/subscription/dismiss", post(dismiss_plan))
        .route("/api/appointments/remote", get(list_remote_appointments))
        .route("/api/courses", get(list_courses))
        .route("/api/offers", get(list_offers))
        .route("/api/me/courses", get(my_courses).post(enroll_in_course))
        .route("/api/me/appointments", get(my_appointments))
}

// ─── Catalog ─────────────────────────────────────────────────

/// Everything the booking and plan screens offer.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CatalogResponse {
    pub plans: &'static [Plan],
    pub trainers: &'static [CatalogEntry],
    pub courses: &'static [CatalogEntry],
    pub time_slots: &'static [&'static str],
    pub durations: Vec<CatalogEntry>,
}

async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        plans: &PLANS,
        trainers: catalog::TRAINERS,
        courses: catalog::COURSES,
        time_slots: catalog::TIME_SLOTS,
        durations: catalog::durations(),
    })
}

// ─── Booking ─────────────────────────────────────────────────

async fn get_draft(State(state): State<Arc<AppState>>) -> Json<AppointmentDraft> {
    Json(state.booking.draft().await)
}

#[derive(Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    pub value: String,
}

async fn update_draft(
    State(state): State<Arc<AppState>>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<AppointmentDraft>> {
    let field = DraftField::parse(&update.field)
        .ok_or_else(|| AppError::BadRequest(format!("unknown field {:?}", update.field)))?;
    let draft = state.booking.update_field(field, &update.value).await?;
    Ok(Json(draft))
}

async fn reset_draft(State(state): State<Arc<AppState>>) -> Json<AppointmentDraft> {
    state.booking.reset_draft().await;
    Json(state.booking.draft().await)
}

/// Book the current draft.
async fn submit_appointment(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Appointment>)> {
    let appointment = state.booking.submit().await?;
    state.mirror.appointment_booked(&appointment);
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[derive(Deserialize)]
struct AppointmentsQuery {
    /// Only this calendar date, ordered by time
    date: Option<String>,
}

async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<Vec<Appointment>>> {
    let appointments = match query.date.as_deref() {
        Some(date) => state.booking.appointments_on(date).await?,
        None => state.booking.appointments().await?,
    };
    Ok(Json(appointments))
}

// ─── Subscription ────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubscriptionResponse {
    pub current: Option<PlanId>,
    pub pending: Option<PlanId>,
    pub selector: SelectorState,
}

async fn subscription_response(state: &AppState) -> Result<SubscriptionResponse> {
    let current = state.subscriptions.current().await?;
    let selector = state.subscriptions.state().await;
    let pending = match selector {
        SelectorState::PendingConfirmation { plan } => Some(plan),
        SelectorState::Idle => None,
    };
    Ok(SubscriptionResponse {
        current,
        pending,
        selector,
    })
}

async fn get_subscription(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SubscriptionResponse>> {
    Ok(Json(subscription_response(&state).await?))
}

#[derive(Deserialize)]
pub struct ChooseRequest {
    pub plan: PlanId,
}

async fn choose_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChooseRequest>,
) -> Result<Json<SubscriptionResponse>> {
    state.subscriptions.choose(request.plan).await;
    Ok(Json(subscription_response(&state).await?))
}

async fn confirm_plan(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Navigated<SubscriptionResponse>>> {
    let nav = RecordingNavigator::new();
    let plan = state.subscriptions.confirm(&nav).await?;
    state.mirror.subscription_confirmed(plan);
    let body = subscription_response(&state)
        .await
        .map_err(|e| e.with_navigation(&nav))?;
    Ok(Json(Navigated::new(body, &nav)))
}

async fn dismiss_plan(State(state): State<Arc<AppState>>) -> Result<Json<SubscriptionResponse>> {
    state.subscriptions.dismiss().await;
    Ok(Json(subscription_response(&state).await?))
}

async fn cancel_subscription(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Navigated<SubscriptionResponse>>> {
    let nav = RecordingNavigator::new();
    state.subscriptions.cancel_current(&nav).await?;
    let body = subscription_response(&state)
        .await
        .map_err(|e| e.with_navigation(&nav))?;
    Ok(Json(Navigated::new(body, &nav)))
}

// ─── Remote catalog and member data ──────────────────────────

async fn list_courses(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Course>>> {
    Ok(Json(state.db.list_courses().await?))
}

async fn list_offers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<SubscriptionOffer>>> {
    Ok(Json(state.db.list_subscription_offers().await?))
}

/// Every appointment in the remote store, for the gym-wide agenda.
async fn list_remote_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RemoteAppointment>>> {
    Ok(Json(state.db.list_all_appointments().await?))
}

/// Remote account linked by the last remote login or registration.
async fn remote_user_id(state: &AppState) -> Result<String> {
    match state.store.get(keys::USER_ID).await? {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(AppError::BadRequest(
            "no remote account linked; log in with a username first".to_string(),
        )),
    }
}

async fn my_courses(State(state): State<Arc<AppState>>) -> Result<Json<Vec<CourseEnrollment>>> {
    let user_id = remote_user_id(&state).await?;
    Ok(Json(state.db.list_courses_for_user(&user_id).await?))
}

#[derive(Deserialize)]
pub struct EnrollRequest {
    #[serde(rename = "type")]
    pub course_type: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EnrollResponse {
    pub id: String,
}

async fn enroll_in_course(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollResponse>)> {
    if request.course_type.trim().is_empty() {
        return Err(AppError::BadRequest("course type is required".to_string()));
    }
    let user_id = remote_user_id(&state).await?;
    let id = state
        .db
        .add_user_to_course(&user_id, request.course_type.trim())
        .await?;
    Ok((StatusCode::CREATED, Json(EnrollResponse { id })))
}

async fn my_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RemoteAppointment>>> {
    let user_id = remote_user_id(&state).await?;
    Ok(Json(state.db.list_appointments_for_user(&user_id).await?))
}
