// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Location listing, verification and check-in/checkout routes.

use crate::error::{AppError, Result};
use crate::models::{Coordinates, Location, SessionStatus};
use crate::services::{SessionToken, VerificationResult};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/locations", get(list_locations))
        .route("/api/dealerships", get(list_locations))
        .route("/api/verify-location", post(verify_location))
        .route("/api/checkin", post(checkin))
        .route("/api/checkout", post(checkout))
        .route("/api/status", get(status))
}

fn user_agent(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
}

/// Non-blank string field, or `None`.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ─── Locations ───────────────────────────────────────────────

/// List all registered dealerships.
async fn list_locations(State(state): State<Arc<AppState>>) -> Json<Vec<Location>> {
    let locations = state.verifier.registry().list();
    tracing::debug!(count = locations.len(), "Listing dealerships");
    Json(locations.to_vec())
}

// ─── Verification ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    #[serde(default, alias = "dealership_id")]
    location_id: Option<String>,
    #[serde(default, alias = "user_latitude")]
    latitude: Option<f64>,
    #[serde(default, alias = "user_longitude")]
    longitude: Option<f64>,
}

/// Check the user's position against a dealership without changing state.
async fn verify_location(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: std::result::Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerificationResult>> {
    let Json(req) = payload?;

    let location_id = present(req.location_id);
    let (Some(location_id), Some(latitude), Some(longitude)) =
        (location_id.as_deref(), req.latitude, req.longitude)
    else {
        let mut missing = Vec::new();
        if location_id.is_none() {
            missing.push("location_id");
        }
        if req.latitude.is_none() {
            missing.push("latitude");
        }
        if req.longitude.is_none() {
            missing.push("longitude");
        }
        return Err(AppError::MissingRequiredField(missing));
    };

    let result = state.verifier.verify(
        location_id,
        Coordinates::new(latitude, longitude),
        user_agent(&headers),
    )?;

    Ok(Json(result))
}

// ─── Check-in / Checkout ─────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckinRequest {
    #[serde(default, alias = "dealership_id")]
    location_id: Option<String>,
    #[serde(default, alias = "dealership_name")]
    location_name: Option<String>,
    #[serde(default, alias = "user_latitude")]
    latitude: Option<f64>,
    #[serde(default, alias = "user_longitude")]
    longitude: Option<f64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CheckinResponse {
    pub success: bool,
    pub message: String,
    pub location_name: String,
    pub checkin_time: Option<String>,
    pub distance_meters: f64,
    pub threshold_meters: f64,
}

/// Verify the user's position and, if close enough, check them in.
async fn checkin(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    headers: HeaderMap,
    payload: std::result::Result<Json<CheckinRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(req) = payload?;

    let location_id = present(req.location_id);
    let location_name = present(req.location_name);
    let (Some(location_id), Some(_), Some(latitude), Some(longitude)) = (
        location_id.as_deref(),
        location_name.as_deref(),
        req.latitude,
        req.longitude,
    ) else {
        let mut missing = Vec::new();
        if location_id.is_none() {
            missing.push("location_id");
        }
        if location_name.is_none() {
            missing.push("location_name");
        }
        if req.latitude.is_none() {
            missing.push("latitude");
        }
        if req.longitude.is_none() {
            missing.push("longitude");
        }
        return Err(AppError::MissingRequiredField(missing));
    };

    let coordinates = Coordinates::new(latitude, longitude);
    let verification = state
        .verifier
        .verify(location_id, coordinates, user_agent(&headers))?;

    if !verification.success {
        tracing::info!(
            session = %token,
            location_id,
            distance_meters = verification.distance_meters,
            "Check-in refused: too far from dealership"
        );
        let body = CheckinResponse {
            success: false,
            message: verification.message,
            location_name: verification.location_name,
            checkin_time: None,
            distance_meters: verification.distance_meters,
            threshold_meters: verification.threshold_meters,
        };
        return Ok((StatusCode::FORBIDDEN, Json(body)).into_response());
    }

    // The registry name is authoritative; the client copy is only validated
    let record = state.sessions.check_in(
        &token,
        &verification.location_id,
        &verification.location_name,
        coordinates,
    );

    Ok(Json(CheckinResponse {
        success: true,
        message: format!("Successfully checked in to {}", record.location_name),
        checkin_time: Some(record.checkin_time_display()),
        location_name: record.location_name,
        distance_meters: verification.distance_meters,
        threshold_meters: verification.threshold_meters,
    })
    .into_response())
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
}

/// End the current check-in.
async fn checkout(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<CheckoutResponse>> {
    let record = state.sessions.checkout(&token)?;
    Ok(Json(CheckoutResponse {
        success: true,
        message: format!("Successfully checked out from {}", record.location_name),
    }))
}

/// Current check-in status for this session.
async fn status(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
) -> Json<SessionStatus> {
    Json(state.sessions.state(&token).status())
}
