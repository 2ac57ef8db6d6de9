// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity rating, reporting and export routes.

use super::{SLACK_MESSAGE_HEADER, SLACK_STATUS_HEADER};
use crate::error::Result;
use crate::models::{ActivityEntry, ActivityTotals};
use crate::services::export::{export_filename, render_daily_log, ExportHeader};
use crate::services::report::UNKNOWN_LOCATION;
use crate::services::scoring::{self, HourScore, ScoreResult};
use crate::services::submission::{self, Submission, SubmissionOutcome};
use crate::services::SessionToken;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities/calculate-rating", post(calculate_rating))
        .route("/api/activities/slack", post(send_report))
        .route("/api/send-to-slack", post(send_report))
        .route("/api/activities/export", post(export_report))
        .route("/api/activities/pdf", post(export_report))
}

// ─── Rating ──────────────────────────────────────────────────

/// Score a single hour.
async fn calculate_rating(
    payload: std::result::Result<Json<ActivityEntry>, JsonRejection>,
) -> Result<Json<ScoreResult>> {
    let Json(entry) = payload?;
    Ok(Json(scoring::score(&entry)))
}

// ─── Submission ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    activities: Option<Vec<ActivityEntry>>,
}

impl SubmissionRequest {
    fn validate(self) -> Result<Submission> {
        Submission::new(self.name, self.activities)
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubmissionResponse {
    /// Whether the report reached Slack
    pub success: bool,
    pub message: String,
    pub checked_out: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_score: u64,
    pub totals: ActivityTotals,
    pub hours: Vec<HourScore>,
}

impl From<SubmissionOutcome> for SubmissionResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            success: outcome.delivery.delivered,
            message: outcome.delivery.detail,
            checked_out: outcome.checked_out,
            total_score: outcome.aggregate.total_score,
            totals: outcome.aggregate.totals,
            hours: outcome.hours,
        }
    }
}

/// Post the day's activity to Slack.
async fn send_report(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    payload: std::result::Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<Json<SubmissionResponse>> {
    let Json(req) = payload?;
    let submission = req.validate()?;

    let outcome = submission::submit(&state, &token, &submission).await;
    Ok(Json(outcome.into()))
}

/// Post the day's activity to Slack and return it as a text download.
async fn export_report(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<SessionToken>,
    payload: std::result::Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(req) = payload?;
    let submission = req.validate()?;

    let outcome = submission::submit(&state, &token, &submission).await;

    let checkin_time = outcome.checkin.as_ref().map(|c| c.checkin_time_display());
    let log_header = ExportHeader {
        name: &submission.name,
        date: &outcome.report_date,
        location_name: outcome
            .checkin
            .as_ref()
            .map(|c| c.location_name.as_str())
            .unwrap_or(UNKNOWN_LOCATION),
        checkin_time: checkin_time.as_deref(),
    };
    let body = render_daily_log(&log_header, &submission.entries, &outcome.aggregate);
    let filename = export_filename(&submission.name, &outcome.report_date);

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| anyhow::anyhow!("Invalid export filename: {}", e))?;
    let slack_status = if outcome.delivery.delivered {
        HeaderValue::from_static("success")
    } else {
        HeaderValue::from_static("error")
    };

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
            (SLACK_STATUS_HEADER, slack_status),
            (SLACK_MESSAGE_HEADER, header_safe(&outcome.delivery.detail)),
        ],
        body,
    )
        .into_response())
}

/// Header value for free text, replacing anything that is not printable
/// ASCII.
fn header_safe(text: &str) -> HeaderValue {
    let cleaned: String = text
        .chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect();
    HeaderValue::from_str(&cleaned).unwrap_or_else(|_| HeaderValue::from_static(""))
}
