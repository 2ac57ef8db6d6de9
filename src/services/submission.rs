// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity submission workflow.
//!
//! 1. Score each hour and total the day
//! 2. Build the summary from the submission and the caller's session
//! 3. Attempt delivery once
//! 4. Check the session out if, and only if, delivery succeeded

use crate::error::{AppError, Result};
use crate::models::{ActivityEntry, CheckinRecord};
use crate::services::notifier::{deliver, DeliveryOutcome};
use crate::services::report::ReportMessage;
use crate::services::scoring::{self, ActivityAggregate, HourScore};
use crate::services::session::SessionToken;
use crate::time_utils::{format_date, now_local};
use crate::AppState;

/// Name used when the client does not send one.
const DEFAULT_SUBJECT: &str = "User";

/// A validated activity submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub entries: Vec<ActivityEntry>,
}

impl Submission {
    /// Validate raw request fields before anything else happens.
    pub fn new(name: Option<String>, activities: Option<Vec<ActivityEntry>>) -> Result<Self> {
        let entries = activities.ok_or(AppError::MissingRequiredField(vec!["activities"]))?;
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
        Ok(Self { name, entries })
    }
}

/// Everything the caller needs to render a response.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub report_date: String,
    pub hours: Vec<HourScore>,
    pub aggregate: ActivityAggregate,
    /// Session record as it was when the submission arrived
    pub checkin: Option<CheckinRecord>,
    pub delivery: DeliveryOutcome,
    pub checked_out: bool,
}

/// Score, report and (on delivery) check out.
pub async fn submit(
    state: &AppState,
    token: &SessionToken,
    submission: &Submission,
) -> SubmissionOutcome {
    let session = state.sessions.state(token);
    let checkin = session.record().cloned();

    let hours = scoring::score_entries(&submission.entries);
    let aggregate = scoring::aggregate(&submission.entries);
    let report_date = format_date(&now_local());

    tracing::info!(
        session = %token,
        name = %submission.name,
        entries = submission.entries.len(),
        total_score = aggregate.total_score,
        checked_in = checkin.is_some(),
        "Processing activity submission"
    );

    let message = ReportMessage::build(
        &submission.name,
        &report_date,
        &submission.entries,
        &aggregate,
        checkin.as_ref(),
    );

    let delivery = deliver(
        state.notifier.as_ref(),
        &message,
        state.config.notify_timeout,
    )
    .await;

    // Transition only after the notifier has returned, and only for the
    // check-in this report covered
    let checked_out = delivery.delivered
        && checkin
            .as_ref()
            .is_some_and(|reported| state.sessions.auto_checkout(token, reported));

    SubmissionOutcome {
        report_date,
        hours,
        aggregate,
        checkin,
        delivery,
        checked_out,
    }
}
