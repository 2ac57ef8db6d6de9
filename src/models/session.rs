// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check-in session state.

use crate::models::location::Coordinates;
use crate::time_utils::format_timestamp;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// What we remember about an active check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckinRecord {
    pub location_id: String,
    pub location_name: String,
    /// Position the user reported when checking in
    pub coordinates: Coordinates,
    /// Transition time in the business time zone
    pub checkin_time: DateTime<Tz>,
}

impl CheckinRecord {
    /// Check-in time as displayed to users and in reports.
    pub fn checkin_time_display(&self) -> String {
        format_timestamp(&self.checkin_time)
    }
}

/// Per-session state machine.
///
/// A session is checked in exactly when it carries a record, so a
/// half-populated check-in cannot be represented.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Anonymous,
    CheckedIn(CheckinRecord),
}

impl SessionState {
    pub fn is_checked_in(&self) -> bool {
        matches!(self, SessionState::CheckedIn(_))
    }

    pub fn record(&self) -> Option<&CheckinRecord> {
        match self {
            SessionState::CheckedIn(record) => Some(record),
            SessionState::Anonymous => None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::Anonymous => SessionStatus {
                checked_in: false,
                location_id: None,
                location_name: None,
                checkin_time: None,
            },
            SessionState::CheckedIn(record) => SessionStatus {
                checked_in: true,
                location_id: Some(record.location_id.clone()),
                location_name: Some(record.location_name.clone()),
                checkin_time: Some(record.checkin_time_display()),
            },
        }
    }
}

/// Status query response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionStatus {
    pub checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin_time: Option<String>,
}
