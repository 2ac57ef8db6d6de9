// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.
//!
//! All displayed and reported timestamps use Eastern time, whatever the
//! server's or the client's local zone happens to be.

use chrono::{DateTime, Utc};
use chrono_tz::{America::Toronto, Tz};

/// Business time zone for check-in times and report dates.
pub const BUSINESS_TZ: Tz = Toronto;

/// Current time in the business time zone.
pub fn now_local() -> DateTime<Tz> {
    to_local(Utc::now())
}

/// Convert a UTC timestamp to the business time zone.
pub fn to_local(date: DateTime<Utc>) -> DateTime<Tz> {
    date.with_timezone(&BUSINESS_TZ)
}

/// Format a local timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(date: &DateTime<Tz>) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the calendar date of a local timestamp as `YYYY-MM-DD`.
pub fn format_date(date: &DateTime<Tz>) -> String {
    date.format("%Y-%m-%d").to_string()
}
