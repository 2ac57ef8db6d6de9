// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text daily log for download.

use crate::models::{ActivityEntry, Metric};
use crate::services::scoring::{self, ActivityAggregate};
use std::fmt::Write as _;

/// Header information for an exported log.
#[derive(Debug, Clone)]
pub struct ExportHeader<'a> {
    pub name: &'a str,
    pub date: &'a str,
    pub location_name: &'a str,
    pub checkin_time: Option<&'a str>,
}

/// Render the per-hour breakdown and daily totals as line-oriented text.
pub fn render_daily_log(
    header: &ExportHeader<'_>,
    entries: &[ActivityEntry],
    aggregate: &ActivityAggregate,
) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Daily Activity Log - {}", header.name);
    let _ = writeln!(out, "Date: {}", header.date);
    let _ = writeln!(out, "Location: {}", header.location_name);
    if let Some(time) = header.checkin_time {
        let _ = writeln!(out, "Check-in Time: {}", time);
    }
    out.push_str(&"-".repeat(50));
    out.push('\n');

    for (hour, entry) in scoring::score_entries(entries).iter().zip(entries) {
        let _ = writeln!(out, "\nHour {}:", hour.hour);
        let _ = writeln!(
            out,
            "Activity Description: {}",
            entry.description.as_deref().unwrap_or("")
        );
        for metric in Metric::ALL {
            let _ = writeln!(out, "{}: {}", metric.label(), entry.count(metric));
        }
        let _ = writeln!(out, "Productivity Rating: {} stars", hour.rating);
    }

    let rule = "=".repeat(50);
    let _ = writeln!(out, "\n{}", rule);
    out.push_str("DAILY SUMMARY\n");
    let _ = writeln!(out, "{}", rule);
    for metric in Metric::ALL {
        let _ = writeln!(out, "Total {}: {}", metric.label(), aggregate.totals.get(metric));
    }
    let _ = write!(out, "Total Score: {}", aggregate.total_score);

    out
}

/// Download filename for a log, with anything outside `[A-Za-z0-9_-]`
/// replaced so it is safe in a Content-Disposition header.
pub fn export_filename(name: &str, date: &str) -> String {
    let safe: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = if safe.is_empty() { "User".to_string() } else { safe };
    format!("Daily_Activity_Log_{}_{}.txt", safe, date)
}
