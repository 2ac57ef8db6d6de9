// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily activity summaries for the team channel.
//!
//! [`ReportMessage`] holds the sections of a summary independent of any chat
//! product; [`ReportMessage::to_slack_payload`] renders it as Block Kit JSON.

use crate::models::{ActivityEntry, CheckinRecord, Metric};
use crate::services::scoring::{self, ActivityAggregate};
use serde_json::{json, Value};

/// Location shown for submissions from sessions that never checked in.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Maximum number of hourly highlights carried in one message.
pub const MAX_HIGHLIGHTS: usize = 5;

/// Summary-block order and emoji for each metric.
const SUMMARY_FIELDS: [(Metric, &str, &str); 7] = [
    (Metric::CarsSold, "🚗", "Cars Sold"),
    (Metric::CarsDelivered, "🚚", "Cars Delivered"),
    (Metric::QuoteCalls, "📞", "Quote Calls"),
    (Metric::AppointmentsGenerated, "📅", "Appointments Generated"),
    (Metric::InPersonAppointments, "🤝", "In-Person Appointments"),
    (Metric::PhoneAppointments, "☎️", "Phone Appointments"),
    (Metric::AdvertisementsPosted, "📣", "Advertisements Posted"),
];

/// One described hour worth calling out.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub hour: usize,
    pub description: String,
    pub rating: u8,
}

/// Notifier-agnostic daily summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMessage {
    /// Person the report is about
    pub subject: String,
    /// Report date (`YYYY-MM-DD`, business time zone)
    pub report_date: String,
    pub total_score: u64,
    pub location_name: String,
    pub checkin_time: Option<String>,
    /// (label with emoji, value) in display order
    pub summary: Vec<(String, u64)>,
    pub highlights: Vec<Highlight>,
}

impl ReportMessage {
    /// Assemble a summary from a submission and the session it came from.
    pub fn build(
        subject: &str,
        report_date: &str,
        entries: &[ActivityEntry],
        aggregate: &ActivityAggregate,
        checkin: Option<&CheckinRecord>,
    ) -> Self {
        let summary = SUMMARY_FIELDS
            .iter()
            .map(|(metric, emoji, label)| {
                (format!("{} {}", emoji, label), aggregate.totals.get(*metric))
            })
            .collect();

        let highlights = entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                entry.highlight().map(|description| Highlight {
                    hour: i + 1,
                    description: description.to_string(),
                    rating: scoring::score(entry).rating,
                })
            })
            .take(MAX_HIGHLIGHTS)
            .collect();

        Self {
            subject: subject.to_string(),
            report_date: report_date.to_string(),
            total_score: aggregate.total_score,
            location_name: checkin
                .map(|c| c.location_name.clone())
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            checkin_time: checkin.map(CheckinRecord::checkin_time_display),
            summary,
            highlights,
        }
    }

    pub fn header(&self) -> String {
        format!("📊 Daily Activity Report - {}", self.subject)
    }

    /// Date, score, location and check-in time on one line.
    pub fn context_line(&self) -> String {
        let mut parts = vec![
            format!("*Date:* {}", self.report_date),
            format!("*Total Score:* {} points", self.total_score),
            format!("*📍 Location:* {}", self.location_name),
        ];
        if let Some(time) = &self.checkin_time {
            parts.push(format!("*🕐 Check-in Time:* {}", time));
        }
        parts.join(" | ")
    }

    pub fn highlight_lines(&self) -> Vec<String> {
        self.highlights
            .iter()
            .map(|h| {
                format!(
                    "*Hour {}:* {} {}",
                    h.hour,
                    h.description,
                    scoring::stars(h.rating)
                )
            })
            .collect()
    }

    /// Render as a Slack incoming-webhook payload.
    pub fn to_slack_payload(&self) -> Value {
        let header = self.header();
        let fields: Vec<Value> = self
            .summary
            .iter()
            .map(|(label, value)| json!({"type": "mrkdwn", "text": format!("*{}:* {}", label, value)}))
            .collect();

        let mut blocks = vec![
            json!({
                "type": "header",
                "text": {"type": "plain_text", "text": header}
            }),
            json!({
                "type": "context",
                "elements": [{"type": "mrkdwn", "text": self.context_line()}]
            }),
            json!({
                "type": "section",
                "text": {"type": "mrkdwn", "text": "*📈 Daily Summary:*"}
            }),
            json!({"type": "section", "fields": fields}),
        ];

        let lines = self.highlight_lines();
        if !lines.is_empty() {
            blocks.push(json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*🕐 Hourly Activities:*\n{}", lines.join("\n"))
                }
            }));
        }

        json!({"text": header, "blocks": blocks})
    }
}
