// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity scoring and daily aggregation.
//!
//! One weight table drives every score we show: the rating endpoint, the
//! exported log, and the Slack highlights.

use crate::models::{ActivityEntry, ActivityTotals, Metric};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Points per unit of each metric.
pub fn weight(metric: Metric) -> u64 {
    match metric {
        Metric::QuoteCalls => 1,
        Metric::AppointmentsGenerated => 2,
        Metric::InPersonAppointments => 4,
        Metric::PhoneAppointments => 3,
        Metric::CarsSold => 10,
        Metric::CarsDelivered => 8,
        Metric::AdvertisementsPosted => 1,
    }
}

/// Inclusive lower score bounds for 5, 4, 3 and 2 stars.
const RATING_BREAKPOINTS: [(u64, u8); 4] = [(20, 5), (15, 4), (10, 3), (5, 2)];

/// Score and star rating for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScoreResult {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub score: u64,
    pub rating: u8,
}

/// Score for a numbered hour of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HourScore {
    /// 1-indexed position in the submission
    pub hour: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub score: u64,
    pub rating: u8,
}

/// Totals across a day's entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityAggregate {
    pub totals: ActivityTotals,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_score: u64,
}

/// Star rating (1-5) for a score.
pub fn rating_for(score: u64) -> u8 {
    RATING_BREAKPOINTS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, stars)| *stars)
        .unwrap_or(1)
}

/// Weighted score of a single entry.
pub fn score(entry: &ActivityEntry) -> ScoreResult {
    let score = Metric::ALL
        .iter()
        .map(|&m| u64::from(entry.count(m)) * weight(m))
        .sum();
    ScoreResult {
        score,
        rating: rating_for(score),
    }
}

/// Weighted score of already-summed totals.
pub fn score_totals(totals: &ActivityTotals) -> u64 {
    Metric::ALL
        .iter()
        .map(|&m| totals.get(m) * weight(m))
        .sum()
}

/// Score every entry, numbering hours from 1.
pub fn score_entries(entries: &[ActivityEntry]) -> Vec<HourScore> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let ScoreResult { score, rating } = score(entry);
            HourScore {
                hour: i + 1,
                score,
                rating,
            }
        })
        .collect()
}

/// Field-wise totals plus the sum of per-entry scores.
pub fn aggregate(entries: &[ActivityEntry]) -> ActivityAggregate {
    entries
        .iter()
        .fold(ActivityAggregate::default(), |mut acc, entry| {
            acc.totals.add_entry(entry);
            acc.total_score += score(entry).score;
            acc
        })
}

/// Render a rating as star emoji.
pub fn stars(rating: u8) -> String {
    "⭐".repeat(usize::from(rating))
}
