// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hourly sales-floor activity model.

use serde::{de, Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A tracked activity counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    QuoteCalls,
    AppointmentsGenerated,
    InPersonAppointments,
    PhoneAppointments,
    CarsSold,
    CarsDelivered,
    AdvertisementsPosted,
}

impl Metric {
    /// All metrics in report order.
    pub const ALL: [Metric; 7] = [
        Metric::QuoteCalls,
        Metric::AppointmentsGenerated,
        Metric::InPersonAppointments,
        Metric::PhoneAppointments,
        Metric::CarsSold,
        Metric::CarsDelivered,
        Metric::AdvertisementsPosted,
    ];

    /// Wire name (matches the JSON field name).
    pub fn key(self) -> &'static str {
        match self {
            Metric::QuoteCalls => "quote_calls",
            Metric::AppointmentsGenerated => "appointments_generated",
            Metric::InPersonAppointments => "in_person_appointments",
            Metric::PhoneAppointments => "phone_appointments",
            Metric::CarsSold => "cars_sold",
            Metric::CarsDelivered => "cars_delivered",
            Metric::AdvertisementsPosted => "advertisements_posted",
        }
    }

    /// Human-readable label for text reports.
    pub fn label(self) -> &'static str {
        match self {
            Metric::QuoteCalls => "Quote Calls",
            Metric::AppointmentsGenerated => "Appointments Generated",
            Metric::InPersonAppointments => "In Person Appointments",
            Metric::PhoneAppointments => "Phone Appointments",
            Metric::CarsSold => "Cars Sold",
            Metric::CarsDelivered => "Cars Delivered",
            Metric::AdvertisementsPosted => "Advertisements Posted",
        }
    }
}

/// One reporting unit (one hour on the floor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityEntry {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub quote_calls: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub appointments_generated: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub in_person_appointments: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub phone_appointments: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub cars_sold: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub cars_delivered: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub advertisements_posted: u32,
    /// Free-text summary of the hour
    #[serde(default)]
    pub description: Option<String>,
}

impl ActivityEntry {
    /// Counter value for a metric.
    pub fn count(&self, metric: Metric) -> u32 {
        match metric {
            Metric::QuoteCalls => self.quote_calls,
            Metric::AppointmentsGenerated => self.appointments_generated,
            Metric::InPersonAppointments => self.in_person_appointments,
            Metric::PhoneAppointments => self.phone_appointments,
            Metric::CarsSold => self.cars_sold,
            Metric::CarsDelivered => self.cars_delivered,
            Metric::AdvertisementsPosted => self.advertisements_posted,
        }
    }

    /// Description with surrounding whitespace removed, if any text remains.
    pub fn highlight(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Per-metric sums across a day's entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityTotals {
    pub quote_calls: u64,
    pub appointments_generated: u64,
    pub in_person_appointments: u64,
    pub phone_appointments: u64,
    pub cars_sold: u64,
    pub cars_delivered: u64,
    pub advertisements_posted: u64,
}

impl ActivityTotals {
    pub fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::QuoteCalls => self.quote_calls,
            Metric::AppointmentsGenerated => self.appointments_generated,
            Metric::InPersonAppointments => self.in_person_appointments,
            Metric::PhoneAppointments => self.phone_appointments,
            Metric::CarsSold => self.cars_sold,
            Metric::CarsDelivered => self.cars_delivered,
            Metric::AdvertisementsPosted => self.advertisements_posted,
        }
    }

    /// Add one entry's counters to the running totals.
    pub fn add_entry(&mut self, entry: &ActivityEntry) {
        self.quote_calls += u64::from(entry.quote_calls);
        self.appointments_generated += u64::from(entry.appointments_generated);
        self.in_person_appointments += u64::from(entry.in_person_appointments);
        self.phone_appointments += u64::from(entry.phone_appointments);
        self.cars_sold += u64::from(entry.cars_sold);
        self.cars_delivered += u64::from(entry.cars_delivered);
        self.advertisements_posted += u64::from(entry.advertisements_posted);
    }
}

/// Counter as sent by the frontend: a JSON number, a numeric string from a
/// form field, or null.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Deserialize a counter, clamping negatives to zero.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCount>::deserialize(deserializer)?;
    match raw {
        None => Ok(0),
        Some(RawCount::Int(v)) => Ok(clamp_count(v)),
        Some(RawCount::Float(v)) => float_count(v).map_err(de::Error::custom),
        Some(RawCount::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0);
            }
            if let Ok(v) = s.parse::<i64>() {
                return Ok(clamp_count(v));
            }
            s.parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid count: {:?}", s)))
                .and_then(|v| float_count(v).map_err(de::Error::custom))
        }
    }
}

fn clamp_count(v: i64) -> u32 {
    v.clamp(0, i64::from(u32::MAX)) as u32
}

fn float_count(v: f64) -> Result<u32, String> {
    if !v.is_finite() {
        return Err(format!("invalid count: {}", v));
    }
    Ok(v.trunc().clamp(0.0, f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_counters_default_to_zero() {
        let entry: ActivityEntry = serde_json::from_value(json!({"cars_sold": 2})).unwrap();
        assert_eq!(entry.cars_sold, 2);
        assert_eq!(entry.quote_calls, 0);
        assert!(entry.description.is_none());
    }

    #[test]
    fn test_negative_counters_are_clamped() {
        let entry: ActivityEntry =
            serde_json::from_value(json!({"quote_calls": -4, "cars_sold": "-1"})).unwrap();
        assert_eq!(entry.quote_calls, 0);
        assert_eq!(entry.cars_sold, 0);
    }

    #[test]
    fn test_form_strings_and_nulls() {
        let entry: ActivityEntry = serde_json::from_value(json!({
            "phone_appointments": "3",
            "cars_delivered": "",
            "appointments_generated": null,
            "advertisements_posted": 2.0
        }))
        .unwrap();
        assert_eq!(entry.phone_appointments, 3);
        assert_eq!(entry.cars_delivered, 0);
        assert_eq!(entry.appointments_generated, 0);
        assert_eq!(entry.advertisements_posted, 2);
    }

    #[test]
    fn test_garbage_counter_is_rejected() {
        let result: Result<ActivityEntry, _> =
            serde_json::from_value(json!({"cars_sold": "lots"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_highlight_ignores_blank_descriptions() {
        let mut entry = ActivityEntry {
            description: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(entry.highlight(), None);

        entry.description = Some("  Walked a client through the lot ".to_string());
        assert_eq!(entry.highlight(), Some("Walked a client through the lot"));
    }

    #[test]
    fn test_metric_keys_match_wire_names() {
        let entry = ActivityEntry {
            in_person_appointments: 7,
            ..Default::default()
        };
        let value = serde_json::to_value(&entry).unwrap();
        for metric in Metric::ALL {
            assert_eq!(
                value[metric.key()].as_u64(),
                Some(u64::from(entry.count(metric)))
            );
        }
    }
}
