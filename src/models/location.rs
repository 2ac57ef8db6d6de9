// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dealership location model.

use geo::Point;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// WGS84 coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinates {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True if both components are finite and inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(c: Coordinates) -> Self {
        // geo points are (x, y) = (longitude, latitude)
        Point::new(c.longitude, c.latitude)
    }
}

/// A registered dealership users can check into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Location {
    /// Slug derived from the name (e.g. "401_kia")
    pub id: String,
    /// Display name (e.g. "401 Kia")
    pub name: String,
    /// Street address as listed in the registry
    pub address: String,
    /// Geocoded position, if known
    pub coordinates: Option<Coordinates>,
}

impl Location {
    /// Build a location, deriving its id from the name.
    pub fn new(name: &str, address: &str, coordinates: Option<Coordinates>) -> Self {
        Self {
            id: slugify(name),
            name: name.to_string(),
            address: address.to_string(),
            coordinates,
        }
    }
}

/// Derive a location id from its name: lowercase, spaces become
/// underscores, parentheses are dropped.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}
