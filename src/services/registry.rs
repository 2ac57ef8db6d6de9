// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dealership registry loading and lookup.
//!
//! The registry is a numbered text list, one dealership per line:
//!
//! ```text
//! 1. 401 Kia: 6435 Dixie Rd, Mississauga, ON
//! ```
//!
//! Coordinates come from a static geocoding table keyed by location id.
//! Names missing from the table load without coordinates.

use crate::models::location::{slugify, Coordinates, Location};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Geocoded dealership positions (latitude, longitude).
const KNOWN_COORDINATES: &[(&str, f64, f64)] = &[
    ("401_infiniti", 43.646769, -79.6359934),
    ("401_kia", 43.646769, -79.6359934),
    ("401_mazda", 43.646769, -79.6359934),
    ("401_mitsubishi_dixie_mitsubishi", 43.6444388, -79.6442699),
    ("401_nissan", 43.646769, -79.6359934),
    ("401_volkswagen", 43.646769, -79.6359934),
    ("agincourt_mazda", 43.8128735, -79.2444342),
    ("audi_barrie", 44.3017312, -79.6823509),
    ("audi_queensway", 43.6154775, -79.5466424),
    ("audi_thornhill", 43.7994946, -79.4212594),
    ("barrie_volkswagen", 44.3592463, -79.692863),
    ("bmw_aurora", 44.0065, -79.4504),
    ("bolton_toyota", 43.8497373, -79.6957908),
    ("frost_gm", 43.7038815, -79.7892515),
    ("markham_acura", 43.8658623, -79.2867289),
    ("markham_honda", 43.8557957, -79.3061335),
    ("markham_kia", 43.8556092, -79.3074614),
    ("meadowvale_honda", 43.5802831, -79.757078),
    ("oakville_honda", 43.4692995, -79.6800906),
    ("thorncrest_ford", 43.61664, -79.5403798),
    ("vaughan_chrysler", 43.8361, -79.5083),
    ("test_site", 43.8850691, -79.4190847),
];

/// Look up the static coordinates for a location id.
pub fn known_coordinates(id: &str) -> Option<Coordinates> {
    KNOWN_COORDINATES
        .iter()
        .find(|(known, _, _)| *known == id)
        .map(|(_, lat, lng)| Coordinates::new(*lat, *lng))
}

/// Read-only set of known locations.
#[derive(Debug, Default, Clone)]
pub struct LocationRegistry {
    locations: Vec<Location>,
    index: HashMap<String, usize>,
}

impl LocationRegistry {
    /// Load the registry from a text file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let text =
            fs::read_to_string(path.as_ref()).map_err(|e| RegistryError::IoError(e.to_string()))?;
        Self::load_from_str(&text)
    }

    /// Parse the registry text format.
    pub fn load_from_str(text: &str) -> Result<Self, RegistryError> {
        let mut locations = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Only numbered lines are entries; anything else is a heading
            if !line.starts_with(|c: char| c.is_ascii_digit()) {
                continue;
            }

            let Some((name_part, address)) = line.split_once(':') else {
                tracing::warn!(line = line_no + 1, "Skipping registry line without address");
                continue;
            };
            let Some((_, name)) = name_part.split_once('.') else {
                continue;
            };

            let name = name.trim();
            if name.is_empty() {
                return Err(RegistryError::ParseError {
                    line: line_no + 1,
                    reason: "empty dealership name".to_string(),
                });
            }

            let coordinates = known_coordinates(&slugify(name));
            if coordinates.is_none() {
                tracing::warn!(name, "No coordinates on file for dealership");
            }
            locations.push(Location::new(name, address.trim(), coordinates));
        }

        let registry = Self::from_locations(locations)?;
        tracing::info!(count = registry.len(), "Loaded dealerships");
        Ok(registry)
    }

    /// Build a registry from already-constructed locations.
    pub fn from_locations(locations: Vec<Location>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(locations.len());
        for (i, location) in locations.iter().enumerate() {
            if index.insert(location.id.clone(), i).is_some() {
                return Err(RegistryError::DuplicateId(location.id.clone()));
            }
        }
        Ok(Self { locations, index })
    }

    /// All locations in registry order.
    pub fn list(&self) -> &[Location] {
        &self.locations
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.index.get(id).map(|&i| &self.locations[i])
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Errors from registry loading.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse registry line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("Duplicate location id: {0}")]
    DuplicateId(String),
}
