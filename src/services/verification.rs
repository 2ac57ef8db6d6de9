// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Location verification: is the user close enough to the dealership they
//! claim to be at?

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::device::DeviceClass;
use crate::services::distance::haversine_meters;
use crate::services::registry::LocationRegistry;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Verification radii per device class, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub mobile_meters: f64,
    pub desktop_meters: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            mobile_meters: 500.0,
            desktop_meters: 2000.0,
        }
    }
}

impl Thresholds {
    pub fn for_device(&self, device: DeviceClass) -> f64 {
        match device {
            DeviceClass::Mobile => self.mobile_meters,
            DeviceClass::Desktop => self.desktop_meters,
        }
    }
}

/// Outcome of a verification attempt that reached a distance decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VerificationResult {
    pub success: bool,
    pub message: String,
    pub distance_meters: f64,
    pub threshold_meters: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub device: DeviceClass,
    pub location_id: String,
    pub location_name: String,
}

/// Decides whether reported coordinates are acceptably close to a location.
#[derive(Clone)]
pub struct VerificationEngine {
    registry: Arc<LocationRegistry>,
    thresholds: Thresholds,
    test_location_id: Option<String>,
}

impl VerificationEngine {
    pub fn new(
        registry: Arc<LocationRegistry>,
        thresholds: Thresholds,
        test_location_id: Option<String>,
    ) -> Self {
        Self {
            registry,
            thresholds,
            test_location_id,
        }
    }

    /// Build an engine from application config.
    pub fn from_config(registry: Arc<LocationRegistry>, config: &Config) -> Self {
        Self::new(
            registry,
            Thresholds {
                mobile_meters: config.mobile_radius_meters,
                desktop_meters: config.desktop_radius_meters,
            },
            config.test_location_id.clone(),
        )
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    /// Verify a user's position against a location.
    ///
    /// Returns `Ok` with `success: false` when the user is simply too far
    /// away; errors are reserved for requests that cannot be decided.
    pub fn verify(
        &self,
        location_id: &str,
        user: Coordinates,
        user_agent: Option<&str>,
    ) -> Result<VerificationResult> {
        let location = self
            .registry
            .get(location_id)
            .ok_or_else(|| AppError::LocationNotFound(location_id.to_string()))?;

        let device = DeviceClass::classify(user_agent);
        let threshold = self.thresholds.for_device(device);

        if self.test_location_id.as_deref() == Some(location_id) {
            tracing::info!(location_id, "Test location, skipping distance check");
            return Ok(VerificationResult {
                success: true,
                message: format!("Location verified ({})", location.name),
                distance_meters: 0.0,
                threshold_meters: threshold,
                device,
                location_id: location.id.clone(),
                location_name: location.name.clone(),
            });
        }

        if !user.is_valid() {
            return Err(AppError::BadRequest(format!(
                "Coordinates out of range: {}, {}",
                user.latitude, user.longitude
            )));
        }

        let target = location
            .coordinates
            .ok_or_else(|| AppError::LocationDataUnavailable(location.name.clone()))?;

        let distance = haversine_meters(user.into(), target.into());
        let success = distance <= threshold;

        tracing::info!(
            location_id,
            distance_meters = distance,
            threshold_meters = threshold,
            device = %device,
            success,
            "Location verification"
        );

        let message = if success {
            let mut message = format!("Location verified ({})", device);
            if !device.is_mobile() && distance > self.thresholds.mobile_meters {
                message.push_str(&format!(" - PC location accuracy: {:.0}m", distance));
            }
            message
        } else if device.is_mobile() {
            format!(
                "You are {:.0}m away from {}. Please get closer to check in.",
                distance, location.name
            )
        } else {
            format!(
                "PC location shows {:.0}m from {}. This may be due to WiFi location \
                 inaccuracy. Try using your phone or contact your manager.",
                distance, location.name
            )
        };

        Ok(VerificationResult {
            success,
            message,
            distance_meters: distance,
            threshold_meters: threshold,
            device,
            location_id: location.id.clone(),
            location_name: location.name.clone(),
        })
    }
}
