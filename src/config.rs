// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Verification radii and the notifier timeout are tunable here rather than
//! baked into the services that use them.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default path of the dealership registry file.
pub const DEFAULT_LOCATIONS_FILE: &str = "data/dealership_addresses.txt";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Slack incoming webhook URL. `None` means notifications are unavailable.
    pub slack_webhook_url: Option<String>,
    /// Verification radius for phones and tablets (GPS), in meters
    pub mobile_radius_meters: f64,
    /// Verification radius for everything else (WiFi geolocation), in meters
    pub desktop_radius_meters: f64,
    /// Upper bound on a single notification attempt
    pub notify_timeout: Duration,
    /// Registry file to load at startup
    pub locations_file: String,
    /// Location that always passes verification. `None` disables the bypass.
    pub test_location_id: Option<String>,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
    /// Check-ins older than this are dropped from the session store
    pub session_max_age: Duration,
}

impl Config {
    /// Config for tests: no webhook, default radii, short timeout.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            slack_webhook_url: None,
            mobile_radius_meters: 500.0,
            desktop_radius_meters: 2000.0,
            notify_timeout: Duration::from_secs(2),
            locations_file: DEFAULT_LOCATIONS_FILE.to_string(),
            test_location_id: Some("test_site".to_string()),
            cookie_secure: false,
            session_max_age: Duration::from_secs(12 * 3600),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let notify_timeout_secs: u64 = parse_var("NOTIFY_TIMEOUT_SECS", 10)?;
        if notify_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "NOTIFY_TIMEOUT_SECS",
                "must be at least 1".to_string(),
            ));
        }

        let session_max_age_hours: u64 = parse_var("SESSION_MAX_AGE_HOURS", 12)?;
        if session_max_age_hours == 0 {
            return Err(ConfigError::Invalid(
                "SESSION_MAX_AGE_HOURS",
                "must be at least 1".to_string(),
            ));
        }

        let mobile_radius_meters: f64 = parse_var("MOBILE_RADIUS_METERS", 500.0)?;
        let desktop_radius_meters: f64 = parse_var("DESKTOP_RADIUS_METERS", 2000.0)?;
        for (name, value) in [
            ("MOBILE_RADIUS_METERS", mobile_radius_meters),
            ("DESKTOP_RADIUS_METERS", desktop_radius_meters),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(
                    name,
                    format!("{} is not a non-negative distance", value),
                ));
            }
        }

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            slack_webhook_url: non_empty_var("SLACK_WEBHOOK_URL"),
            mobile_radius_meters,
            desktop_radius_meters,
            notify_timeout: Duration::from_secs(notify_timeout_secs),
            locations_file: env::var("LOCATIONS_FILE")
                .unwrap_or_else(|_| DEFAULT_LOCATIONS_FILE.to_string()),
            test_location_id: match env::var("TEST_LOCATION_ID") {
                Ok(v) => Some(v.trim().to_string()).filter(|v| !v.is_empty()),
                Err(_) => Some("test_site".to_string()),
            },
            cookie_secure: parse_var("COOKIE_SECURE", false)?,
            session_max_age: Duration::from_secs(session_max_age_hours * 3600),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid(name, e.to_string())),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so everything env-related lives in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("SLACK_WEBHOOK_URL");
        env::remove_var("TEST_LOCATION_ID");
        env::set_var("MOBILE_RADIUS_METERS", "750");
        env::remove_var("DESKTOP_RADIUS_METERS");
        env::remove_var("NOTIFY_TIMEOUT_SECS");
        env::remove_var("SESSION_MAX_AGE_HOURS");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.mobile_radius_meters, 750.0);
        assert_eq!(config.desktop_radius_meters, 2000.0);
        assert_eq!(config.notify_timeout, Duration::from_secs(10));
        assert_eq!(config.test_location_id.as_deref(), Some("test_site"));
        assert!(config.slack_webhook_url.is_none());
        assert_eq!(config.port, 8080);
        assert_eq!(config.session_max_age, Duration::from_secs(12 * 3600));

        env::set_var("PORT", "eighty");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PORT"));
        env::set_var("PORT", "9090");
        assert_eq!(Config::from_env().unwrap().port, 9090);
        env::remove_var("PORT");

        env::set_var("SESSION_MAX_AGE_HOURS", "0");
        assert!(Config::from_env().is_err());
        env::remove_var("SESSION_MAX_AGE_HOURS");

        env::set_var("MOBILE_RADIUS_METERS", "far");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("MOBILE_RADIUS_METERS"));

        env::set_var("MOBILE_RADIUS_METERS", "-5");
        assert!(Config::from_env().is_err());

        env::remove_var("MOBILE_RADIUS_METERS");
        env::set_var("TEST_LOCATION_ID", "");
        let config = Config::from_env().expect("Config should load");
        assert!(config.test_location_id.is_none());
        env::remove_var("TEST_LOCATION_ID");
    }
}
