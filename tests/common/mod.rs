// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use dealer_checkin::config::Config;
use dealer_checkin::error::AppError;
use dealer_checkin::routes::create_router;
use dealer_checkin::services::{
    LocationRegistry, Notifier, ReportMessage, SessionManager, SlackNotifier, VerificationEngine,
};
use dealer_checkin::AppState;
use futures_util::future::BoxFuture;
use ring::rand::SystemRandom;
use std::sync::{Arc, Mutex};

/// Coordinates of 401 Kia.
#[allow(dead_code)]
pub const KIA_LAT: f64 = 43.646769;
#[allow(dead_code)]
pub const KIA_LNG: f64 = -79.6359934;

/// A typical phone User-Agent.
#[allow(dead_code)]
pub const MOBILE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
/// A typical desktop User-Agent.
#[allow(dead_code)]
pub const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Notifier that records what it was asked to send.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeNotifier {
    pub fail: bool,
    pub sent: Mutex<Vec<ReportMessage>>,
}

impl FakeNotifier {
    #[allow(dead_code)]
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[allow(dead_code)]
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    #[allow(dead_code)]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Notifier for FakeNotifier {
    fn send<'a>(&'a self, message: &'a ReportMessage) -> BoxFuture<'a, Result<String, AppError>> {
        Box::pin(async move {
            self.sent.lock().unwrap().push(message.clone());
            if self.fail {
                Err(AppError::NotificationDeliveryFailed(
                    "Slack API error: 500 Internal Server Error".to_string(),
                ))
            } else {
                Ok("Successfully sent to Slack".to_string())
            }
        })
    }
}

/// Load the bundled dealership registry.
#[allow(dead_code)]
pub fn test_registry() -> Arc<LocationRegistry> {
    Arc::new(
        LocationRegistry::load_from_file("data/dealership_addresses.txt")
            .expect("Failed to load dealership registry"),
    )
}

/// Create a test app using the given notifier.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_notifier(
    notifier: Arc<dyn Notifier>,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let verifier = VerificationEngine::from_config(test_registry(), &config);
    let sessions = SessionManager::in_memory(config.session_max_age);

    let state = Arc::new(AppState {
        config,
        verifier,
        sessions,
        notifier,
        rng: SystemRandom::new(),
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an unconfigured Slack notifier.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let notifier = SlackNotifier::new(None, config.notify_timeout).expect("Failed to build client");
    create_test_app_with_notifier(Arc::new(notifier))
}

/// Build a JSON POST request, optionally carrying a session cookie.
#[allow(dead_code)]
pub fn post_json(uri: &str, body: serde_json::Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, MOBILE_UA);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a GET request, optionally carrying a session cookie.
#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// The `name=value` part of the session cookie set on a response.
#[allow(dead_code)]
pub fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap())
        .find(|value| value.starts_with("checkin_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
        .unwrap_or_else(|| panic!("missing session cookie"))
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
