// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dealer Check-in API Server
//!
//! Verifies on-site check-ins at dealerships and forwards daily activity
//! reports to Slack.

use dealer_checkin::{
    config::Config,
    services::{LocationRegistry, SessionManager, SlackNotifier, VerificationEngine},
    AppState,
};
use ring::rand::SystemRandom;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Dealer Check-in API");

    // Load dealership registry
    tracing::info!(path = %config.locations_file, "Loading dealership registry");
    let registry = Arc::new(LocationRegistry::load_from_file(&config.locations_file)?);
    tracing::info!(count = registry.len(), "Dealership registry loaded");

    let verifier = VerificationEngine::from_config(registry, &config);
    tracing::info!(
        mobile_radius_meters = config.mobile_radius_meters,
        desktop_radius_meters = config.desktop_radius_meters,
        test_location = ?config.test_location_id,
        "Location verification configured"
    );

    let notifier = SlackNotifier::new(config.slack_webhook_url.clone(), config.notify_timeout)?;
    if !notifier.is_configured() {
        tracing::warn!("SLACK_WEBHOOK_URL not set; activity reports will not be delivered");
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        verifier,
        sessions: SessionManager::in_memory(config.session_max_age),
        notifier: Arc::new(notifier),
        rng: SystemRandom::new(),
    });

    // Build router
    let app = dealer_checkin::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("dealer_checkin=debug,info")
            }),
        )
        .with(format)
        .init();
}
