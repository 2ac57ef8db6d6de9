// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Dealer Check-in: on-site check-in and hourly activity logging for
//! dealership sales staff.
//!
//! This crate provides the backend API that verifies a salesperson is at
//! the dealership they claim, tracks their check-in session, scores their
//! hourly activity and posts a daily summary to Slack.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use ring::rand::SystemRandom;
use services::{Notifier, SessionManager, VerificationEngine};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub verifier: VerificationEngine,
    pub sessions: SessionManager,
    pub notifier: Arc<dyn Notifier>,
    pub rng: SystemRandom,
}
