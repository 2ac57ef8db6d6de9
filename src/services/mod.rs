// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod device;
pub mod distance;
pub mod export;
pub mod notifier;
pub mod registry;
pub mod report;
pub mod scoring;
pub mod session;
pub mod submission;
pub mod verification;

pub use device::DeviceClass;
pub use notifier::{DeliveryOutcome, Notifier, SlackNotifier};
pub use registry::LocationRegistry;
pub use report::ReportMessage;
pub use session::{MemorySessionStore, SessionManager, SessionStore, SessionToken};
pub use verification::{Thresholds, VerificationEngine, VerificationResult};
