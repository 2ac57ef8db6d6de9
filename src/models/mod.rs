// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod location;
pub mod session;

pub use activity::{ActivityEntry, ActivityTotals, Metric};
pub use location::{Coordinates, Location};
pub use session::{CheckinRecord, SessionState, SessionStatus};
