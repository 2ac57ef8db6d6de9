// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session storage and check-in transitions.
//!
//! Sessions are keyed by an opaque token carried in a cookie. Only
//! checked-in sessions occupy storage; a token with no entry is anonymous.

use crate::error::{AppError, Result};
use crate::models::{CheckinRecord, Coordinates, SessionState};
use crate::time_utils::now_local;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::DateTime;
use chrono_tz::Tz;
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Number of random bytes in a session token.
const TOKEN_BYTES: usize = 32;

/// Opaque per-browser session key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token.
    pub fn generate(rng: &SystemRandom) -> Result<Self> {
        let mut bytes = [0u8; TOKEN_BYTES];
        rng.fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
        Ok(Self(URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Accept a token presented by a client if it has the shape we issue.
    pub fn parse(raw: &str) -> Option<Self> {
        let decoded = URL_SAFE_NO_PAD.decode(raw).ok()?;
        (decoded.len() == TOKEN_BYTES).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Enough to correlate log lines without leaking the token
        write!(f, "{}…", &self.0[..self.0.len().min(8)])
    }
}

/// Storage for per-session state.
///
/// Implementations need no cross-request locking: concurrent writes to the
/// same session resolve as last-write-wins.
pub trait SessionStore: Send + Sync {
    /// Current state for a token (anonymous if unknown or expired).
    fn load(&self, token: &SessionToken) -> SessionState;

    /// Replace the state for a token.
    fn save(&self, token: &SessionToken, state: SessionState);

    /// Drop a session, returning the record it held.
    fn clear(&self, token: &SessionToken) -> Option<CheckinRecord>;

    /// Drop a session only if it still holds `expected`.
    fn clear_if(&self, token: &SessionToken, expected: &CheckinRecord) -> Option<CheckinRecord>;
}

/// In-process session store.
///
/// Browsers that drop their cookie never check out, so check-ins older than
/// `max_age` are treated as gone and swept on every write.
pub struct MemorySessionStore {
    sessions: DashMap<SessionToken, CheckinRecord>,
    max_age: Duration,
}

impl MemorySessionStore {
    pub fn new(max_age: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            max_age,
        }
    }

    /// Number of checked-in sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn is_expired(&self, record: &CheckinRecord, now: &DateTime<Tz>) -> bool {
        // A check-in stamped in the future is not expired
        (*now - record.checkin_time)
            .to_std()
            .map(|age| age > self.max_age)
            .unwrap_or(false)
    }

    fn sweep(&self) {
        let now = now_local();
        let before = self.sessions.len();
        self.sessions.retain(|_, record| !self.is_expired(record, &now));
        let swept = before.saturating_sub(self.sessions.len());
        if swept > 0 {
            tracing::debug!(swept, "Dropped expired sessions");
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, token: &SessionToken) -> SessionState {
        let now = now_local();
        if self
            .sessions
            .remove_if(token, |_, record| self.is_expired(record, &now))
            .is_some()
        {
            tracing::info!(session = %token, "Session expired");
            return SessionState::Anonymous;
        }
        self.sessions
            .get(token)
            .map(|record| SessionState::CheckedIn(record.clone()))
            .unwrap_or_default()
    }

    fn save(&self, token: &SessionToken, state: SessionState) {
        match state {
            SessionState::CheckedIn(record) => {
                self.sweep();
                self.sessions.insert(token.clone(), record);
            }
            SessionState::Anonymous => {
                self.sessions.remove(token);
            }
        }
    }

    fn clear(&self, token: &SessionToken) -> Option<CheckinRecord> {
        let now = now_local();
        self.sessions
            .remove(token)
            .map(|(_, record)| record)
            .filter(|record| !self.is_expired(record, &now))
    }

    fn clear_if(&self, token: &SessionToken, expected: &CheckinRecord) -> Option<CheckinRecord> {
        self.sessions
            .remove_if(token, |_, record| record == expected)
            .map(|(_, record)| record)
    }
}

/// Drives the check-in state machine on top of a [`SessionStore`].
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// In-process sessions that expire `max_age` after check-in.
    pub fn in_memory(max_age: Duration) -> Self {
        Self::new(Arc::new(MemorySessionStore::new(max_age)))
    }

    /// Current state; never changes a live session.
    pub fn state(&self, token: &SessionToken) -> SessionState {
        self.store.load(token)
    }

    /// ANONYMOUS or CHECKED_IN -> CHECKED_IN, stamped with the current
    /// business-zone time. Callers must have verified the location first.
    pub fn check_in(
        &self,
        token: &SessionToken,
        location_id: &str,
        location_name: &str,
        coordinates: Coordinates,
    ) -> CheckinRecord {
        let record = CheckinRecord {
            location_id: location_id.to_string(),
            location_name: location_name.to_string(),
            coordinates,
            checkin_time: now_local(),
        };
        self.store.save(token, SessionState::CheckedIn(record.clone()));
        tracing::info!(session = %token, location_id, "Checked in");
        record
    }

    /// CHECKED_IN -> ANONYMOUS on explicit request.
    pub fn checkout(&self, token: &SessionToken) -> Result<CheckinRecord> {
        let record = self.store.clear(token).ok_or(AppError::NotCheckedIn)?;
        tracing::info!(
            session = %token,
            location_id = %record.location_id,
            "Checked out"
        );
        Ok(record)
    }

    /// CHECKED_IN -> ANONYMOUS after a report about `reported` was
    /// delivered. A session that has since checked in again is left alone.
    pub fn auto_checkout(&self, token: &SessionToken, reported: &CheckinRecord) -> bool {
        match self.store.clear_if(token, reported) {
            Some(record) => {
                tracing::info!(
                    session = %token,
                    location_id = %record.location_id,
                    "Auto-checkout after delivered report"
                );
                true
            }
            None => false,
        }
    }
}
