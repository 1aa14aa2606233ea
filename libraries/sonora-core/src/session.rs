//! Session manager
//!
//! Keeps the set of active radio sessions. A session is born from a
//! prompt-sourced retrieval that filled a whole page, grows its seen count
//! with every session-sourced retrieval, and disappears when the user deletes
//! it or the backend reports it exhausted.

use crate::error::{RadioError, Result};
use crate::request::ExclusionSet;
use crate::types::{CreateSessionRequest, Difficulty, Recording, Session, SessionId};
use tracing::{debug, info};

/// Maximum number of recordings the backend returns per retrieval
pub const PAGE_SIZE: usize = 50;

/// What a prompt-sourced retrieval contributes to a new session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSeed {
    pub request: CreateSessionRequest,
    pub seen_count: u64,
}

impl SessionSeed {
    /// Derive the seed from a prompt retrieval.
    ///
    /// Fails with `NotEligible` unless the page was full.
    pub fn from_retrieval(
        prompt: &str,
        difficulty: Difficulty,
        excluded: &ExclusionSet,
        name: &str,
        recordings: &[Recording],
    ) -> Result<Self> {
        let returned = recordings.len();
        if returned != PAGE_SIZE {
            return Err(RadioError::not_eligible(format!(
                "fewer than {} tracks were returned ({}), a radio session was not created",
                PAGE_SIZE, returned
            )));
        }

        let mut seen = excluded.clone();
        seen.extend_with_recordings(recordings);

        Ok(Self {
            request: CreateSessionRequest {
                ids: seen.to_vec(),
                difficulty,
                name: name.to_string(),
                prompt: prompt.to_string(),
            },
            seen_count: (excluded.len() + returned) as u64,
        })
    }
}

/// Active sessions, in the order they became known
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Vec<Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the known sessions with the backend's list
    pub fn load(&mut self, sessions: Vec<Session>) {
        debug!(count = sessions.len(), "Loaded sessions");
        self.sessions = sessions;
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Register the session the backend created from `seed`
    pub fn create(&mut self, id: SessionId, seed: &SessionSeed) -> Session {
        let session = Session::new(id, seed.request.name.clone(), seed.seen_count);
        info!(session_id = %id, name = %session.name, seen = session.seen_count, "Session created");

        // A re-created id replaces the stale entry rather than duplicating it
        self.sessions.retain(|s| s.id != id);
        self.sessions.push(session.clone());
        session
    }

    /// Account for a successful session-sourced retrieval.
    pub fn record_retrieval(&mut self, id: SessionId, count: usize) -> Result<&Session> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RadioError::not_found("Session", id.to_string()))?;

        session.seen_count = session.seen_count.saturating_add(count as u64);
        debug!(session_id = %id, seen = session.seen_count, "Session advanced");
        Ok(session)
    }

    /// Drop a session from the active set.
    ///
    /// Returns `NotFound` if it is already gone; callers treat that as a
    /// no-op.
    pub fn delete(&mut self, id: SessionId) -> Result<Session> {
        let position = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RadioError::not_found("Session", id.to_string()))?;

        Ok(self.sessions.remove(position))
    }
}
