/// Radio session types
use crate::types::{Difficulty, Mbid, SessionId};
use serde::{Deserialize, Serialize};

/// A server-tracked retrieval continuation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,

    pub name: String,

    /// Recordings seen so far; never decreases
    #[serde(rename = "seen")]
    pub seen_count: u64,
}

impl Session {
    pub fn new(id: SessionId, name: impl Into<String>, seen_count: u64) -> Self {
        Self {
            id,
            name: name.into(),
            seen_count,
        }
    }

    /// Label used when listing sessions
    pub fn label(&self) -> String {
        format!("{} (seen: {})", self.name, self.seen_count)
    }
}

/// Body of `POST /session`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Every mbid the session has already seen
    pub ids: Vec<Mbid>,
    pub difficulty: Difficulty,
    pub name: String,
    /// Compiled prompt
    pub prompt: String,
}

/// Body returned by `POST /session`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub id: SessionId,
}
