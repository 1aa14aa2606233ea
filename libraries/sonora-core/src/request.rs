//! Radio request builder
//!
//! A radio request pairs a source (a freshly compiled prompt or an existing
//! session) with the set of mbids the backend must not return again.

use crate::types::{Difficulty, Mbid, Recording, SessionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of previously returned catalog ids.
///
/// Ordered so that serialized requests are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet(BTreeSet<Mbid>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, mbid: &Mbid) -> bool {
        self.0.contains(mbid)
    }

    /// Insert one mbid; returns false if it was already excluded
    pub fn insert(&mut self, mbid: Mbid) -> bool {
        self.0.insert(mbid)
    }

    /// Exclude every recording of a page
    pub fn extend_with_recordings<'a, I>(&mut self, recordings: I)
    where
        I: IntoIterator<Item = &'a Recording>,
    {
        self.0.extend(recordings.into_iter().map(|r| r.mbid.clone()));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mbid> {
        self.0.iter()
    }

    pub fn is_superset(&self, other: &ExclusionSet) -> bool {
        self.0.is_superset(&other.0)
    }

    pub fn to_vec(&self) -> Vec<Mbid> {
        self.0.iter().cloned().collect()
    }
}

impl FromIterator<Mbid> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = Mbid>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Where a radio request draws its candidates from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RadioSource {
    /// A compiled prompt
    Prompt {
        prompt: String,
        difficulty: Difficulty,
    },
    /// Continue an existing session
    Session { id: SessionId },
}

impl RadioSource {
    pub fn is_prompt(&self) -> bool {
        matches!(self, RadioSource::Prompt { .. })
    }

    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            RadioSource::Prompt { .. } => None,
            RadioSource::Session { id } => Some(*id),
        }
    }
}

/// Body of `POST /radio`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioRequest {
    pub excluded_ids: ExclusionSet,
    pub source: RadioSource,
}

impl RadioRequest {
    /// Request for a freshly compiled prompt
    pub fn from_prompt(
        prompt: impl Into<String>,
        difficulty: Difficulty,
        excluded_ids: ExclusionSet,
    ) -> Self {
        Self {
            excluded_ids,
            source: RadioSource::Prompt {
                prompt: prompt.into(),
                difficulty,
            },
        }
    }

    /// Request continuing a session; the backend tracks what it has seen
    pub fn from_session(id: SessionId) -> Self {
        Self {
            excluded_ids: ExclusionSet::new(),
            source: RadioSource::Session { id },
        }
    }
}
