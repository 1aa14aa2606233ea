/// Recordings and retrieved playlists
use crate::types::{Mbid, RecordingId};
use serde::{Deserialize, Serialize};

/// Artist credit attached to a recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub mbid: Mbid,
    pub name: String,
}

/// Release a recording appears on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRef {
    pub mbid: Mbid,
    pub name: String,
}

/// One recording returned by the recommendation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    /// Media server id (row identity, commit id)
    pub id: RecordingId,

    /// Catalog id (exclusion identity)
    pub mbid: Mbid,

    pub duration_ms: u64,

    pub title: String,

    /// Cover art URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<ArtistRef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseRef>,
}

impl Recording {
    pub fn new(
        id: impl Into<String>,
        mbid: impl Into<String>,
        title: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: RecordingId::new(id),
            mbid: Mbid::new(mbid),
            duration_ms,
            title: title.into(),
            url: None,
            year: None,
            artists: None,
            release: None,
        }
    }

    /// Duration rounded half-up to whole seconds
    pub fn duration_secs_rounded(&self) -> u64 {
        (self.duration_ms + 500) / 1000
    }

    /// Artist names joined for display
    pub fn artist_line(&self) -> Option<String> {
        self.artists.as_ref().map(|artists| {
            artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(" ⋅ ")
        })
    }
}

/// Playlist as delivered by a radio retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioPlaylist {
    pub name: String,
    pub recordings: Vec<Recording>,
}

/// Body of a successful `POST /radio`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioResponse {
    /// Free-form diagnostic output of the recommendation engine
    #[serde(default)]
    pub log: String,
    pub playlist: RadioPlaylist,
}
