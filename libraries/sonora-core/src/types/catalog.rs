/// Saved playlists known to the backend
use crate::types::{PlaylistId, RecordingId};
use serde::{Deserialize, Serialize};

/// Entry of `GET /playlists`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPlaylist {
    pub id: PlaylistId,

    pub name: String,

    #[serde(rename = "songs")]
    pub song_count: u64,

    #[serde(rename = "duration")]
    pub total_duration_seconds: u64,
}

impl CatalogPlaylist {
    /// Label used when picking a playlist to update
    pub fn label(&self) -> String {
        format!(
            "{} ({} songs, {})",
            self.name,
            self.song_count,
            format_duration(self.total_duration_seconds)
        )
    }
}

/// Format seconds as `HH:MM:SS`; hours wrap at 24.
pub fn format_duration(total_seconds: u64) -> String {
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = (total_seconds / 3600) % 24;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Where a draft is committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitTarget {
    /// Create a new playlist with this name
    NewPlaylist { name: String },
    /// Replace the contents of an existing catalog playlist
    ExistingPlaylist { id: PlaylistId },
}

/// Body of `POST /createPlaylist`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommitPlaylistRequest {
    Create { name: String, ids: Vec<RecordingId> },
    Update { id: PlaylistId, ids: Vec<RecordingId> },
}

impl CommitPlaylistRequest {
    pub fn ids(&self) -> &[RecordingId] {
        match self {
            CommitPlaylistRequest::Create { ids, .. } | CommitPlaylistRequest::Update { ids, .. } => {
                ids
            }
        }
    }
}

/// Body returned by `POST /createPlaylist`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPlaylistResponse {
    pub id: PlaylistId,
}
