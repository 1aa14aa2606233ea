//! Playlist editor
//!
//! Holds the locally editable copy of the last retrieved playlist:
//! - Working list: what the user reordered/trimmed
//! - Delivered list: what the server returned, for `reset`
//!
//! Once committed the draft carries the backend id and becomes read-only.

use crate::catalog::Catalog;
use crate::error::{RadioError, Result};
use crate::types::{
    CatalogPlaylist, CommitPlaylistRequest, CommitTarget, PlaylistId, RadioPlaylist, Recording,
    RecordingId,
};
use tracing::{debug, info};

/// Editable playlist rooted at one retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistDraft {
    /// Set once the draft has been committed
    backend_id: Option<PlaylistId>,

    name: String,

    /// Current (possibly edited) order
    recordings: Vec<Recording>,

    /// Order and membership as delivered
    delivered: Vec<Recording>,
}

impl PlaylistDraft {
    /// Fresh draft from a retrieval
    pub fn from_playlist(playlist: RadioPlaylist) -> Self {
        Self {
            backend_id: None,
            name: playlist.name,
            recordings: playlist.recordings.clone(),
            delivered: playlist.recordings,
        }
    }

    pub fn backend_id(&self) -> Option<&PlaylistId> {
        self.backend_id.as_ref()
    }

    pub fn is_committed(&self) -> bool {
        self.backend_id.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recordings(&self) -> &[Recording] {
        &self.recordings
    }

    /// The list exactly as the server delivered it
    pub fn delivered(&self) -> &[Recording] {
        &self.delivered
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }

    pub fn position(&self, id: &RecordingId) -> Option<usize> {
        self.recordings.iter().position(|r| &r.id == id)
    }

    /// Sum of recording durations, each rounded to whole seconds
    pub fn total_duration_secs(&self) -> u64 {
        self.recordings.iter().map(Recording::duration_secs_rounded).sum()
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.is_committed() {
            Err(RadioError::DraftLocked)
        } else {
            Ok(())
        }
    }

    /// Move the recording at `from_index` to `to_index`
    pub fn reorder(&mut self, from_index: usize, to_index: usize) -> Result<()> {
        self.ensure_editable()?;

        let len = self.recordings.len();
        for index in [from_index, to_index] {
            if index >= len {
                return Err(RadioError::IndexOutOfBounds { index, len });
            }
        }

        if from_index == to_index {
            return Ok(());
        }

        let recording = self.recordings.remove(from_index);
        self.recordings.insert(to_index, recording);
        debug!(from = from_index, to = to_index, "Draft reordered");
        Ok(())
    }

    /// Move a recording identified by id onto the position of another one.
    ///
    /// This is what a drag-and-drop layer reports: the dragged row and the
    /// row it was dropped over.
    pub fn move_onto(&mut self, active: &RecordingId, over: &RecordingId) -> Result<()> {
        self.ensure_editable()?;
        let from = self
            .position(active)
            .ok_or_else(|| RadioError::not_found("Recording", active.to_string()))?;
        let to = self
            .position(over)
            .ok_or_else(|| RadioError::not_found("Recording", over.to_string()))?;
        self.reorder(from, to)
    }

    /// Remove the first recording with this id.
    ///
    /// Returns whether anything was removed; an absent id is a no-op.
    pub fn remove(&mut self, id: &RecordingId) -> Result<bool> {
        self.ensure_editable()?;

        match self.position(id) {
            Some(index) => {
                self.recordings.remove(index);
                debug!(recording_id = %id, "Removed recording from draft");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Discard local edits
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_editable()?;
        self.recordings.clone_from(&self.delivered);
        Ok(())
    }

    /// Build the commit request for the current order
    pub fn commit_request(&self, target: &CommitTarget) -> Result<CommitPlaylistRequest> {
        self.ensure_editable()?;

        if self.recordings.is_empty() {
            return Err(RadioError::not_eligible(
                "cannot save a playlist without recordings",
            ));
        }

        let ids = self.recordings.iter().map(|r| r.id.clone()).collect();
        Ok(match target {
            CommitTarget::NewPlaylist { name } => {
                if name.trim().is_empty() {
                    return Err(RadioError::not_eligible("playlist name is required"));
                }
                CommitPlaylistRequest::Create {
                    name: name.clone(),
                    ids,
                }
            }
            CommitTarget::ExistingPlaylist { id } => CommitPlaylistRequest::Update {
                id: id.clone(),
                ids,
            },
        })
    }

    /// Apply a successful commit.
    ///
    /// Locks the draft under `backend_id`. For an existing playlist the
    /// catalog entry's song count and duration are recomputed from the draft
    /// and the draft takes the entry's name.
    pub fn apply_commit(
        &mut self,
        target: &CommitTarget,
        backend_id: PlaylistId,
        catalog: &mut Catalog,
    ) -> Option<CatalogPlaylist> {
        let updated = match target {
            CommitTarget::NewPlaylist { name } => {
                self.name.clone_from(name);
                None
            }
            CommitTarget::ExistingPlaylist { id } => {
                let entry = catalog
                    .update_summary(id, self.len() as u64, self.total_duration_secs())
                    .cloned();
                if let Some(entry) = &entry {
                    self.name.clone_from(&entry.name);
                }
                entry
            }
        };

        info!(playlist_id = %backend_id, tracks = self.len(), "Playlist committed");
        self.backend_id = Some(backend_id);
        updated
    }
}
