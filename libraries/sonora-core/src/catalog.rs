//! Local view of the backend's saved playlists
use crate::types::{CatalogPlaylist, PlaylistId};
use tracing::debug;

/// Catalog playlists in backend order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    playlists: Vec<CatalogPlaylist>,
}

impl Catalog {
    pub fn new(playlists: Vec<CatalogPlaylist>) -> Self {
        Self { playlists }
    }

    /// Replace the catalog with a fresh listing
    pub fn load(&mut self, playlists: Vec<CatalogPlaylist>) {
        debug!(count = playlists.len(), "Loaded catalog playlists");
        self.playlists = playlists;
    }

    pub fn playlists(&self) -> &[CatalogPlaylist] {
        &self.playlists
    }

    pub fn get(&self, id: &PlaylistId) -> Option<&CatalogPlaylist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    /// Update an entry's summary in place, keeping its position.
    ///
    /// Returns the updated entry, or `None` if the id is not listed.
    pub fn update_summary(
        &mut self,
        id: &PlaylistId,
        song_count: u64,
        total_duration_seconds: u64,
    ) -> Option<&CatalogPlaylist> {
        let entry = self.playlists.iter_mut().find(|p| &p.id == id)?;
        entry.song_count = song_count;
        entry.total_duration_seconds = total_duration_seconds;
        Some(entry)
    }
}
