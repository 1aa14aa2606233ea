//! Backend seam
//!
//! The recommendation backend is an external collaborator. The workflow only
//! depends on this trait; `sonora-server-client` implements it over HTTP and
//! tests implement it in memory.

use crate::error::Result;
use crate::request::RadioRequest;
use crate::types::{
    CatalogPlaylist, CommitPlaylistRequest, CreateSessionRequest, PlaylistId, RadioResponse,
    Session, SessionId, Tags,
};
use async_trait::async_trait;

/// Operations the radio workflow needs from the backend
#[async_trait]
pub trait RadioBackend: Send + Sync {
    /// `POST /radio`: generate or continue a radio
    ///
    /// # Errors
    /// `Rejected` when the backend answers with an error body. For a
    /// session-sourced request that means the session is exhausted.
    async fn radio(&self, request: &RadioRequest) -> Result<RadioResponse>;

    /// `POST /session`
    async fn create_session(&self, request: &CreateSessionRequest) -> Result<SessionId>;

    /// `DELETE /session/{id}`
    async fn delete_session(&self, id: SessionId) -> Result<()>;

    /// `GET /session`
    async fn list_sessions(&self) -> Result<Vec<Session>>;

    /// `GET /playlists`
    async fn list_playlists(&self) -> Result<Vec<CatalogPlaylist>>;

    /// `POST /createPlaylist`
    async fn commit_playlist(&self, request: &CommitPlaylistRequest) -> Result<PlaylistId>;

    /// `GET /tags`
    async fn tags(&self) -> Result<Tags>;
}
