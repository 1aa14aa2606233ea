//! Main Sonora server client.

use crate::auth::AuthClient;
use crate::error::{Result, ServerClientError};
use crate::library::LibraryClient;
use crate::playlists::PlaylistClient;
use crate::radio::RadioClient;
use crate::types::{ApiError, ServerConfig};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use sonora_core::types::{CreateSessionRequest, Tags};
use sonora_core::{
    CatalogPlaylist, CommitPlaylistRequest, PlaylistId, RadioBackend, RadioRequest,
    RadioResponse, Session, SessionId,
};
use std::time::Duration;
use tracing::{debug, info};

/// Main client for a Sonora backend.
///
/// Login establishes a cookie session that the client's cookie store
/// replays on every later request. Endpoint groups are reached through
/// borrowed sub-clients.
///
/// # Example
///
/// ```ignore
/// use sonora_server_client::{SonoraServerClient, ServerConfig};
///
/// let client = SonoraServerClient::new(ServerConfig::new("https://radio.example.com/api"))?;
/// client.login("user", "password").await?;
///
/// let sessions = client.radio().list_sessions().await?;
/// println!("{} sessions", sessions.len());
/// ```
pub struct SonoraServerClient {
    http: Client,
    base_url: String,
}

impl SonoraServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let base_url = config.normalized_url()?;

        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Sonora/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServerClientError::Request)?;

        debug!(url = %base_url, timeout_secs = config.timeout_secs, "Created server client");
        Ok(Self { http, base_url })
    }

    /// Get the normalized API root.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    pub fn radio(&self) -> RadioClient<'_> {
        RadioClient::new(&self.http, &self.base_url)
    }

    pub fn playlists(&self) -> PlaylistClient<'_> {
        PlaylistClient::new(&self.http, &self.base_url)
    }

    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(&self.http, &self.base_url)
    }

    /// Login with username and password.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.auth().login(username, password).await
    }

    /// End the login session.
    pub async fn logout(&self) -> Result<()> {
        self.auth().logout().await?;
        info!("Logged out");
        Ok(())
    }
}

#[async_trait]
impl RadioBackend for SonoraServerClient {
    async fn radio(&self, request: &RadioRequest) -> sonora_core::Result<RadioResponse> {
        Ok(self.radio().generate(request).await?)
    }

    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> sonora_core::Result<SessionId> {
        Ok(self.radio().create_session(request).await?)
    }

    async fn delete_session(&self, id: SessionId) -> sonora_core::Result<()> {
        Ok(self.radio().delete_session(id).await?)
    }

    async fn list_sessions(&self) -> sonora_core::Result<Vec<Session>> {
        Ok(self.radio().list_sessions().await?)
    }

    async fn list_playlists(&self) -> sonora_core::Result<Vec<CatalogPlaylist>> {
        Ok(self.playlists().list().await?)
    }

    async fn commit_playlist(
        &self,
        request: &CommitPlaylistRequest,
    ) -> sonora_core::Result<PlaylistId> {
        Ok(self.playlists().commit(request).await?)
    }

    async fn tags(&self) -> sonora_core::Result<Tags> {
        Ok(self.library().tags().await?)
    }
}

/// Classify a failure to get any response at all.
pub(crate) fn send_error(e: reqwest::Error) -> ServerClientError {
    if e.is_connect() || e.is_timeout() {
        ServerClientError::ServerUnreachable(e.to_string())
    } else {
        ServerClientError::Request(e)
    }
}

/// Decode a JSON response body.
///
/// 401 means the login session is gone. An `{error}` body is a backend
/// rejection even under a 2xx status. Any other non-2xx status is an
/// `HttpStatus` error, which callers treat like a transport failure.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ServerClientError::AuthRequired);
    }

    let body = response.text().await?;

    if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
        if !api_error.error.is_empty() {
            return Err(ServerClientError::ServerError {
                status: status.as_u16(),
                message: api_error.error,
            });
        }
    }

    if !status.is_success() {
        return Err(ServerClientError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| ServerClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}
