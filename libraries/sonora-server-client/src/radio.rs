//! Radio generation and session endpoints.

use crate::client::{read_json, send_error};
use crate::error::{Result, ServerClientError};
use reqwest::{Client, StatusCode};
use serde::de::IgnoredAny;
use sonora_core::types::{CreateSessionRequest, CreateSessionResponse};
use sonora_core::{RadioRequest, RadioResponse, Session, SessionId};
use tracing::{debug, info};

/// Radio client for the Sonora backend.
pub struct RadioClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> RadioClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Generate a playlist from a prompt or continue a session.
    ///
    /// A session with nothing left to offer answers with an error body,
    /// surfaced as `ServerError`. A bare error status is `HttpStatus`.
    pub async fn generate(&self, request: &RadioRequest) -> Result<RadioResponse> {
        let url = format!("{}/radio", self.base_url);
        debug!(
            url = %url,
            excluded = request.excluded_ids.len(),
            session = ?request.source.session_id(),
            "Requesting radio playlist"
        );

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        let radio: RadioResponse = read_json(response, "radio response").await?;

        debug!(
            name = %radio.playlist.name,
            recordings = radio.playlist.recordings.len(),
            "Received radio playlist"
        );

        Ok(radio)
    }

    /// Save a prompt retrieval as a session.
    pub async fn create_session(&self, request: &CreateSessionRequest) -> Result<SessionId> {
        let url = format!("{}/session", self.base_url);
        debug!(url = %url, name = %request.name, ids = request.ids.len(), "Creating session");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        let created: CreateSessionResponse = read_json(response, "session response").await?;
        info!(session_id = %created.id, "Session created");
        Ok(created.id)
    }

    /// Delete a session.
    ///
    /// Returns `NotFound` when the backend does not know the id.
    pub async fn delete_session(&self, id: SessionId) -> Result<()> {
        let url = format!("{}/session/{}", self.base_url, id);
        debug!(url = %url, session_id = %id, "Deleting session");

        let response = self.http.delete(&url).send().await.map_err(send_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ServerClientError::NotFound {
                entity: "Session".to_string(),
                id: id.to_string(),
            });
        }

        read_json::<IgnoredAny>(response, "delete session response").await?;
        Ok(())
    }

    /// List active sessions.
    pub async fn list_sessions(&self) -> Result<Vec<Session>> {
        let url = format!("{}/session", self.base_url);
        debug!(url = %url, "Fetching sessions");

        let response = self.http.get(&url).send().await.map_err(send_error)?;
        let sessions: Vec<Session> = read_json(response, "sessions").await?;

        debug!(count = sessions.len(), "Fetched sessions");
        Ok(sessions)
    }
}
