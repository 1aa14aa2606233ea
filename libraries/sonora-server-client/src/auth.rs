//! Authentication methods for the Sonora backend.

use crate::client::{read_json, send_error};
use crate::error::{Result, ServerClientError};
use crate::types::{ApiError, LoginRequest};
use reqwest::{Client, StatusCode};
use serde::de::IgnoredAny;
use tracing::{debug, info, warn};

/// Authentication client for the Sonora backend.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with username and password.
    ///
    /// The backend answers with a session cookie, kept by the client's
    /// cookie store.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = format!("{}/login", self.base_url);
        debug!(url = %url, username = %username, "Attempting login");

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(send_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|e| e.error)
                .unwrap_or_else(|_| "Invalid username or password".to_string());
            warn!(error = %message, "Login failed");
            return Err(ServerClientError::AuthFailed(message));
        }

        read_json::<IgnoredAny>(response, "login response").await?;
        info!(username = %username, "Login successful");
        Ok(())
    }

    /// End the login session on the backend.
    pub async fn logout(&self) -> Result<()> {
        let url = format!("{}/logout", self.base_url);
        debug!(url = %url, "Logging out");

        let response = self.http.delete(&url).send().await.map_err(send_error)?;
        read_json::<IgnoredAny>(response, "logout response").await?;
        Ok(())
    }
}
