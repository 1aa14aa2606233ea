//! Sonora Server Client
//!
//! HTTP client library for the Sonora radio backend API.
//!
//! # Features
//!
//! - **Authentication**: Cookie-session login and logout
//! - **Radio**: Generate playlists, save/continue/delete sessions
//! - **Playlists**: List saved playlists, create or replace one
//! - **Library**: Tag metadata and scan control
//!
//! [`SonoraServerClient`] implements [`sonora_core::RadioBackend`], so it can
//! drive a [`sonora_core::RadioWorkflow`] directly.
//!
//! # Example
//!
//! ```ignore
//! use sonora_core::{Difficulty, Prompt, RadioWorkflow, Rule};
//! use sonora_server_client::{ServerConfig, SonoraServerClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SonoraServerClient::new(ServerConfig::new("https://radio.example.com/api"))?;
//!     client.login("user", "password").await?;
//!
//!     let mut workflow = RadioWorkflow::new(Arc::new(client));
//!     workflow.refresh().await?;
//!
//!     let prompt = Prompt::new(vec![Rule::genre(["rock"])], Difficulty::Medium, false);
//!     workflow.submit_prompt(&prompt, true).await?;
//!     println!("{} tracks", workflow.draft().map_or(0, |d| d.len()));
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod library;
mod playlists;
mod radio;
mod types;

pub use client::SonoraServerClient;
pub use error::{Result, ServerClientError};
pub use types::{
    ApiError, LoginRequest, ScanStatus, ServerConfig, StartScan, StartScanRequest,
    DEFAULT_TIMEOUT_SECS,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use library::{LibraryClient, SCAN_POLL_INTERVAL};
pub use playlists::PlaylistClient;
pub use radio::RadioClient;
