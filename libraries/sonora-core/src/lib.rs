//! Sonora Core
//!
//! Platform-agnostic building blocks for generating radio playlists from a
//! recommendation backend.
//!
//! # Architecture
//!
//! - **Rules**: [`Rule`] / [`Prompt`] describe what the user asked for
//! - **Compiler**: [`compile`] turns rules into the backend's prompt DSL
//! - **Requests**: [`RadioRequest`] pairs a prompt or session with an [`ExclusionSet`]
//! - **Sessions**: [`SessionManager`] tracks server-side continuations
//! - **Retry**: [`retry`] decides whether another page is worth requesting
//! - **Editor**: [`PlaylistDraft`] is the locally editable result
//! - **Workflow**: [`RadioWorkflow`] drives all of the above over a [`RadioBackend`]
//!
//! # Example
//!
//! ```rust
//! use sonora_core::{compile, JoinMode, Rule};
//!
//! let rules = vec![
//!     Rule::artist("A1"),
//!     Rule::genre(["rock", "jazz"]).with_weight(3).with_similar(false).with_join(JoinMode::Any),
//! ];
//!
//! assert_eq!(compile(&rules, false), "artist:(A1) tag:(rock,jazz)");
//! assert_eq!(compile(&rules, true), "artist:(A1):1 tag:(rock,jazz):3:nosim,or");
//! ```

#![forbid(unsafe_code)]

pub mod backend;
pub mod busy;
pub mod catalog;
pub mod compiler;
pub mod editor;
pub mod error;
pub mod request;
pub mod retry;
pub mod session;
pub mod types;
pub mod workflow;

pub use backend::RadioBackend;
pub use busy::{ActionKind, BusyFlags};
pub use catalog::Catalog;
pub use compiler::{compile, compile_prompt};
pub use editor::PlaylistDraft;
pub use error::{RadioError, Result};
pub use request::{ExclusionSet, RadioRequest, RadioSource};
pub use retry::RetryAssessment;
pub use session::{SessionManager, SessionSeed, PAGE_SIZE};
pub use workflow::{
    CommitSummary, RadioOutcome, RadioWorkflow, Retrieval, RetrievalSummary, SessionNotice,
};

pub use types::{
    ArtistRef, ArtistRule, CatalogPlaylist, CommitPlaylistRequest, CommitTarget, Difficulty,
    GenreRule, JoinMode, Mbid, PlaylistId, Prompt, RadioPlaylist, RadioResponse, Recording,
    RecordingId, ReleaseRef, Rule, Session, SessionId, SortInfo, Tags,
};
