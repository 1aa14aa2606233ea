//! Radio workflow
//!
//! Coordinates compile → send → await → apply for every user action, over
//! explicit state: sessions, catalog, the current draft and the context of
//! the last retrieval.
//!
//! Each response is turned into new values first and only then written into
//! state, with no await in between, so a half-applied update (a session
//! advanced while the draft still shows the previous page) is never visible.

use crate::backend::RadioBackend;
use crate::busy::{ActionKind, BusyFlags};
use crate::catalog::Catalog;
use crate::compiler::compile_prompt;
use crate::editor::PlaylistDraft;
use crate::error::{RadioError, Result};
use crate::request::{ExclusionSet, RadioRequest, RadioSource};
use crate::retry::{self, RetryAssessment};
use crate::session::{SessionManager, SessionSeed};
use crate::types::{
    CatalogPlaylist, CommitTarget, PlaylistId, Prompt, RadioResponse, Session, SessionId, Tags,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Context of the retrieval the current draft came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrieval {
    pub source: RadioSource,

    /// Exclusions the request was sent with
    pub excluded: ExclusionSet,

    /// Diagnostic log with colour codes stripped
    pub log: String,

    pub retry: RetryAssessment,

    /// Session saved from this retrieval, if any
    pub saved_session: Option<SessionId>,
}

/// What happened to sessions as part of a retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// A session was saved from the retrieval
    Created(Session),
    /// Saving was requested but did not happen
    NotCreated { reason: String },
    /// The session the retrieval continued
    Advanced(Session),
}

/// Summary of a successful retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalSummary {
    pub playlist_name: String,
    pub recordings: usize,
    pub retry: RetryAssessment,
    pub session: Option<SessionNotice>,
}

/// Result of a radio request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioOutcome {
    /// A new draft is available
    Retrieved(RetrievalSummary),
    /// The session has no candidates left and was removed; the draft is
    /// untouched
    SessionFinished {
        id: SessionId,
        session: Option<Session>,
    },
}

/// Result of a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub id: PlaylistId,
    /// Catalog entry after its summary was recomputed (existing targets)
    pub updated: Option<CatalogPlaylist>,
}

/// Stateful driver over a [`RadioBackend`]
pub struct RadioWorkflow<B: RadioBackend> {
    backend: Arc<B>,
    sessions: SessionManager,
    catalog: Catalog,
    draft: Option<PlaylistDraft>,
    last: Option<Retrieval>,
    busy: Arc<BusyFlags>,
}

impl<B: RadioBackend> RadioWorkflow<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            sessions: SessionManager::new(),
            catalog: Catalog::default(),
            draft: None,
            last: None,
            busy: Arc::new(BusyFlags::new()),
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Shared handle on the in-flight flags.
    ///
    /// Meant for a front end that runs actions on other tasks (a UI event
    /// loop) and disables an action while its flag is set. The sequential
    /// CLI never needs it.
    pub fn busy(&self) -> Arc<BusyFlags> {
        Arc::clone(&self.busy)
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn draft(&self) -> Option<&PlaylistDraft> {
        self.draft.as_ref()
    }

    /// Mutable access for reorder/remove/reset
    pub fn draft_mut(&mut self) -> Option<&mut PlaylistDraft> {
        self.draft.as_mut()
    }

    pub fn last_retrieval(&self) -> Option<&Retrieval> {
        self.last.as_ref()
    }

    /// Whether the current draft can be followed by a retry
    pub fn can_retry(&self) -> bool {
        self.last.as_ref().is_some_and(|r| r.retry.is_offered())
    }

    /// Load sessions and catalog playlists from the backend
    pub async fn refresh(&mut self) -> Result<()> {
        let sessions = self.backend.list_sessions().await?;
        let playlists = self.backend.list_playlists().await?;

        self.sessions.load(sessions);
        self.catalog.load(playlists);
        Ok(())
    }

    /// Tag and artist metadata for composing rules
    pub async fn tags(&self) -> Result<Tags> {
        self.backend.tags().await
    }

    /// Compile and submit a fresh prompt.
    ///
    /// With `save_session`, a session is saved when the page came back
    /// full; otherwise the summary says why none was created.
    pub async fn submit_prompt(
        &mut self,
        prompt: &Prompt,
        save_session: bool,
    ) -> Result<RadioOutcome> {
        let compiled = compile_prompt(prompt)?;
        debug!(prompt = %compiled, difficulty = %prompt.difficulty, "Submitting prompt");

        let request = RadioRequest::from_prompt(compiled, prompt.difficulty, ExclusionSet::new());
        let outcome = self.run_radio(ActionKind::Submit, request).await?;

        match outcome {
            RadioOutcome::Retrieved(mut summary) if save_session => {
                let notice = match self.save_as_session().await {
                    Ok(session) => SessionNotice::Created(session),
                    Err(err) => {
                        warn!(error = %err, "Session was not saved");
                        SessionNotice::NotCreated {
                            reason: err.to_string(),
                        }
                    }
                };
                summary.session = Some(notice);
                Ok(RadioOutcome::Retrieved(summary))
            }
            other => Ok(other),
        }
    }

    /// Fetch the next page of an existing session
    pub async fn continue_session(&mut self, id: SessionId) -> Result<RadioOutcome> {
        self.run_radio(ActionKind::Submit, RadioRequest::from_session(id))
            .await
    }

    /// Re-run the last prompt, additionally excluding the page just shown
    pub async fn retry(&mut self) -> Result<RadioOutcome> {
        let last = self.last.as_ref().ok_or(RadioError::NoDraft)?;
        if !last.retry.is_offered() {
            return Err(RadioError::not_eligible(
                "not enough unseen candidates remain to retry this prompt",
            ));
        }
        let draft = self.draft.as_ref().ok_or(RadioError::NoDraft)?;

        let request = RadioRequest {
            excluded_ids: retry::next_exclusions(&last.excluded, draft.delivered()),
            source: last.source.clone(),
        };
        info!(
            excluded = request.excluded_ids.len(),
            previously = last.excluded.len(),
            "Retrying prompt"
        );

        self.run_radio(ActionKind::Retry, request).await
    }

    /// Save the last prompt retrieval as a session.
    ///
    /// Only a full page can seed a session, and only once.
    pub async fn save_as_session(&mut self) -> Result<Session> {
        let last = self.last.as_ref().ok_or(RadioError::NoDraft)?;
        let draft = self.draft.as_ref().ok_or(RadioError::NoDraft)?;

        let (prompt, difficulty) = match &last.source {
            RadioSource::Prompt { prompt, difficulty } => (prompt, *difficulty),
            RadioSource::Session { .. } => {
                return Err(RadioError::not_eligible(
                    "this playlist already belongs to a session",
                ))
            }
        };
        if let Some(id) = last.saved_session {
            return Err(RadioError::not_eligible(format!(
                "already saved as session {}",
                id
            )));
        }

        let seed = SessionSeed::from_retrieval(
            prompt,
            difficulty,
            &last.excluded,
            draft.name(),
            draft.delivered(),
        )?;

        self.busy.set(ActionKind::SaveSession);
        let result = self.backend.create_session(&seed.request).await;
        self.busy.clear(ActionKind::SaveSession);
        let id = result?;

        let session = self.sessions.create(id, &seed);
        if let Some(last) = self.last.as_mut() {
            last.saved_session = Some(id);
        }
        Ok(session)
    }

    /// Delete a session on the backend and locally.
    ///
    /// A session that is already gone on either side is not an error.
    pub async fn delete_session(&mut self, id: SessionId) -> Result<()> {
        self.busy.set(ActionKind::DeleteSession);
        let result = self.backend.delete_session(id).await;
        self.busy.clear(ActionKind::DeleteSession);

        match result {
            Ok(()) | Err(RadioError::NotFound { .. }) => {}
            Err(err) => return Err(err),
        }

        match self.sessions.delete(id) {
            Ok(session) => info!(session_id = %id, name = %session.name, "Session deleted"),
            Err(_) => debug!(session_id = %id, "Session already absent"),
        }
        Ok(())
    }

    /// Commit the current draft
    pub async fn commit(&mut self, target: CommitTarget) -> Result<CommitSummary> {
        let draft = self.draft.as_ref().ok_or(RadioError::NoDraft)?;
        let request = draft.commit_request(&target)?;

        self.busy.set(ActionKind::Commit);
        let result = self.backend.commit_playlist(&request).await;
        self.busy.clear(ActionKind::Commit);
        let id = result?;

        let updated = match self.draft.as_mut() {
            Some(draft) => draft.apply_commit(&target, id.clone(), &mut self.catalog),
            None => None,
        };
        Ok(CommitSummary { id, updated })
    }

    async fn run_radio(&mut self, kind: ActionKind, request: RadioRequest) -> Result<RadioOutcome> {
        self.busy.set(kind);
        let result = self.backend.radio(&request).await;
        self.busy.clear(kind);

        match result {
            Ok(response) => Ok(RadioOutcome::Retrieved(self.apply_retrieval(request, response))),
            Err(err) => match request.source.session_id() {
                Some(id) if err.is_rejection() => {
                    info!(session_id = %id, reason = %err, "Session has no more candidates");
                    let session = self.sessions.delete(id).ok();
                    Ok(RadioOutcome::SessionFinished { id, session })
                }
                _ => Err(err),
            },
        }
    }

    fn apply_retrieval(&mut self, request: RadioRequest, response: RadioResponse) -> RetrievalSummary {
        let log = retry::strip_ansi(&response.log);
        let assessment = retry::assess(&request.source, &log);
        let count = response.playlist.recordings.len();
        let playlist_name = response.playlist.name.clone();
        let draft = PlaylistDraft::from_playlist(response.playlist);
        let retrieval = Retrieval {
            source: request.source,
            excluded: request.excluded_ids,
            log,
            retry: assessment,
            saved_session: None,
        };

        let session = match retrieval.source.session_id() {
            Some(id) => match self.sessions.record_retrieval(id, count) {
                Ok(session) => Some(SessionNotice::Advanced(session.clone())),
                Err(_) => {
                    warn!(session_id = %id, "Retrieved from a session that is not loaded");
                    None
                }
            },
            None => None,
        };
        self.draft = Some(draft);
        self.last = Some(retrieval);

        info!(name = %playlist_name, recordings = count, retry = ?assessment, "Playlist retrieved");
        RetrievalSummary {
            playlist_name,
            recordings: count,
            retry: assessment,
            session,
        }
    }
}
