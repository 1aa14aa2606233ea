//! Command handlers
//!
//! Every handler writes its report to `out` so the same code serves the
//! binary (stdout) and the tests (a buffer).

use crate::cli::{Cli, Commands, DraftArgs, GenerateArgs, ScanArgs, SessionCommand, TagsArgs};
use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::rules::collect_rules;
use sonora_core::types::{artist_options, format_duration, tag_options};
use sonora_core::{
    CommitTarget, PlaylistDraft, PlaylistId, Prompt, RadioOutcome, RadioWorkflow, RecordingId,
    RetryAssessment, SessionId, SessionNotice,
};
use sonora_server_client::{SonoraServerClient, SCAN_POLL_INTERVAL};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

/// Load configuration, connect, and run one command
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.server {
        config.server.url = url;
    }
    config.validate()?;

    let client = SonoraServerClient::new(config.server_config())?;
    let logged_in = match config.credentials() {
        Some((username, password)) => {
            client.login(username, password).await?;
            true
        }
        None => false,
    };
    let client = Arc::new(client);

    let result = match cli.command {
        Commands::Generate(args) => generate(Arc::clone(&client), &config, args, out).await,
        Commands::Session { command } => session(Arc::clone(&client), command, out).await,
        Commands::Playlists => playlists(&client, out).await,
        Commands::Tags(args) => tags(&client, &args, out).await,
        Commands::Scan(args) => scan(&client, &args, out).await,
    };

    if logged_in {
        if let Err(e) = client.logout().await {
            warn!(error = %e, "Logout failed");
        }
    }

    result
}

async fn generate<W: Write>(
    client: Arc<SonoraServerClient>,
    config: &CliConfig,
    args: GenerateArgs,
    out: &mut W,
) -> Result<()> {
    let rules = collect_rules(args.artists, args.genres, args.rules_file.as_deref())?;
    let prompt = Prompt::new(
        rules,
        args.difficulty.unwrap_or(config.radio.difficulty),
        args.advanced || config.radio.advanced,
    );

    let mut workflow = RadioWorkflow::new(client);
    workflow.refresh().await?;

    let outcome = workflow.submit_prompt(&prompt, args.save_session).await?;
    report_outcome(&outcome, out)?;

    for attempt in 1..=args.retries {
        if !workflow.can_retry() {
            writeln!(out, "No further retries available")?;
            break;
        }
        info!(attempt, "Retrying");
        let outcome = workflow.retry().await?;
        report_outcome(&outcome, out)?;
    }

    finish_draft(&mut workflow, &args.draft, out).await
}

async fn session<W: Write>(
    client: Arc<SonoraServerClient>,
    command: SessionCommand,
    out: &mut W,
) -> Result<()> {
    let mut workflow = RadioWorkflow::new(client);
    workflow.refresh().await?;

    match command {
        SessionCommand::List => {
            if workflow.sessions().is_empty() {
                writeln!(out, "No sessions")?;
            }
            for session in workflow.sessions().sessions() {
                writeln!(out, "{:>6}  {}", session.id.get(), session.label())?;
            }
            Ok(())
        }
        SessionCommand::Continue { id, draft } => {
            let outcome = workflow.continue_session(SessionId::new(id)).await?;
            report_outcome(&outcome, out)?;
            if matches!(outcome, RadioOutcome::SessionFinished { .. }) {
                return Ok(());
            }
            finish_draft(&mut workflow, &draft, out).await
        }
        SessionCommand::Delete { id } => {
            workflow.delete_session(SessionId::new(id)).await?;
            writeln!(out, "Deleted session {}", id)?;
            Ok(())
        }
    }
}

async fn playlists<W: Write>(client: &SonoraServerClient, out: &mut W) -> Result<()> {
    let playlists = client.playlists().list().await?;
    if playlists.is_empty() {
        writeln!(out, "No playlists")?;
    }
    for playlist in &playlists {
        writeln!(out, "{}  {}", playlist.id, playlist.label())?;
    }
    Ok(())
}

async fn tags<W: Write>(client: &SonoraServerClient, args: &TagsArgs, out: &mut W) -> Result<()> {
    let tags = client.library().tags().await?;
    let sort = args.sort_info();
    let limit = args.limit.unwrap_or(usize::MAX);

    writeln!(out, "Resolved recordings: {}", tags.resolved_recordings)?;

    writeln!(out, "\nTags:")?;
    for option in tag_options(&tags.tags, sort).into_iter().take(limit) {
        writeln!(out, "  {}", option.label)?;
    }

    writeln!(out, "\nArtists:")?;
    for option in artist_options(&tags.artists, sort).into_iter().take(limit) {
        writeln!(out, "  {}  {}", option.value, option.label)?;
    }
    Ok(())
}

async fn scan<W: Write>(client: &SonoraServerClient, args: &ScanArgs, out: &mut W) -> Result<()> {
    let library = client.library();
    let started = library.start_scan(args.full).await?;

    if started.started {
        writeln!(out, "Scan started")?;
    } else {
        writeln!(out, "A scan is already running")?;
    }

    if args.wait {
        let status = library
            .wait_for_scan(SCAN_POLL_INTERVAL, |status| {
                info!(fetched = status.fetched, "Scanning");
            })
            .await?;
        writeln!(out, "Scan finished, songs fetched: {}", status.fetched)?;
    }
    Ok(())
}

/// Apply edits, show the draft and commit it if a target was given
async fn finish_draft<W: Write>(
    workflow: &mut RadioWorkflow<SonoraServerClient>,
    args: &DraftArgs,
    out: &mut W,
) -> Result<()> {
    let draft = workflow.draft_mut().ok_or(sonora_core::RadioError::NoDraft)?;

    for edit in &args.moves {
        draft.reorder(edit.from, edit.to)?;
    }
    for id in &args.removes {
        if !draft.remove(&RecordingId::new(id.as_str()))? {
            writeln!(out, "Track {} is not in the playlist", id)?;
        }
    }

    print_draft(draft, out)?;

    let target = match (&args.name, &args.into) {
        (Some(name), None) => CommitTarget::NewPlaylist { name: name.clone() },
        (None, Some(id)) => CommitTarget::ExistingPlaylist {
            id: PlaylistId::new(id.as_str()),
        },
        (None, None) => return Ok(()),
        (Some(_), Some(_)) => {
            return Err(CliError::InvalidArgument(
                "--name and --into cannot be combined".to_string(),
            ))
        }
    };

    let existing = matches!(target, CommitTarget::ExistingPlaylist { .. });
    let summary = workflow.commit(target).await?;
    match (summary.updated, existing) {
        (Some(entry), _) => writeln!(out, "Updated playlist {}", entry.label())?,
        (None, true) => {
            warn!(playlist_id = %summary.id, "Committed playlist is not in the loaded catalog");
            writeln!(out, "Updated playlist {}", summary.id)?
        }
        (None, false) => writeln!(out, "Created playlist {}", summary.id)?,
    }
    Ok(())
}

fn report_outcome<W: Write>(outcome: &RadioOutcome, out: &mut W) -> Result<()> {
    match outcome {
        RadioOutcome::Retrieved(summary) => {
            writeln!(
                out,
                "Retrieved \"{}\" with {} tracks",
                summary.playlist_name, summary.recordings
            )?;

            match summary.retry {
                RetryAssessment::Offered { filtered } => writeln!(
                    out,
                    "Retry available ({} already seen recordings filtered)",
                    filtered
                )?,
                RetryAssessment::Exhausted { filtered } => writeln!(
                    out,
                    "Retry unavailable, only {} recordings were filtered",
                    filtered
                )?,
                RetryAssessment::SessionSourced | RetryAssessment::MarkerMissing => {}
            }

            match &summary.session {
                Some(SessionNotice::Created(session)) => {
                    writeln!(out, "Saved session {}: {}", session.id, session.label())?
                }
                Some(SessionNotice::NotCreated { reason }) => {
                    writeln!(out, "Session not saved: {}", reason)?
                }
                Some(SessionNotice::Advanced(session)) => {
                    writeln!(out, "Session {}: {}", session.id, session.label())?
                }
                None => {}
            }
        }
        RadioOutcome::SessionFinished { id, session } => {
            let name = session
                .as_ref()
                .map_or_else(|| id.to_string(), |s| s.name.clone());
            writeln!(
                out,
                "Session {} has finished: all possible tracks have been excluded, the session was deleted",
                name
            )?;
        }
    }
    Ok(())
}

fn print_draft<W: Write>(draft: &PlaylistDraft, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "\n{} ({} tracks, {})",
        draft.name(),
        draft.len(),
        format_duration(draft.total_duration_secs())
    )?;

    for (index, recording) in draft.recordings().iter().enumerate() {
        let secs = recording.duration_secs_rounded();
        let artists = recording.artist_line().unwrap_or_default();
        writeln!(
            out,
            "{:>3}. {}  {} - {} ({}:{:02})",
            index,
            recording.id,
            artists,
            recording.title,
            secs / 60,
            secs % 60
        )?;
    }
    Ok(())
}
