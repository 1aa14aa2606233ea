/// Command line definition
use crate::rules::{parse_artist, parse_genre, parse_move, MoveArg};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sonora_core::{Difficulty, Rule, SortInfo};
use sonora_core::types::{SortDirection, SortType};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sonora")]
#[command(about = "Generate radio playlists from your music library", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend API root, overrides server.url
    #[arg(long, global = true, env = "SONORA_URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a playlist from rules
    Generate(GenerateArgs),
    /// Manage radio sessions
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
    /// List saved playlists
    Playlists,
    /// List tags and artists available for rules
    Tags(TagsArgs),
    /// Scan the music library
    Scan(ScanArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Artist rule: MBID[:WEIGHT][:nosim]
    #[arg(long = "artist", value_parser = parse_artist)]
    pub artists: Vec<Rule>,

    /// Genre rule: TAG,TAG[:WEIGHT][:nosim][:any|:all]
    #[arg(long = "genre", value_parser = parse_genre)]
    pub genres: Vec<Rule>,

    /// JSON file with additional rules
    #[arg(long)]
    pub rules_file: Option<PathBuf>,

    /// easy, medium or hard (defaults to radio.difficulty)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Send weights, similarity and join options
    #[arg(long)]
    pub advanced: bool,

    /// Save the result as a session when a full page comes back
    #[arg(long)]
    pub save_session: bool,

    /// Retry up to N times while unseen candidates remain
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    #[command(flatten)]
    pub draft: DraftArgs,
}

/// Edits applied to the draft (moves first, then removals) and where to save it
#[derive(Debug, Clone, Default, Args)]
pub struct DraftArgs {
    /// Move a track: FROM:TO (zero-based)
    #[arg(long = "move", value_parser = parse_move)]
    pub moves: Vec<MoveArg>,

    /// Remove a track by id
    #[arg(long = "remove")]
    pub removes: Vec<String>,

    /// Save as a new playlist with this name
    #[arg(long, conflicts_with = "into")]
    pub name: Option<String>,

    /// Replace the contents of an existing playlist
    #[arg(long)]
    pub into: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// List active sessions
    List,
    /// Fetch the next playlist of a session
    Continue {
        id: i64,

        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a session
    Delete { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Frequency,
}

#[derive(Debug, Args)]
pub struct TagsArgs {
    #[arg(long, value_enum, default_value_t = SortArg::Name)]
    pub sort: SortArg,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Show at most N entries per list
    #[arg(long)]
    pub limit: Option<usize>,
}

impl TagsArgs {
    pub fn sort_info(&self) -> SortInfo {
        let sort_type = match self.sort {
            SortArg::Name => SortType::Name,
            SortArg::Frequency => SortType::Frequency,
        };
        let direction = if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortInfo::new(sort_type, direction)
    }
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Rescan everything instead of only new recordings
    #[arg(long)]
    pub full: bool,

    /// Wait for the scan to finish
    #[arg(long)]
    pub wait: bool,
}
