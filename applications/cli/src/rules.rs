//! Rule and edit arguments
//!
//! ```text
//! --artist MBID[:WEIGHT][:nosim]
//! --genre  TAG,TAG[:WEIGHT][:nosim][:any|:all]
//! --move   FROM:TO
//! ```
//!
//! Options after the first `:` may come in any order.

use crate::error::{CliError, Result};
use sonora_core::{JoinMode, Rule};
use std::path::Path;

/// Parse an `--artist` argument into a rule
pub fn parse_artist(arg: &str) -> std::result::Result<Rule, String> {
    let mut parts = arg.split(':');
    let artist = parts.next().unwrap_or_default().trim();
    if artist.is_empty() {
        return Err("artist rule requires an artist MBID".to_string());
    }

    let mut rule = Rule::artist(artist);
    for option in parts {
        rule = match option.trim().to_ascii_lowercase().as_str() {
            "nosim" => rule.with_similar(false),
            "sim" => rule.with_similar(true),
            other => rule.with_weight(parse_weight(other)?),
        };
    }

    rule.validate().map_err(|e| e.to_string())?;
    Ok(rule)
}

/// Parse a `--genre` argument into a rule
pub fn parse_genre(arg: &str) -> std::result::Result<Rule, String> {
    let mut parts = arg.split(':');
    let genres: Vec<&str> = parts
        .next()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect();

    let mut rule = Rule::genre(genres);
    for option in parts {
        rule = match option.trim().to_ascii_lowercase().as_str() {
            "nosim" => rule.with_similar(false),
            "sim" => rule.with_similar(true),
            "any" | "or" => rule.with_join(JoinMode::Any),
            "all" | "and" => rule.with_join(JoinMode::All),
            other => rule.with_weight(parse_weight(other)?),
        };
    }

    rule.validate().map_err(|e| e.to_string())?;
    Ok(rule)
}

fn parse_weight(option: &str) -> std::result::Result<u32, String> {
    option
        .parse::<u32>()
        .map_err(|_| format!("unknown rule option '{}'", option))
}

/// A `FROM:TO` draft move (zero-based positions)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveArg {
    pub from: usize,
    pub to: usize,
}

/// Parse a `--move` argument
pub fn parse_move(arg: &str) -> std::result::Result<MoveArg, String> {
    let (from, to) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{}'", arg))?;
    let position = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid position '{}'", s))
    };
    Ok(MoveArg {
        from: position(from)?,
        to: position(to)?,
    })
}

/// Load rules from a JSON array of tagged rule objects
pub fn load_rules_file(path: &Path) -> Result<Vec<Rule>> {
    let contents = std::fs::read_to_string(path)?;
    let rules: Vec<Rule> = serde_json::from_str(&contents)?;
    for rule in &rules {
        rule.validate()?;
    }
    Ok(rules)
}

/// Combine command line rules and file rules; file rules come last
pub fn collect_rules(
    artists: Vec<Rule>,
    genres: Vec<Rule>,
    rules_file: Option<&Path>,
) -> Result<Vec<Rule>> {
    let mut rules = artists;
    rules.extend(genres);
    if let Some(path) = rules_file {
        rules.extend(load_rules_file(path)?);
    }

    if rules.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one --artist, --genre or --rules-file rule is required".to_string(),
        ));
    }
    Ok(rules)
}
