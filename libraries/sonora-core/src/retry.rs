//! Retry sequencer
//!
//! After a prompt-sourced retrieval the engine's diagnostic log reports how
//! many candidates its exclusion filter removed. More than a page of them
//! means another request with a larger exclusion set will probably fill a
//! fresh page, so a retry is offered.
//!
//! The log is free-form text; the marker below must stay in sync with the
//! backend's filter element name.

use crate::request::{ExclusionSet, RadioSource};
use crate::session::PAGE_SIZE;
use crate::types::Recording;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static FILTERED_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"HatedRecordingsFilterElement\s+(\d+)").expect("static regex is valid")
});

static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("static regex is valid"));

/// Remove terminal colour sequences from engine output
pub fn strip_ansi(log: &str) -> String {
    ANSI_ESCAPE.replace_all(log, "").into_owned()
}

/// Number of candidates the exclusion filter removed, if the log says so
pub fn filtered_count(log: &str) -> Option<u64> {
    let cleaned = strip_ansi(log);
    FILTERED_MARKER
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Whether another page can be requested for the same prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAssessment {
    /// Enough filtered candidates remain
    Offered { filtered: u64 },
    /// Session retrievals continue through the session instead
    SessionSourced,
    /// The filter removed too few candidates
    Exhausted { filtered: u64 },
    /// The log carried no marker
    MarkerMissing,
}

impl RetryAssessment {
    pub fn is_offered(&self) -> bool {
        matches!(self, RetryAssessment::Offered { .. })
    }
}

/// Decide whether a retry is worthwhile for a retrieval.
///
/// A missing marker is a data anomaly: it is logged and retry stays off.
pub fn assess(source: &RadioSource, log: &str) -> RetryAssessment {
    if !source.is_prompt() {
        return RetryAssessment::SessionSourced;
    }

    match filtered_count(log) {
        Some(filtered) if filtered > PAGE_SIZE as u64 => RetryAssessment::Offered { filtered },
        Some(filtered) => RetryAssessment::Exhausted { filtered },
        None => {
            warn!(
                log_len = log.len(),
                "Radio log has no filtered-recordings marker, retry disabled"
            );
            RetryAssessment::MarkerMissing
        }
    }
}

/// Exclusion set for the next retry: everything excluded so far plus every
/// recording of the page just shown.
pub fn next_exclusions(previous: &ExclusionSet, page: &[Recording]) -> ExclusionSet {
    let mut next = previous.clone();
    next.extend_with_recordings(page);
    next
}
