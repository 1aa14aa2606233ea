//! Tag and artist metadata used to compose rules
//!
//! The backend reports how many resolved recordings carry each tag and
//! artist. Callers pick a [`SortInfo`] per list; sorting never changes which
//! entries are offered.

use crate::types::Mbid;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Genre tag with its recording count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub count: u64,
    pub name: String,
}

/// Artist with its recording count and optional media server naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCount {
    pub count: u64,
    pub mbid: Mbid,
    pub name: String,
    #[serde(default)]
    pub subsonic_name: Option<String>,
    #[serde(default)]
    pub subsonic_id: Option<String>,
}

impl ArtistCount {
    /// Display name, showing the media server spelling when it differs
    pub fn display_name(&self) -> String {
        match &self.subsonic_name {
            Some(local) if local != &self.name => format!("{} ⋅ {}", local, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Body of `GET /tags`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    pub artists: Vec<ArtistCount>,
    pub resolved_recordings: u64,
    pub tags: Vec<TagCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    Frequency,
    #[default]
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Sort preference for one list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortInfo {
    #[serde(rename = "type")]
    pub sort_type: SortType,
    pub direction: SortDirection,
}

impl SortInfo {
    pub fn new(sort_type: SortType, direction: SortDirection) -> Self {
        Self {
            sort_type,
            direction,
        }
    }

    fn compare(&self, (a_count, a_name): (u64, &str), (b_count, b_name): (u64, &str)) -> Ordering {
        let ordering = match self.sort_type {
            SortType::Frequency => a_count.cmp(&b_count),
            SortType::Name => a_name.to_lowercase().cmp(&b_name.to_lowercase()),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// A selectable option: what to show and what goes into the rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Sort tags and turn them into options (value = tag name)
pub fn tag_options(tags: &[TagCount], sort: SortInfo) -> Vec<SelectOption> {
    let mut sorted: Vec<&TagCount> = tags.iter().collect();
    sorted.sort_by(|a, b| sort.compare((a.count, a.name.as_str()), (b.count, b.name.as_str())));
    sorted
        .into_iter()
        .map(|tag| SelectOption {
            label: tag.name.clone(),
            value: tag.name.clone(),
        })
        .collect()
}

/// Sort artists by display name or count and turn them into options
/// (value = artist mbid)
pub fn artist_options(artists: &[ArtistCount], sort: SortInfo) -> Vec<SelectOption> {
    let mut labelled: Vec<(String, &ArtistCount)> =
        artists.iter().map(|a| (a.display_name(), a)).collect();
    labelled.sort_by(|(a_label, a), (b_label, b)| {
        sort.compare((a.count, a_label.as_str()), (b.count, b_label.as_str()))
    });
    labelled
        .into_iter()
        .map(|(label, artist)| SelectOption {
            label,
            value: artist.mbid.to_string(),
        })
        .collect()
}
