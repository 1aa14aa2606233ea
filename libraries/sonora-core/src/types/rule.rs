//! Selection rules and prompts
//!
//! A [`Rule`] is one selection criterion as composed by the user. Optional
//! fields (weight, similarity, join mode) stay optional here; defaults are
//! applied exactly once by [`Rule::normalize`], which is what the compiler
//! consumes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weight applied when a rule leaves it unset
pub const DEFAULT_WEIGHT: u32 = 1;

/// How multiple genres inside one genre rule combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinMode {
    /// Recordings must carry every genre
    #[default]
    #[serde(rename = "and")]
    All,
    /// Recordings may carry any of the genres
    #[serde(rename = "or")]
    Any,
}

impl JoinMode {
    /// Token emitted into the prompt
    pub fn token(self) -> &'static str {
        match self {
            JoinMode::All => "and",
            JoinMode::Any => "or",
        }
    }
}

/// Selection strategy of the recommendation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}

/// Rule selecting recordings around one artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRule {
    /// Artist mbid
    pub artist: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,

    /// Whether similar artists may contribute
    #[serde(
        default,
        rename = "similar",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_similar: Option<bool>,
}

/// Rule selecting recordings by genre tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRule {
    /// Genre tags, in the order the user picked them
    #[serde(rename = "genre")]
    pub genres: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,

    #[serde(
        default,
        rename = "similar",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_similar: Option<bool>,

    #[serde(default, rename = "join", skip_serializing_if = "Option::is_none")]
    pub join_mode: Option<JoinMode>,
}

/// One selection criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Rule {
    Artist(ArtistRule),
    Genre(GenreRule),
}

/// A rule with every default resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedRule {
    Artist {
        artist: String,
        weight: u32,
        allow_similar: bool,
    },
    Genre {
        genres: Vec<String>,
        weight: u32,
        allow_similar: bool,
        join_mode: JoinMode,
    },
}

impl Rule {
    /// Artist rule with all options left to their defaults
    pub fn artist(artist: impl Into<String>) -> Self {
        Rule::Artist(ArtistRule {
            artist: artist.into(),
            weight: None,
            allow_similar: None,
        })
    }

    /// Genre rule with all options left to their defaults
    pub fn genre<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::Genre(GenreRule {
            genres: genres.into_iter().map(Into::into).collect(),
            weight: None,
            allow_similar: None,
            join_mode: None,
        })
    }

    /// Set the weight
    pub fn with_weight(mut self, value: u32) -> Self {
        match &mut self {
            Rule::Artist(rule) => rule.weight = Some(value),
            Rule::Genre(rule) => rule.weight = Some(value),
        }
        self
    }

    /// Set whether similar artists/genres may contribute
    pub fn with_similar(mut self, allow: bool) -> Self {
        match &mut self {
            Rule::Artist(rule) => rule.allow_similar = Some(allow),
            Rule::Genre(rule) => rule.allow_similar = Some(allow),
        }
        self
    }

    /// Set the join mode. Ignored for artist rules.
    pub fn with_join(mut self, mode: JoinMode) -> Self {
        if let Rule::Genre(rule) = &mut self {
            rule.join_mode = Some(mode);
        }
        self
    }

    /// Check the rule's invariants.
    ///
    /// Rules that fail here never reach the compiler.
    pub fn validate(&self) -> crate::Result<()> {
        let weight = match self {
            Rule::Artist(rule) => {
                if rule.artist.trim().is_empty() {
                    return Err(crate::RadioError::invalid_rule(
                        "artist rule requires an artist",
                    ));
                }
                rule.weight
            }
            Rule::Genre(rule) => {
                if rule.genres.is_empty() {
                    return Err(crate::RadioError::invalid_rule(
                        "genre rule requires at least one genre",
                    ));
                }
                if rule.genres.iter().any(|g| g.trim().is_empty()) {
                    return Err(crate::RadioError::invalid_rule("genre names cannot be empty"));
                }
                rule.weight
            }
        };

        if weight == Some(0) {
            return Err(crate::RadioError::invalid_rule(
                "weight must be a positive integer",
            ));
        }

        Ok(())
    }

    /// Resolve defaults: weight 1, similar allowed, join ALL.
    ///
    /// Duplicate genres collapse onto their first occurrence.
    pub fn normalize(&self) -> NormalizedRule {
        match self {
            Rule::Artist(rule) => NormalizedRule::Artist {
                artist: rule.artist.clone(),
                weight: rule.weight.unwrap_or(DEFAULT_WEIGHT),
                allow_similar: rule.allow_similar.unwrap_or(true),
            },
            Rule::Genre(rule) => {
                let mut genres: Vec<String> = Vec::with_capacity(rule.genres.len());
                for genre in &rule.genres {
                    if !genres.contains(genre) {
                        genres.push(genre.clone());
                    }
                }
                NormalizedRule::Genre {
                    genres,
                    weight: rule.weight.unwrap_or(DEFAULT_WEIGHT),
                    allow_similar: rule.allow_similar.unwrap_or(true),
                    join_mode: rule.join_mode.unwrap_or_default(),
                }
            }
        }
    }
}

/// A full prompt as composed in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub rules: Vec<Rule>,

    #[serde(default, rename = "mode")]
    pub difficulty: Difficulty,

    /// Emit weight, similarity and join options
    #[serde(default)]
    pub advanced: bool,
}

impl Prompt {
    pub fn new(rules: Vec<Rule>, difficulty: Difficulty, advanced: bool) -> Self {
        Self {
            rules,
            difficulty,
            advanced,
        }
    }

    /// Validate every rule; an empty prompt is rejected too.
    pub fn validate(&self) -> crate::Result<()> {
        if self.rules.is_empty() {
            return Err(crate::RadioError::invalid_rule(
                "a prompt needs at least one rule",
            ));
        }
        self.rules.iter().try_for_each(Rule::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_once() {
        let normalized = Rule::genre(["rock"]).normalize();
        assert_eq!(
            normalized,
            NormalizedRule::Genre {
                genres: vec!["rock".to_string()],
                weight: 1,
                allow_similar: true,
                join_mode: JoinMode::All,
            }
        );

        let normalized = Rule::artist("a1").normalize();
        assert_eq!(
            normalized,
            NormalizedRule::Artist {
                artist: "a1".to_string(),
                weight: 1,
                allow_similar: true,
            }
        );
    }

    #[test]
    fn duplicate_genres_collapse_in_order() {
        let normalized = Rule::genre(["jazz", "rock", "jazz"]).normalize();
        match normalized {
            NormalizedRule::Genre { genres, .. } => assert_eq!(genres, vec!["jazz", "rock"]),
            other => panic!("expected genre rule, got {:?}", other),
        }
    }

    #[test]
    fn validation_rejects_malformed_rules() {
        assert!(Rule::genre(Vec::<String>::new()).validate().is_err());
        assert!(Rule::artist("").validate().is_err());
        assert!(Rule::artist("a1").with_weight(0).validate().is_err());
        assert!(Rule::artist("a1").with_weight(2).validate().is_ok());
    }

    #[test]
    fn empty_prompt_is_invalid() {
        let prompt = Prompt::new(vec![], Difficulty::Easy, false);
        assert!(prompt.validate().is_err());
    }

    #[test]
    fn rules_deserialize_from_form_shape() {
        let json = r#"[
            {"type": "artist", "artist": "a1", "similar": false, "weight": 2},
            {"type": "genre", "genre": ["rock", "jazz"], "join": "or"}
        ]"#;
        let rules: Vec<Rule> = serde_json::from_str(json).unwrap();

        assert_eq!(rules[0], Rule::artist("a1").with_weight(2).with_similar(false));
        assert_eq!(rules[1], Rule::genre(["rock", "jazz"]).with_join(JoinMode::Any));
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
