//! Prompt compiler
//!
//! Turns an ordered list of rules into the textual query understood by the
//! recommendation backend:
//!
//! ```text
//! basic     artist:(<mbid>)               tag:(<g1>,<g2>)
//! advanced  artist:(<mbid>):<w>[:nosim]   tag:(<g1>,<g2>):<w>:[nosim,]<and|or>
//! ```
//!
//! Terms are joined by a single space in input order. Compilation is total;
//! malformed rules are rejected earlier by [`Rule::validate`].

use crate::types::{NormalizedRule, Prompt, Rule};

/// Compile rules into a prompt string.
pub fn compile(rules: &[Rule], advanced: bool) -> String {
    rules
        .iter()
        .map(|rule| compile_rule(&rule.normalize(), advanced))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate a prompt, then compile it.
pub fn compile_prompt(prompt: &Prompt) -> crate::Result<String> {
    prompt.validate()?;
    Ok(compile(&prompt.rules, prompt.advanced))
}

fn compile_rule(rule: &NormalizedRule, advanced: bool) -> String {
    match rule {
        NormalizedRule::Artist {
            artist,
            weight,
            allow_similar,
        } => {
            if !advanced {
                return format!("artist:({})", artist);
            }
            let nosim = if *allow_similar { "" } else { ":nosim" };
            format!("artist:({}):{}{}", artist, weight, nosim)
        }
        NormalizedRule::Genre {
            genres,
            weight,
            allow_similar,
            join_mode,
        } => {
            let tags = genres.join(",");
            if !advanced {
                return format!("tag:({})", tags);
            }
            let nosim = if *allow_similar { "" } else { "nosim," };
            format!("tag:({}):{}:{}{}", tags, weight, nosim, join_mode.token())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Difficulty, JoinMode};

    #[test]
    fn basic_artist() {
        assert_eq!(compile(&[Rule::artist("A1")], false), "artist:(A1)");
    }

    #[test]
    fn basic_mode_ignores_options() {
        let rules = vec![
            Rule::artist("A1").with_weight(4).with_similar(false),
            Rule::genre(["rock", "jazz"])
                .with_weight(2)
                .with_join(JoinMode::Any)
                .with_similar(false),
        ];
        assert_eq!(compile(&rules, false), "artist:(A1) tag:(rock,jazz)");
    }

    #[test]
    fn advanced_artist_defaults() {
        assert_eq!(compile(&[Rule::artist("A1")], true), "artist:(A1):1");
    }

    #[test]
    fn advanced_artist_without_similar() {
        let rule = Rule::artist("A1").with_weight(3).with_similar(false);
        assert_eq!(compile(&[rule], true), "artist:(A1):3:nosim");
    }

    #[test]
    fn advanced_genre_any_without_similar() {
        let rule = Rule::genre(["rock", "jazz"])
            .with_weight(3)
            .with_similar(false)
            .with_join(JoinMode::Any);
        assert_eq!(compile(&[rule], true), "tag:(rock,jazz):3:nosim,or");
    }

    #[test]
    fn advanced_genre_defaults_to_and() {
        assert_eq!(compile(&[Rule::genre(["ambient"])], true), "tag:(ambient):1:and");
    }

    #[test]
    fn rules_join_in_order() {
        let rules = vec![Rule::genre(["pop"]), Rule::artist("X"), Rule::artist("Y")];
        assert_eq!(
            compile(&rules, true),
            "tag:(pop):1:and artist:(X):1 artist:(Y):1"
        );
    }

    #[test]
    fn compile_prompt_validates_first() {
        let prompt = Prompt::new(vec![Rule::genre(Vec::<String>::new())], Difficulty::Easy, true);
        assert!(compile_prompt(&prompt).is_err());

        let prompt = Prompt::new(vec![Rule::artist("A")], Difficulty::Easy, true);
        assert_eq!(compile_prompt(&prompt).unwrap(), "artist:(A):1");
    }
}
