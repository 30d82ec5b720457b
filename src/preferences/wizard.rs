//! Structure wizard: one-click rewrites of the idea that target a single
//! song section.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SongSection {
    Intro,
    Verse1,
    Chorus,
    Verse2,
    Bridge,
    Verse3,
    Outro,
}

impl SongSection {
    pub const ALL: &'static [SongSection] = &[
        SongSection::Intro,
        SongSection::Verse1,
        SongSection::Chorus,
        SongSection::Verse2,
        SongSection::Bridge,
        SongSection::Verse3,
        SongSection::Outro,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SongSection::Intro => "Intro",
            SongSection::Verse1 => "Verse 1",
            SongSection::Chorus => "Chorus",
            SongSection::Verse2 => "Verse 2",
            SongSection::Bridge => "Bridge",
            SongSection::Verse3 => "Verse 3",
            SongSection::Outro => "Outro",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SongSection::Intro => "🎬",
            SongSection::Verse1 => "🎤",
            SongSection::Chorus => "🎡",
            SongSection::Verse2 => "📜",
            SongSection::Bridge => "🌉",
            SongSection::Verse3 => "🧨",
            SongSection::Outro => "🏁",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            SongSection::Intro => "Rewrite a cinematic [Intro] for: ",
            SongSection::Verse1 => "Regenerate [Verse 1] with heavy wordplay for: ",
            SongSection::Chorus => "Draft an anthemic [Chorus] for: ",
            SongSection::Verse2 => "Regenerate [Verse 2] with deep story for: ",
            SongSection::Bridge => "Write a mood-shifting [Bridge] for: ",
            SongSection::Verse3 => "Architect a high-intensity [Verse 3] for: ",
            SongSection::Outro => "Draft a fading [Outro] for: ",
        }
    }

    /// Strips any earlier wizard prefix from `idea` and prepends this one.
    pub fn apply_to(&self, idea: &str) -> String {
        let cleaned = strip_prefix(idea);
        format!("{}{}", self.prefix(), cleaned.trim())
    }
}

fn strip_prefix(idea: &str) -> std::borrow::Cow<'_, str> {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = PREFIX.get_or_init(|| {
        Regex::new(r"(?i)^(Rewrite|Regenerate|Draft|Architect|Write).+?for: ")
            .expect("wizard prefix pattern is valid")
    });
    re.replace(idea, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_prepended_to_trimmed_idea() {
        assert_eq!(
            SongSection::Intro.apply_to("  space heist  "),
            "Rewrite a cinematic [Intro] for: space heist"
        );
    }

    #[test]
    fn previous_prefix_is_replaced_not_stacked() {
        let once = SongSection::Verse1.apply_to("space heist");
        let twice = SongSection::Bridge.apply_to(&once);
        assert_eq!(twice, "Write a mood-shifting [Bridge] for: space heist");
    }

    #[test]
    fn stripping_is_case_insensitive() {
        assert_eq!(
            SongSection::Chorus.apply_to("draft something odd for: city lights"),
            "Draft an anthemic [Chorus] for: city lights"
        );
    }

    #[test]
    fn plain_idea_is_left_alone() {
        assert_eq!(
            SongSection::Outro.apply_to("Writing letters home"),
            "Draft a fading [Outro] for: Writing letters home"
        );
    }

    #[test]
    fn empty_idea_yields_bare_prefix() {
        assert_eq!(
            SongSection::Verse3.apply_to(""),
            "Architect a high-intensity [Verse 3] for: "
        );
    }
}
