//! What the result panel shows.
//!
//! Exactly one of four views is rendered: pending, error, result or the
//! empty placeholder. Results are split into segments so bracketed section
//! tags (`[Intro]`, `[Beat: Dark 808s]`) can be styled apart from lyrics.

pub mod clipboard;

pub use clipboard::{
    ArboardClipboard, ClipboardError, ClipboardOwner, ClipboardWriter, CopyIndicator,
    OwnedClipboard,
};

use crate::session::GenerationState;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const PENDING_HEADLINE: &str = "Laying down the tracks...";
pub const PENDING_DETAIL: &str = "Engineering advanced wordplay & rhythmic pockets...";
pub const ERROR_TITLE: &str = "An Error Occurred";
pub const EMPTY_PLACEHOLDER: &str = "\"The mic is open... drop your concept above.\"";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Tag,
    Text,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState {
    Pending {
        headline: &'static str,
        detail: &'static str,
    },
    Error {
        title: &'static str,
        message: String,
    },
    Result {
        text: String,
        segments: Vec<Segment>,
        copied: bool,
    },
    Empty {
        placeholder: &'static str,
    },
}

impl ViewState {
    pub fn from_state(state: &GenerationState, copied: bool) -> Self {
        match state {
            GenerationState::Pending => ViewState::Pending {
                headline: PENDING_HEADLINE,
                detail: PENDING_DETAIL,
            },
            GenerationState::Failed(message) => ViewState::Error {
                title: ERROR_TITLE,
                message: message.clone(),
            },
            GenerationState::Success(text) if !text.is_empty() => ViewState::Result {
                text: text.clone(),
                segments: highlight(text),
                copied,
            },
            _ => ViewState::Empty {
                placeholder: EMPTY_PLACEHOLDER,
            },
        }
    }
}

/// Splits `text` around `[...]` markers. A marker never spans a line break.
pub fn highlight(text: &str) -> Vec<Segment> {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let re = TAG.get_or_init(|| Regex::new(r"\[.*?\]").expect("tag pattern is valid"));

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment {
                kind: SegmentKind::Text,
                text: text[last..m.start()].to_string(),
            });
        }
        segments.push(Segment {
            kind: SegmentKind::Tag,
            text: m.as_str().to_string(),
        });
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment {
            kind: SegmentKind::Text,
            text: text[last..].to_string(),
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> Segment {
        Segment {
            kind: SegmentKind::Tag,
            text: s.into(),
        }
    }

    fn plain(s: &str) -> Segment {
        Segment {
            kind: SegmentKind::Text,
            text: s.into(),
        }
    }

    #[test]
    fn intro_tag_is_highlighted() {
        assert_eq!(highlight("[Intro]\nHello"), vec![tag("[Intro]"), plain("\nHello")]);
    }

    #[test]
    fn tags_are_non_greedy_and_line_bound() {
        assert_eq!(
            highlight("[Verse 1] [Flow: fast]\nline [a\nb]"),
            vec![
                tag("[Verse 1]"),
                plain(" "),
                tag("[Flow: fast]"),
                plain("\nline [a\nb]"),
            ]
        );
    }

    #[test]
    fn segments_reassemble_to_original() {
        let text = "[Chorus]\nWe rise [x2]\n[Outro]";
        let joined: String = highlight(text).into_iter().map(|s| s.text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn no_tags_is_one_text_segment() {
        assert_eq!(highlight("Yo yo yo"), vec![plain("Yo yo yo")]);
        assert!(highlight("").is_empty());
    }

    #[test]
    fn view_follows_generation_state() {
        assert!(matches!(
            ViewState::from_state(&GenerationState::Idle, false),
            ViewState::Empty { .. }
        ));
        assert!(matches!(
            ViewState::from_state(&GenerationState::Pending, false),
            ViewState::Pending { .. }
        ));
        assert_eq!(
            ViewState::from_state(&GenerationState::Failed("boom".into()), false),
            ViewState::Error {
                title: ERROR_TITLE,
                message: "boom".into()
            }
        );
        match ViewState::from_state(&GenerationState::Success("[Intro]\nHello".into()), true) {
            ViewState::Result {
                text,
                segments,
                copied,
            } => {
                assert_eq!(text, "[Intro]\nHello");
                assert_eq!(segments[0], tag("[Intro]"));
                assert!(copied);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn view_serializes_with_tag() {
        let json = serde_json::to_value(ViewState::from_state(&GenerationState::Pending, false)).unwrap();
        assert_eq!(json["view"], "pending");
        assert_eq!(json["headline"], PENDING_HEADLINE);
    }
}
