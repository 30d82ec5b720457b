//! Turns a Preference Set into the single instruction string sent to the
//! generation API.
//!
//! Composition is a pure function: the same preferences always give the
//! same prompt. The only validation in the whole pipeline lives here.

pub mod templates;

use crate::preferences::PreferenceSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Please enter an idea for your lyrics first.")]
    EmptyIdea,
}

pub fn compose(prefs: &PreferenceSet) -> Result<String, ComposeError> {
    if prefs.idea.trim().is_empty() {
        return Err(ComposeError::EmptyIdea);
    }

    let artist = if prefs.artist_reference.trim().is_empty() {
        templates::NO_ARTIST
    } else {
        prefs.artist_reference.as_str()
    };

    let specs = [
        format!(
            "- Base Style: {} | {}",
            prefs.style_preset,
            templates::style_instructions(prefs.style_preset)
        ),
        format!(
            "- Rhyme: {} (Level: {})",
            prefs.rhyme_complexity,
            templates::rhyme_level(prefs.rhyme_complexity)
        ),
        format!("- Logic: {} narrative path.", prefs.storytelling_depth),
        format!("- Tone: {} energy.", prefs.emotional_tone),
        format!("- Vocabulary: {} level.", prefs.vocabulary_level),
        format!("- Regional: {} flavor.", prefs.regional_flavor),
        format!("- Energy: {} performance.", prefs.energy_level),
        format!(
            "- Stylistics: {} alliteration, {} punchline density.",
            prefs.alliteration_level, prefs.punchline_density
        ),
        format!("- Ad-libs: {} intensity.", prefs.ad_lib_intensity),
        format!("- Artist Reference: {}.", artist),
        format!("- Explicit: {}.", templates::explicit_clause(prefs.explicit)),
    ];

    Ok(format!(
        "{persona}\nMISSION: Write an elite complete rap song based on this concept: \"{idea}\".\n\n{constraints}\n\nSPECS:\n{specs}\n\n{technical}\n{output}",
        persona = templates::PERSONA,
        idea = prefs.idea,
        constraints = templates::CONSTRAINTS,
        specs = specs.join("\n"),
        technical = templates::TECHNICAL,
        output = templates::OUTPUT,
    ))
}
