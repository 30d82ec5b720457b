//! Re-usable prompt fragments.

use crate::preferences::{RhymeComplexity, StylePreset};

pub const PERSONA: &str = "You are 'The Architect', an elite technical ghostwriter.";

pub const CONSTRAINTS: &str = "CONSTRAINTS:
- Use [Beat Style], [Vocal Style], [Flow], and [Section Name] tags.
- Structure: [Intro], [Verse 1], [Chorus], [Verse 2], [Bridge], [Verse 3], [Outro].";

pub const TECHNICAL: &str =
    "TECHNICAL: Use sophisticated double-entendres and rhythmic assonance.";

pub const OUTPUT: &str = "OUTPUT: Lyrics and tags only.";

pub const NO_ARTIST: &str = "None specified";

pub const EXPLICIT_ALLOWED: &str = "ALLOWED (Use raw profanity)";
pub const EXPLICIT_FORBIDDEN: &str = "STRICTLY CLEAN";

pub fn style_instructions(preset: StylePreset) -> &'static str {
    match preset {
        StylePreset::Erb => "STYLE: EPIC RAP BATTLES OF HISTORY. Focus on competitive historical references and high-speed multi-syllabic punchlines. [Beat: Orchestral Boom-Bap]",
        StylePreset::OldSchool => "STYLE: 90s BOOM BAP. Focus on social commentary, rhythm, and authority. [Beat: Dusty Soul Samples]",
        StylePreset::ModernTrap => "STYLE: MODERN TRAP. Focus on melodic bounce, triplets, and vibe. [Beat: Dark 808s]",
        StylePreset::UkDrill => "STYLE: UK DRILL. Focus on gritty syncopation and sliding bass pockets. [Beat: Cold Sliding 808s]",
        StylePreset::Conscious => "STYLE: CONSCIOUS. Focus on philosophy and truth-seeking. [Beat: Jazzy Melodies]",
        StylePreset::Chopper => "STYLE: CHOPPER. Focus on technical speed and breath control. [Beat: Fast 130 BPM]",
        StylePreset::GFunk => "STYLE: G-FUNK. West Coast authority and sunny grooves. [Beat: Funky Bass & High Synths]",
        StylePreset::Grime => "STYLE: UK GRIME. High-energy electronic aggression. [Beat: 140 BPM Electronic]",
        StylePreset::EmoRap => "STYLE: EMO RAP. Vulnerability and melancholic melody. [Beat: Sad Guitar Loops]",
        StylePreset::LofiHiphop => "STYLE: LOFI. Conversational chill flow. [Beat: Dusty Piano & Rain]",
        StylePreset::Icp => "STYLE: DARK CARNIVAL (Horrorcore). Theatrical wickedness. [Beat: Eerie Carnival Synths]",
        StylePreset::SouthernGosick => "STYLE: SOUTHERN CRUNK. Anthemic club energy. [Beat: Loud Brass & Bass]",
    }
}

/// Level descriptor shown next to the rhyme setting.
pub fn rhyme_level(rhyme: RhymeComplexity) -> &'static str {
    match rhyme {
        RhymeComplexity::GodTier => "Infinite/Mosaic",
        other => other.as_str(),
    }
}

pub fn explicit_clause(explicit: bool) -> &'static str {
    if explicit {
        EXPLICIT_ALLOWED
    } else {
        EXPLICIT_FORBIDDEN
    }
}
