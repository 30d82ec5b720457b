//! Enumerated stylistic choices.
//!
//! Every field of the preference set that the form offers as a fixed list
//! is one of these enums. The wire value (what the webview sends and what
//! ends up in the prompt) is the SCREAMING_SNAKE_CASE variant name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const FIELD: &'static str = $field;

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(UnknownOption {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

option_enum! {
    /// Overall genre the song is written in.
    StylePreset("style_preset") {
        Erb => "ERB",
        Icp => "ICP",
        OldSchool => "OLD_SCHOOL",
        ModernTrap => "MODERN_TRAP",
        UkDrill => "UK_DRILL",
        SouthernGosick => "SOUTHERN_GOSICK",
        GFunk => "G_FUNK",
        Grime => "GRIME",
        EmoRap => "EMO_RAP",
        Chopper => "CHOPPER",
        LofiHiphop => "LOFI_HIPHOP",
        Conscious => "CONSCIOUS",
    }
}

option_enum! {
    RhymeComplexity("rhyme_complexity") {
        Simple => "SIMPLE",
        Complex => "COMPLEX",
        GodTier => "GOD_TIER",
    }
}

option_enum! {
    StorytellingDepth("storytelling_depth") {
        Linear => "LINEAR",
        Fragmented => "FRAGMENTED",
        Convoluted => "CONVOLUTED",
    }
}

option_enum! {
    EmotionalTone("emotional_tone") {
        Aggressive => "AGGRESSIVE",
        Introspective => "INTROSPECTIVE",
        Humorous => "HUMOROUS",
        Dark => "DARK",
        Triumphant => "TRIUMPHANT",
    }
}

option_enum! {
    VocabularyLevel("vocabulary_level") {
        Street => "STREET",
        Balanced => "BALANCED",
        Literary => "LITERARY",
    }
}

option_enum! {
    AdLibIntensity("ad_lib_intensity") {
        None => "NONE",
        Sparse => "SPARSE",
        Heavy => "HEAVY",
    }
}

option_enum! {
    RegionalFlavor("regional_flavor") {
        Global => "GLOBAL",
        EastCoast => "EAST_COAST",
        WestCoast => "WEST_COAST",
        Southern => "SOUTHERN",
        Uk => "UK",
    }
}

option_enum! {
    EnergyLevel("energy_level") {
        Chill => "CHILL",
        Moderate => "MODERATE",
        HighEnergy => "HIGH_ENERGY",
    }
}

option_enum! {
    AlliterationLevel("alliteration_level") {
        None => "NONE",
        Subtle => "SUBTLE",
        Heavy => "HEAVY",
    }
}

option_enum! {
    PunchlineDensity("punchline_density") {
        Sparse => "SPARSE",
        Balanced => "BALANCED",
        Lethal => "LETHAL",
    }
}
