//! What the form is allowed to offer for each field.

use super::options::*;
use super::wizard::SongSection;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OptionChoice {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PresetCard {
    pub id: StylePreset,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SectionButton {
    pub id: SongSection,
    pub label: &'static str,
    pub icon: &'static str,
}

#[derive(Serialize, Debug, Clone)]
pub struct OptionCatalog {
    pub presets: Vec<PresetCard>,
    pub sections: Vec<SectionButton>,
    pub rhyme_complexity: Vec<OptionChoice>,
    pub storytelling_depth: Vec<OptionChoice>,
    pub emotional_tone: Vec<OptionChoice>,
    pub vocabulary_level: Vec<OptionChoice>,
    pub ad_lib_intensity: Vec<OptionChoice>,
    pub regional_flavor: Vec<OptionChoice>,
    pub energy_level: Vec<OptionChoice>,
    pub alliteration_level: Vec<OptionChoice>,
    pub punchline_density: Vec<OptionChoice>,
}

fn choices<T: Copy>(all: &[T], value: fn(&T) -> &'static str, label: fn(&T) -> &'static str) -> Vec<OptionChoice> {
    all.iter()
        .map(|o| OptionChoice {
            value: value(o),
            label: label(o),
        })
        .collect()
}

impl StylePreset {
    pub fn card(&self) -> PresetCard {
        let (label, description, icon) = match self {
            StylePreset::Erb => ("ERB Battle", "Reference-heavy.", "⚔️"),
            StylePreset::OldSchool => ("Old School", "Classic Boom-Bap.", "📻"),
            StylePreset::ModernTrap => ("Modern Trap", "Triplet Flow.", "💎"),
            StylePreset::UkDrill => ("UK Drill", "Aggressive Slides.", "💂"),
            StylePreset::Conscious => ("Conscious", "Social Truths.", "👁️"),
            StylePreset::Chopper => ("Chopper", "Rapid Fire.", "🚁"),
            StylePreset::GFunk => ("G-Funk", "West Coast Funk.", "🌴"),
            StylePreset::Grime => ("Grime", "140 BPM UK.", "🔌"),
            StylePreset::EmoRap => ("Emo Rap", "Melancholic.", "💔"),
            StylePreset::LofiHiphop => ("Lofi / Jazz", "Relaxed Wit.", "☕"),
            StylePreset::Icp => ("Dark Carnival", "Horrorcore.", "🤡"),
            StylePreset::SouthernGosick => ("Crunk/South", "Club Hype.", "🐊"),
        };
        PresetCard {
            id: *self,
            label,
            description,
            icon,
        }
    }
}

// Display order of the preset cards in the form.
const PRESET_ORDER: [StylePreset; 12] = [
    StylePreset::Erb,
    StylePreset::OldSchool,
    StylePreset::ModernTrap,
    StylePreset::UkDrill,
    StylePreset::Conscious,
    StylePreset::Chopper,
    StylePreset::GFunk,
    StylePreset::Grime,
    StylePreset::EmoRap,
    StylePreset::LofiHiphop,
    StylePreset::Icp,
    StylePreset::SouthernGosick,
];

impl RhymeComplexity {
    pub fn label(&self) -> &'static str {
        match self {
            RhymeComplexity::Simple => "Basic",
            RhymeComplexity::Complex => "Multi",
            RhymeComplexity::GodTier => "Elite",
        }
    }
}

impl StorytellingDepth {
    pub fn label(&self) -> &'static str {
        match self {
            StorytellingDepth::Linear => "Clear",
            StorytellingDepth::Fragmented => "Vibe",
            StorytellingDepth::Convoluted => "Meta",
        }
    }
}

impl EmotionalTone {
    pub fn label(&self) -> &'static str {
        match self {
            EmotionalTone::Aggressive => "Aggro",
            EmotionalTone::Introspective => "Deep",
            EmotionalTone::Humorous => "Witty",
            EmotionalTone::Dark => "Dark",
            EmotionalTone::Triumphant => "Glory",
        }
    }
}

impl VocabularyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            VocabularyLevel::Street => "Street",
            VocabularyLevel::Balanced => "Mid",
            VocabularyLevel::Literary => "Scholar",
        }
    }
}

impl AdLibIntensity {
    pub fn label(&self) -> &'static str {
        match self {
            AdLibIntensity::None => "Dry",
            AdLibIntensity::Sparse => "Med",
            AdLibIntensity::Heavy => "Loud",
        }
    }
}

impl RegionalFlavor {
    pub fn label(&self) -> &'static str {
        match self {
            RegionalFlavor::Global => "Std",
            RegionalFlavor::EastCoast => "East",
            RegionalFlavor::WestCoast => "West",
            RegionalFlavor::Southern => "South",
            RegionalFlavor::Uk => "UK",
        }
    }
}

impl EnergyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            EnergyLevel::Chill => "Chill",
            EnergyLevel::Moderate => "Mid",
            EnergyLevel::HighEnergy => "Hype",
        }
    }
}

impl AlliterationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AlliterationLevel::None => "Off",
            AlliterationLevel::Subtle => "Low",
            AlliterationLevel::Heavy => "High",
        }
    }
}

impl PunchlineDensity {
    pub fn label(&self) -> &'static str {
        match self {
            PunchlineDensity::Sparse => "Low",
            PunchlineDensity::Balanced => "Med",
            PunchlineDensity::Lethal => "Max",
        }
    }
}

impl OptionCatalog {
    pub fn build() -> Self {
        Self {
            presets: PRESET_ORDER.iter().map(StylePreset::card).collect(),
            sections: SongSection::ALL
                .iter()
                .map(|s| SectionButton {
                    id: *s,
                    label: s.label(),
                    icon: s.icon(),
                })
                .collect(),
            rhyme_complexity: choices(RhymeComplexity::ALL, RhymeComplexity::as_str, RhymeComplexity::label),
            storytelling_depth: choices(StorytellingDepth::ALL, StorytellingDepth::as_str, StorytellingDepth::label),
            emotional_tone: choices(EmotionalTone::ALL, EmotionalTone::as_str, EmotionalTone::label),
            vocabulary_level: choices(VocabularyLevel::ALL, VocabularyLevel::as_str, VocabularyLevel::label),
            ad_lib_intensity: choices(AdLibIntensity::ALL, AdLibIntensity::as_str, AdLibIntensity::label),
            regional_flavor: choices(RegionalFlavor::ALL, RegionalFlavor::as_str, RegionalFlavor::label),
            energy_level: choices(EnergyLevel::ALL, EnergyLevel::as_str, EnergyLevel::label),
            alliteration_level: choices(AlliterationLevel::ALL, AlliterationLevel::as_str, AlliterationLevel::label),
            punchline_density: choices(PunchlineDensity::ALL, PunchlineDensity::as_str, PunchlineDensity::label),
        }
    }
}
