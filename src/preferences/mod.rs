//! In-memory Preference Set for the current session.
//!
//! The set is created with defaults when the app starts, mutated one field
//! at a time by the form and discarded on exit. Dependents observe changes
//! through a `watch` channel instead of polling.

pub mod catalog;
pub mod options;
pub mod wizard;

pub use catalog::{OptionCatalog, OptionChoice, PresetCard};
pub use options::{
    AdLibIntensity, AlliterationLevel, EmotionalTone, EnergyLevel, PunchlineDensity,
    RegionalFlavor, RhymeComplexity, StorytellingDepth, StylePreset, UnknownOption,
    VocabularyLevel,
};
pub use wizard::SongSection;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PreferenceSet {
    pub idea: String,
    pub explicit: bool,
    pub style_preset: StylePreset,
    pub rhyme_complexity: RhymeComplexity,
    pub storytelling_depth: StorytellingDepth,
    pub emotional_tone: EmotionalTone,
    pub vocabulary_level: VocabularyLevel,
    pub ad_lib_intensity: AdLibIntensity,
    pub regional_flavor: RegionalFlavor,
    pub energy_level: EnergyLevel,
    pub alliteration_level: AlliterationLevel,
    pub punchline_density: PunchlineDensity,
    pub artist_reference: String,
}

impl Default for PreferenceSet {
    fn default() -> Self {
        Self {
            idea: String::new(),
            explicit: false,
            style_preset: StylePreset::Erb,
            rhyme_complexity: RhymeComplexity::Complex,
            storytelling_depth: StorytellingDepth::Linear,
            emotional_tone: EmotionalTone::Aggressive,
            vocabulary_level: VocabularyLevel::Balanced,
            ad_lib_intensity: AdLibIntensity::Sparse,
            regional_flavor: RegionalFlavor::Global,
            energy_level: EnergyLevel::Moderate,
            alliteration_level: AlliterationLevel::Subtle,
            punchline_density: PunchlineDensity::Balanced,
            artist_reference: String::new(),
        }
    }
}

/// A single-field replacement, as sent by the form.
///
/// On the wire: `{"field": "rhyme_complexity", "value": "GOD_TIER"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PreferenceUpdate {
    Idea(String),
    Explicit(bool),
    StylePreset(StylePreset),
    RhymeComplexity(RhymeComplexity),
    StorytellingDepth(StorytellingDepth),
    EmotionalTone(EmotionalTone),
    VocabularyLevel(VocabularyLevel),
    AdLibIntensity(AdLibIntensity),
    RegionalFlavor(RegionalFlavor),
    EnergyLevel(EnergyLevel),
    AlliterationLevel(AlliterationLevel),
    PunchlineDensity(PunchlineDensity),
    ArtistReference(String),
}

impl PreferenceUpdate {
    pub fn field(&self) -> &'static str {
        match self {
            PreferenceUpdate::Idea(_) => "idea",
            PreferenceUpdate::Explicit(_) => "explicit",
            PreferenceUpdate::StylePreset(_) => StylePreset::FIELD,
            PreferenceUpdate::RhymeComplexity(_) => RhymeComplexity::FIELD,
            PreferenceUpdate::StorytellingDepth(_) => StorytellingDepth::FIELD,
            PreferenceUpdate::EmotionalTone(_) => EmotionalTone::FIELD,
            PreferenceUpdate::VocabularyLevel(_) => VocabularyLevel::FIELD,
            PreferenceUpdate::AdLibIntensity(_) => AdLibIntensity::FIELD,
            PreferenceUpdate::RegionalFlavor(_) => RegionalFlavor::FIELD,
            PreferenceUpdate::EnergyLevel(_) => EnergyLevel::FIELD,
            PreferenceUpdate::AlliterationLevel(_) => AlliterationLevel::FIELD,
            PreferenceUpdate::PunchlineDensity(_) => PunchlineDensity::FIELD,
            PreferenceUpdate::ArtistReference(_) => "artist_reference",
        }
    }
}

impl PreferenceSet {
    /// Replaces one field. Returns `true` if the stored value changed.
    pub fn apply(&mut self, update: PreferenceUpdate) -> bool {
        fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
            if *slot == value {
                false
            } else {
                *slot = value;
                true
            }
        }

        match update {
            PreferenceUpdate::Idea(v) => replace(&mut self.idea, v),
            PreferenceUpdate::Explicit(v) => replace(&mut self.explicit, v),
            PreferenceUpdate::StylePreset(v) => replace(&mut self.style_preset, v),
            PreferenceUpdate::RhymeComplexity(v) => replace(&mut self.rhyme_complexity, v),
            PreferenceUpdate::StorytellingDepth(v) => replace(&mut self.storytelling_depth, v),
            PreferenceUpdate::EmotionalTone(v) => replace(&mut self.emotional_tone, v),
            PreferenceUpdate::VocabularyLevel(v) => replace(&mut self.vocabulary_level, v),
            PreferenceUpdate::AdLibIntensity(v) => replace(&mut self.ad_lib_intensity, v),
            PreferenceUpdate::RegionalFlavor(v) => replace(&mut self.regional_flavor, v),
            PreferenceUpdate::EnergyLevel(v) => replace(&mut self.energy_level, v),
            PreferenceUpdate::AlliterationLevel(v) => replace(&mut self.alliteration_level, v),
            PreferenceUpdate::PunchlineDensity(v) => replace(&mut self.punchline_density, v),
            PreferenceUpdate::ArtistReference(v) => replace(&mut self.artist_reference, v),
        }
    }
}

/// Owner of the session's Preference Set.
pub struct PreferenceStore {
    current: watch::Sender<PreferenceSet>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::with_preferences(PreferenceSet::default())
    }

    pub fn with_preferences(preferences: PreferenceSet) -> Self {
        let (current, _) = watch::channel(preferences);
        Self { current }
    }

    pub fn snapshot(&self) -> PreferenceSet {
        self.current.borrow().clone()
    }

    /// Applies `update` and wakes subscribers if the value changed.
    pub fn apply(&self, update: PreferenceUpdate) -> PreferenceSet {
        let field = update.field();
        let changed = self.current.send_if_modified(|set| set.apply(update));
        debug!(field, changed, "Preference updated");
        self.snapshot()
    }

    /// Rewrites the idea with a wizard section prefix.
    pub fn apply_structure(&self, section: SongSection) -> PreferenceSet {
        let idea = section.apply_to(&self.current.borrow().idea);
        self.apply(PreferenceUpdate::Idea(idea))
    }

    pub fn subscribe(&self) -> watch::Receiver<PreferenceSet> {
        self.current.subscribe()
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_form() {
        let set = PreferenceSet::default();
        assert_eq!(set.style_preset, StylePreset::Erb);
        assert_eq!(set.rhyme_complexity, RhymeComplexity::Complex);
        assert_eq!(set.ad_lib_intensity, AdLibIntensity::Sparse);
        assert_eq!(set.alliteration_level, AlliterationLevel::Subtle);
        assert_eq!(set.energy_level, EnergyLevel::Moderate);
        assert!(!set.explicit);
        assert!(set.idea.is_empty());
        assert!(set.artist_reference.is_empty());
    }

    #[test]
    fn update_deserializes_from_tagged_json() {
        let update: PreferenceUpdate =
            serde_json::from_str(r#"{"field": "rhyme_complexity", "value": "GOD_TIER"}"#).unwrap();
        assert_eq!(update, PreferenceUpdate::RhymeComplexity(RhymeComplexity::GodTier));

        let update: PreferenceUpdate =
            serde_json::from_str(r#"{"field": "explicit", "value": true}"#).unwrap();
        assert_eq!(update, PreferenceUpdate::Explicit(true));

        let bad = serde_json::from_str::<PreferenceUpdate>(
            r#"{"field": "energy_level", "value": "MAXIMUM"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn apply_replaces_only_the_named_field() {
        let store = PreferenceStore::new();
        let after = store.apply(PreferenceUpdate::RegionalFlavor(RegionalFlavor::Uk));

        let mut expected = PreferenceSet::default();
        expected.regional_flavor = RegionalFlavor::Uk;
        assert_eq!(after, expected);
        assert_eq!(store.snapshot(), expected);
    }

    #[tokio::test]
    async fn subscribers_see_changes_but_not_no_ops() {
        let store = PreferenceStore::new();
        let mut rx = store.subscribe();

        store.apply(PreferenceUpdate::StylePreset(StylePreset::Erb));
        assert!(!rx.has_changed().unwrap());

        store.apply(PreferenceUpdate::StylePreset(StylePreset::Grime));
        assert!(rx.has_changed().unwrap());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().style_preset, StylePreset::Grime);
    }

    #[test]
    fn structure_rewrites_idea() {
        let store = PreferenceStore::new();
        store.apply(PreferenceUpdate::Idea("  rainy night in Leeds ".into()));

        let set = store.apply_structure(SongSection::Chorus);
        assert_eq!(set.idea, "Draft an anthemic [Chorus] for: rainy night in Leeds");

        let set = store.apply_structure(SongSection::Outro);
        assert_eq!(set.idea, "Draft a fading [Outro] for: rainy night in Leeds");
    }
}
