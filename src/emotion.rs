//! The emotion table: colors for the wave, tone categories for the sound.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Which healing tone an emotion maps to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneCategory {
    Anger,
    Fear,
    Surprise,
    Happy,
    Sad,
    Disgust,
    Default,
}

/// How a category's sources are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synthesis {
    /// Two sines `beat` Hz apart.
    BinauralBeat,
    /// Four sines at 1, 1.25, 1.5 and 2 times the root.
    HealingChord,
}

impl ToneCategory {
    pub const ALL: [ToneCategory; 7] = [
        ToneCategory::Anger,
        ToneCategory::Fear,
        ToneCategory::Surprise,
        ToneCategory::Happy,
        ToneCategory::Sad,
        ToneCategory::Disgust,
        ToneCategory::Default,
    ];

    pub fn synthesis(self) -> Synthesis {
        match self {
            ToneCategory::Anger | ToneCategory::Fear | ToneCategory::Sad | ToneCategory::Disgust => {
                Synthesis::BinauralBeat
            }
            ToneCategory::Surprise | ToneCategory::Happy | ToneCategory::Default => {
                Synthesis::HealingChord
            }
        }
    }

    /// Root frequency in Hz.
    pub fn base_frequency(self) -> f32 {
        match self {
            ToneCategory::Anger => 396.0,
            ToneCategory::Fear => 432.0,
            ToneCategory::Sad => 417.0,
            ToneCategory::Disgust => 741.0,
            ToneCategory::Surprise => 528.0,
            ToneCategory::Happy => 639.0,
            ToneCategory::Default => 432.0,
        }
    }

    /// Beat frequency in Hz, only for binaural categories.
    pub fn beat_frequency(self) -> Option<f32> {
        match self {
            ToneCategory::Anger => Some(10.0),
            ToneCategory::Fear => Some(6.0),
            ToneCategory::Sad => Some(4.0),
            ToneCategory::Disgust => Some(8.0),
            ToneCategory::Surprise | ToneCategory::Happy | ToneCategory::Default => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToneCategory::Anger => "anger",
            ToneCategory::Fear => "fear",
            ToneCategory::Surprise => "surprise",
            ToneCategory::Happy => "happy",
            ToneCategory::Sad => "sad",
            ToneCategory::Disgust => "disgust",
            ToneCategory::Default => "default",
        }
    }
}

/// Static description of one emotion.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionProfile {
    pub name: &'static str,
    pub color: Rgb,
    pub tone_category: ToneCategory,
    pub base_frequency: f32,
    pub beat_frequency: Option<f32>,
}

impl EmotionProfile {
    fn from_entry(&(name, hex, tone_category): &(&'static str, &'static str, ToneCategory)) -> Self {
        Self {
            name,
            color: Rgb::from_hex_or_white(hex),
            tone_category,
            base_frequency: tone_category.base_frequency(),
            beat_frequency: tone_category.beat_frequency(),
        }
    }

    /// Profile used for keys missing from the table: white, default chord.
    pub fn fallback(name: &'static str) -> Self {
        Self::from_entry(&(name, DEFAULT_COLOR, ToneCategory::Default))
    }

    /// Label like `396Hz (+10Hz)` for display next to the emotion.
    pub fn sound_label(&self) -> String {
        match self.beat_frequency {
            Some(beat) => format!("{}Hz (+{}Hz)", self.base_frequency, beat),
            None => format!("{}Hz", self.base_frequency),
        }
    }
}

const DEFAULT_COLOR: &str = "#ffffff";

/// Wheel order, grouped by category.
const EMOTIONS: &[(&str, &str, ToneCategory)] = &[
    // Anger (red)
    ("anger", "#ff6b6b", ToneCategory::Anger),
    ("enraged", "#ff5252", ToneCategory::Anger),
    ("livid", "#f44336", ToneCategory::Anger),
    ("furious", "#e53935", ToneCategory::Anger),
    ("irate", "#d32f2f", ToneCategory::Anger),
    // Fear (green)
    ("fear", "#4ecdc4", ToneCategory::Fear),
    ("terrified", "#26a69a", ToneCategory::Fear),
    ("scared", "#00796b", ToneCategory::Fear),
    ("anxious", "#004d40", ToneCategory::Fear),
    ("worried", "#00695c", ToneCategory::Fear),
    // Surprise (cyan)
    ("surprise", "#45b7d1", ToneCategory::Surprise),
    ("amazed", "#42a5f5", ToneCategory::Surprise),
    ("confused", "#1e88e5", ToneCategory::Surprise),
    ("startled", "#1565c0", ToneCategory::Surprise),
    // Happy (yellow)
    ("happy", "#f9ca24", ToneCategory::Happy),
    ("joyful", "#f0932b", ToneCategory::Happy),
    ("ecstatic", "#eb4d4b", ToneCategory::Happy),
    ("optimistic", "#6c5ce7", ToneCategory::Happy),
    // Sad (blue)
    ("sad", "#74b9ff", ToneCategory::Sad),
    ("depressed", "#0984e3", ToneCategory::Sad),
    ("lonely", "#2d3436", ToneCategory::Sad),
    ("despair", "#636e72", ToneCategory::Sad),
    // Disgust (purple)
    ("disgust", "#a29bfe", ToneCategory::Disgust),
    ("revolted", "#6c5ce7", ToneCategory::Disgust),
    ("loathing", "#5f3dc4", ToneCategory::Disgust),
    ("repugnant", "#7048e8", ToneCategory::Disgust),
];

/// Look up an emotion by key (case-insensitive).
pub fn lookup(name: &str) -> Option<EmotionProfile> {
    EMOTIONS
        .iter()
        .find(|(key, _, _)| key.eq_ignore_ascii_case(name.trim()))
        .map(EmotionProfile::from_entry)
}

/// Look up an emotion, resolving unknown keys to the white default profile.
pub fn profile(name: &str) -> EmotionProfile {
    lookup(name).unwrap_or_else(|| EmotionProfile::fallback("default"))
}

/// Every emotion in wheel order.
pub fn all() -> impl ExactSizeIterator<Item = EmotionProfile> {
    EMOTIONS.iter().map(EmotionProfile::from_entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_emotion_name() {
        assert_eq!(all().len(), 26);
        let anger: Vec<_> = all()
            .filter(|p| p.tone_category == ToneCategory::Anger)
            .map(|p| p.name)
            .collect();
        assert_eq!(anger, ["anger", "enraged", "livid", "furious", "irate"]);
    }

    #[test]
    fn keys_are_unique() {
        let names: Vec<_> = all().map(|p| p.name).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name), "duplicate key {name}");
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let profile = lookup("Anxious").expect("anxious is in the table");
        assert_eq!(profile.color, Rgb::new(0x00, 0x4d, 0x40));
        assert_eq!(profile.tone_category, ToneCategory::Fear);
    }

    #[test]
    fn unknown_emotion_gets_white_default() {
        assert!(lookup("bored").is_none());
        let profile = profile("bored");
        assert_eq!(profile.color, Rgb::WHITE);
        assert_eq!(profile.tone_category, ToneCategory::Default);
        assert_eq!(profile.beat_frequency, None);
    }

    #[test]
    fn beat_frequency_only_for_binaural_categories() {
        for category in ToneCategory::ALL {
            let has_beat = category.beat_frequency().is_some();
            assert_eq!(has_beat, category.synthesis() == Synthesis::BinauralBeat);
            assert!(category.base_frequency() > 0.0);
        }
    }

    #[test]
    fn sound_label_mentions_beat() {
        assert_eq!(profile("sad").sound_label(), "417Hz (+4Hz)");
        assert_eq!(profile("happy").sound_label(), "639Hz");
    }
}
