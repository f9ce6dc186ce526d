//! Editor configuration
//!
//! Every field has a default, so an empty YAML or JSON object is a valid
//! configuration. The grid dimensions (6 strings, 16 positions, frets
//! 0-24) are fixed and not configurable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EditorError, Result};
use crate::models::{StringIndex, STRING_COUNT};

/// Default wait before a single typed digit is committed
pub const DEFAULT_DISAMBIGUATION_WINDOW_MS: u32 = 500;

/// Glyph shown in an empty cell
pub const DEFAULT_PLACEHOLDER: &str = "─";

/// Tempo range of the playback widget
pub const MIN_TEMPO_BPM: u16 = 60;
pub const MAX_TEMPO_BPM: u16 = 240;
pub const DEFAULT_TEMPO_BPM: u16 = 120;

/// Open-string labels and pitches, lowest string first
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Tuning {
    pub labels: [String; STRING_COUNT],
    pub midi_pitches: [u8; STRING_COUNT],
}

impl Default for Tuning {
    /// Standard tuning, E2 A2 D3 G3 B3 E4
    fn default() -> Self {
        Self {
            labels: ["E", "A", "D", "G", "B", "E"].map(String::from),
            midi_pitches: [40, 45, 50, 55, 59, 64],
        }
    }
}

impl Tuning {
    pub fn label(&self, string: StringIndex) -> &str {
        &self.labels[string.index()]
    }

    pub fn open_pitch(&self, string: StringIndex) -> u8 {
        self.midi_pitches[string.index()]
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// How long a lone digit waits for a second digit
    pub disambiguation_window_ms: u32,

    /// Measures in a freshly created document
    pub initial_measures: usize,

    /// Text of an empty cell
    pub placeholder: String,

    pub tuning: Tuning,

    /// Tempo used for MIDI export, clamped to the playback range
    pub tempo_bpm: u16,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            disambiguation_window_ms: DEFAULT_DISAMBIGUATION_WINDOW_MS,
            initial_measures: 1,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            tuning: Tuning::default(),
            tempo_bpm: DEFAULT_TEMPO_BPM,
        }
    }
}

impl EditorConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| EditorError::InvalidConfig(format!("YAML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| EditorError::InvalidConfig(format!("JSON parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EditorError::InvalidConfig(format!("failed to read {}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            other => Err(EditorError::InvalidConfig(format!(
                "unsupported config extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.disambiguation_window_ms == 0 {
            return Err(EditorError::InvalidConfig(
                "disambiguation_window_ms must be greater than 0".to_string(),
            ));
        }
        if self.initial_measures == 0 {
            return Err(EditorError::InvalidConfig("initial_measures must be at least 1".to_string()));
        }
        if self.placeholder.is_empty() {
            return Err(EditorError::InvalidConfig("placeholder must not be empty".to_string()));
        }
        // Highest open string plus the highest fret must stay a MIDI key
        if let Some(pitch) = self.tuning.midi_pitches.iter().find(|p| **p > 127 - crate::models::MAX_FRET) {
            return Err(EditorError::InvalidConfig(format!(
                "open string pitch {} leaves no room for 24 frets",
                pitch
            )));
        }
        Ok(())
    }

    /// Tempo clamped to the range the playback widget offers
    pub fn effective_tempo(&self) -> u16 {
        self.tempo_bpm.clamp(MIN_TEMPO_BPM, MAX_TEMPO_BPM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = EditorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.disambiguation_window_ms, 500);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = EditorConfig::from_json_str(r#"{"disambiguation_window_ms": 350, "tempo_bpm": 90}"#).unwrap();
        assert_eq!(config.disambiguation_window_ms, 350);
        assert_eq!(config.tempo_bpm, 90);
        assert_eq!(config.placeholder, "─");
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = EditorConfig::from_yaml_str("disambiguation_window_ms: 0").unwrap_err();
        assert!(matches!(err, EditorError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        assert!(EditorConfig::from_yaml_str("initial_measures: [").is_err());
    }

    #[test]
    fn test_tempo_clamped() {
        let mut config = EditorConfig::default();
        config.tempo_bpm = 400;
        assert_eq!(config.effective_tempo(), 240);
        config.tempo_bpm = 10;
        assert_eq!(config.effective_tempo(), 60);
    }

    #[test]
    fn test_standard_tuning_labels() {
        let tuning = Tuning::default();
        assert_eq!(tuning.label(StringIndex::LowE), "E");
        assert_eq!(tuning.label(StringIndex::B), "B");
        assert_eq!(tuning.open_pitch(StringIndex::HighE), 64);
    }
}
