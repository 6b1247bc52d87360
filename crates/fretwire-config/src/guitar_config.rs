//! The guitar configuration file.

use crate::{ConfigError, parse_note_name, tuning_by_name};
use fretwire_synth::DEFAULT_GAIN;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Sample rate used when no output device reports one.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Frames per output block requested from the audio device.
pub const DEFAULT_BUFFER_SIZE: u32 = 1024;

/// How a tuning is written in a config file.
///
/// ```toml
/// tuning = "drop-d"
/// # or
/// tuning = ["D2", "A2", 50, 55, "B3", "E4"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TuningSpec {
    /// A built-in tuning by name.
    Named(String),
    /// One entry per string, lowest first.
    Pitches(Vec<PitchSpec>),
}

impl Default for TuningSpec {
    fn default() -> Self {
        TuningSpec::Named("standard".to_string())
    }
}

/// A single string's base pitch: a pitch code or a note name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PitchSpec {
    /// Pitch code, `69` = A4.
    Code(i32),
    /// Note name such as `"E2"`.
    Name(String),
}

impl PitchSpec {
    /// Resolve to a pitch code.
    pub fn resolve(&self) -> Result<i32, ConfigError> {
        match self {
            PitchSpec::Code(code) => Ok(*code),
            PitchSpec::Name(name) => parse_note_name(name),
        }
    }
}

/// Instrument and output settings, loaded from `config.toml`.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// # Example
///
/// ```toml
/// tuning = "open-g"
/// gain = 3.5
/// buffer_size = 512
/// output_device = "USB Audio"
/// seed = 42
///
/// [chords]
/// G = "320003"
/// C = "x32010"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuitarConfig {
    /// String tuning.
    pub tuning: TuningSpec,
    /// Output gain applied after averaging the strings.
    pub gain: f64,
    /// Sample rate for offline rendering, and the fallback when no device is open.
    pub sample_rate: u32,
    /// Frames per block requested from the audio device.
    pub buffer_size: u32,
    /// Output device name; the system default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_device: Option<String>,
    /// Seed for the pluck noise; a fixed default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Named chord shapes, usable anywhere a shape is expected.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub chords: BTreeMap<String, String>,
}

impl Default for GuitarConfig {
    fn default() -> Self {
        Self {
            tuning: TuningSpec::default(),
            gain: DEFAULT_GAIN,
            sample_rate: DEFAULT_SAMPLE_RATE,
            buffer_size: DEFAULT_BUFFER_SIZE,
            output_device: None,
            seed: None,
            chords: BTreeMap::new(),
        }
    }
}

impl GuitarConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded guitar config");
        Ok(config)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: GuitarConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), "saved guitar config");
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve the tuning to one base pitch per string.
    pub fn resolve_tuning(&self) -> Result<Vec<i32>, ConfigError> {
        let pitches = match &self.tuning {
            TuningSpec::Named(name) => tuning_by_name(name)
                .ok_or_else(|| ConfigError::UnknownTuning(name.clone()))?
                .to_vec(),
            TuningSpec::Pitches(specs) => specs
                .iter()
                .map(PitchSpec::resolve)
                .collect::<Result<Vec<_>, _>>()?,
        };
        if pitches.is_empty() {
            return Err(ConfigError::Invalid("tuning has no strings".to_string()));
        }
        Ok(pitches)
    }

    /// Look up `name` in the `[chords]` table, falling back to `name` itself
    /// so literal shapes pass straight through.
    pub fn chord_shape<'a>(&'a self, name: &'a str) -> &'a str {
        self.chords.get(name).map_or(name, String::as_str)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve_tuning()?;
        if !self.gain.is_finite() || self.gain <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gain must be a positive number, got {}",
                self.gain
            )));
        }
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid("sample_rate must be non-zero".to_string()));
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::Invalid("buffer_size must be non-zero".to_string()));
        }
        Ok(())
    }
}
