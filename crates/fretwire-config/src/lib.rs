//! Configuration for the fretwire guitar synthesizer.
//!
//! This crate turns human-facing descriptions of an instrument into the pitch
//! codes and notes the synthesis core works with.
//!
//! # Features
//!
//! - **Note names**: `"E2"`, `"F#3"`, `"Bb1"` to pitch codes and back
//! - **Named tunings**: standard, drop D, open G, DADGAD, 4-string bass, ...
//! - **Chord shapes**: tab-style `"x32010"` to a list of [`Note`]s
//! - **Config files**: [`GuitarConfig`] loaded from and saved to TOML
//! - **Paths**: platform-specific location of the user config file
//!
//! # Example
//!
//! ```rust
//! use fretwire_config::{GuitarConfig, parse_chord_shape};
//!
//! let config = GuitarConfig::from_toml(r#"
//!     tuning = ["D2", "A2", "D3", "G3", "B3", "E4"]
//!     gain = 3.0
//! "#).unwrap();
//!
//! let tuning = config.resolve_tuning().unwrap();
//! assert_eq!(tuning, [38, 45, 50, 55, 59, 64]);
//!
//! let d_chord = parse_chord_shape("xx0232", tuning.len()).unwrap();
//! assert_eq!(d_chord.len(), 4);
//! ```

mod chord;
mod error;
mod guitar_config;
mod note_name;

#[cfg(feature = "std")]
pub mod paths;
pub mod tunings;

pub use chord::{MUTED, parse_chord_shape};
pub use error::ConfigError;
pub use guitar_config::{
    DEFAULT_BUFFER_SIZE, DEFAULT_SAMPLE_RATE, GuitarConfig, PitchSpec, TuningSpec,
};
pub use note_name::{note_name, parse_note_name};
#[cfg(feature = "std")]
pub use paths::{default_config_path, find_config, user_config_dir};
pub use tunings::{NamedTuning, TUNING_NAMES, named_tunings, tuning_by_name};

/// Re-export the note type chord shapes produce.
pub use fretwire_synth::Note;
