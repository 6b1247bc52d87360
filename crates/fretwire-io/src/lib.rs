//! Audio output for the fretwire guitar synthesizer.
//!
//! This crate connects the synthesis core to the outside world:
//!
//! - **Render handoff**: [`InstrumentHandle`] sends [`Command`]s to a
//!   [`Renderer`] that owns the instrument on the audio thread
//! - **Sinks**: the [`AudioSink`] trait with [`CpalSink`] (live output),
//!   [`NullSink`] (fallback when no device is usable) and [`OfflineSink`]
//!   (synchronous rendering)
//! - **Facade**: [`Guitar`] picks a sink, wires the instrument to it and
//!   degrades to silence instead of failing when audio is unavailable
//! - **WAV file I/O**: [`write_wav`], [`read_wav`] and [`render_to_wav`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fretwire_config::{GuitarConfig, parse_chord_shape};
//! use fretwire_io::Guitar;
//!
//! let config = GuitarConfig::default();
//! let mut guitar = Guitar::open(&config)?;
//! guitar.turn_on()?;
//!
//! let g_major = parse_chord_shape("320003", 6)?;
//! guitar.play_notes(&g_major)?;
//! std::thread::sleep(std::time::Duration::from_secs(2));
//!
//! guitar.destroy();
//! ```

mod cpal_sink;
mod devices;
mod guitar;
mod null_sink;
mod offline;
mod renderer;
mod sink;
mod wav;

pub use cpal_sink::CpalSink;
pub use devices::{OutputDevice, default_output_device, list_output_devices};
pub use guitar::Guitar;
pub use null_sink::NullSink;
pub use offline::{OfflineSink, Strum, render_strums, render_to_wav};
pub use renderer::{
    COMMAND_QUEUE_CAPACITY, Command, InstrumentHandle, MAX_BATCH_NOTES, MAX_TUNING_STRINGS,
    NoteBatch, Renderer, TuningBatch,
};
pub use sink::{AudioSink, SinkOptions};
pub use wav::{WavSpec, read_wav, write_wav};

use fretwire_config::ConfigError;
use fretwire_synth::SynthError;

/// Error types for audio output operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// A command could not be queued for the render thread.
    #[error("Render queue full or renderer gone, command dropped")]
    CommandDropped,

    /// The instrument rejected a request.
    #[error(transparent)]
    Synth(#[from] SynthError),

    /// The configuration could not be used.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio output operations.
pub type Result<T> = std::result::Result<T, Error>;
