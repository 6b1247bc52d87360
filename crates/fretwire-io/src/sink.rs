//! Audio sink abstraction.
//!
//! An [`AudioSink`] is where rendered audio ends up. The instrument never
//! knows which one it is feeding: the sink takes a [`Renderer`] and pulls
//! fixed-size blocks from it at its own sample rate.
//!
//! | Sink | Output | Used for |
//! |------|--------|----------|
//! | [`CpalSink`](crate::CpalSink) | system audio device | live playback |
//! | [`NullSink`](crate::NullSink) | nothing | fallback when no device works |
//! | [`OfflineSink`](crate::OfflineSink) | caller's buffer | tests, WAV export |
//!
//! The trait is object-safe so the sink can be chosen at runtime and stored
//! as `Box<dyn AudioSink>`.

use crate::{Renderer, Result};
use fretwire_config::{DEFAULT_BUFFER_SIZE, DEFAULT_SAMPLE_RATE, GuitarConfig};

/// Options for opening a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOptions {
    /// Sample rate in Hz for sinks without a device.
    pub sample_rate: u32,
    /// Frames per block.
    pub buffer_size: u32,
    /// Output device name filter (system default if `None`).
    pub device_name: Option<String>,
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            buffer_size: DEFAULT_BUFFER_SIZE,
            device_name: None,
        }
    }
}

impl From<&GuitarConfig> for SinkOptions {
    fn from(config: &GuitarConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            buffer_size: config.buffer_size,
            device_name: config.output_device.clone(),
        }
    }
}

/// Destination for rendered audio.
pub trait AudioSink: Send {
    /// Short identifier, e.g. `"cpal"` or `"null"`.
    fn name(&self) -> &str;

    /// Sample rate the sink runs at, in Hz. The instrument must be built at
    /// this rate.
    fn sample_rate(&self) -> u32;

    /// Hand the sink the renderer to pull audio from, replacing any previous
    /// one. Until a renderer is attached the sink outputs silence.
    fn attach(&mut self, renderer: Renderer);

    /// Start pulling audio.
    fn start(&mut self) -> Result<()>;

    /// Stop pulling audio. The attached renderer is kept.
    fn stop(&mut self) -> Result<()>;

    /// Whether the sink is currently started.
    fn is_running(&self) -> bool;

    /// Whether this sink produces audible output at all.
    fn is_available(&self) -> bool {
        true
    }
}
