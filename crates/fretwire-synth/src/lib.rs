//! Fretwire Synth - plucked-string synthesis core
//!
//! This crate generates guitar-like waveforms sample by sample. Everything on
//! the per-sample path is allocation-free and runs in bounded time, so it can
//! be called directly from a real-time audio callback.
//!
//! # Core Components
//!
//! ## Strings
//!
//! - [`PluckedString`] - One Karplus-Strong voice: a delay line one period long,
//!   replayed through a decaying one-pole smoother
//! - [`SoloString`] - A string bundled with its own noise source, renderable alone
//!
//! ## Instrument
//!
//! - [`Instrument`] - A fixed set of strings addressed by index, with a tuning,
//!   an averaging mixer and an output gain
//!
//! ## Note Model
//!
//! - [`Note`] - `(string, fret)` pair; sounded pitch is `tuning[string] + fret`
//! - [`pitch_to_frequency`] / [`frequency_to_pitch`] - equal temperament, A4 = 69 = 440 Hz
//! - [`STANDARD_TUNING`] - E2 A2 D3 G3 B3 E4
//!
//! ## Rendering
//!
//! - [`SampleSource`] - Pull interface a sink calls once per frame
//! - [`fill_block`] / [`fill_interleaved`] - Fill a sink-sized block, silence
//!   when no source is attached
//!
//! # Example
//!
//! ```rust
//! use fretwire_synth::{Instrument, Note, STANDARD_TUNING, fill_block};
//!
//! let mut guitar = Instrument::new(44100.0, &STANDARD_TUNING);
//!
//! // Open E major: 0 2 2 1 0 0
//! guitar
//!     .play_notes(&[
//!         Note::new(0, 0),
//!         Note::new(1, 2),
//!         Note::new(2, 2),
//!         Note::new(3, 1),
//!         Note::new(4, 0),
//!         Note::new(5, 0),
//!     ])
//!     .unwrap();
//!
//! let mut block = [0.0f32; 1024];
//! fill_block(Some(&mut guitar), &mut block);
//! assert!(block.iter().all(|s| s.is_finite()));
//! ```
//!
//! # Randomness
//!
//! The pluck excitation is white noise drawn from a [`rand::Rng`] owned by the
//! instrument. [`Instrument::new`] seeds a [`SmallRng`](rand::rngs::SmallRng)
//! with [`DEFAULT_SEED`], so identical event sequences render bit-identical
//! audio. Use [`Instrument::with_seed`] or [`Instrument::with_rng`] to vary it.
//!
//! # no_std Support
//!
//! Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! fretwire-synth = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

pub mod error;
pub mod instrument;
pub mod note;
pub mod oscillator;
pub mod render;

pub use error::SynthError;
pub use instrument::{DEFAULT_GAIN, DEFAULT_SEED, Instrument};
pub use note::{
    A4_FREQUENCY, A4_PITCH, LOWEST_POOLED_PITCH, Note, STANDARD_TUNING, frequency_to_pitch,
    period_samples, pitch_to_frequency,
};
pub use oscillator::{DECAY_CONSTANT, PluckedString, SILENCE_THRESHOLD, SoloString, base_decay_rate};
pub use render::{SampleSource, fill_block, fill_block_f64, fill_interleaved, render};
