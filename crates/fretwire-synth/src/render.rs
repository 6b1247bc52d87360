//! Pull-based render contract between a sample source and an audio sink.
//!
//! A sink owns a fixed-size block (for example 1024 frames) and asks the
//! source for exactly one sample per frame, in order. None of the functions
//! here allocate except [`render`], which is meant for offline use.
//!
//! ```rust
//! use fretwire_synth::{Instrument, Note, STANDARD_TUNING, fill_block};
//!
//! let mut guitar = Instrument::new(48000.0, &STANDARD_TUNING);
//! guitar.play_notes(&[Note::new(5, 0)]).unwrap();
//!
//! let mut block = [0.0f32; 256];
//! fill_block(Some(&mut guitar), &mut block);
//!
//! // Nothing attached yet: the sink still gets a full block of silence.
//! fill_block::<Instrument>(None, &mut block);
//! assert!(block.iter().all(|&s| s == 0.0));
//! ```

use alloc::vec::Vec;

/// Anything that yields one mono sample per call.
///
/// Implementations must run in bounded time without allocating or blocking,
/// and must always return a finite value.
pub trait SampleSource {
    /// Produce the next sample.
    fn next_sample(&mut self) -> f64;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    #[inline]
    fn next_sample(&mut self) -> f64 {
        (**self).next_sample()
    }
}

/// Fill `out` with one sample per slot, or with silence when `source` is `None`.
#[inline]
pub fn fill_block<S: SampleSource + ?Sized>(source: Option<&mut S>, out: &mut [f32]) {
    match source {
        Some(source) => {
            for slot in out.iter_mut() {
                *slot = source.next_sample() as f32;
            }
        }
        None => out.fill(0.0),
    }
}

/// [`fill_block`] at full precision.
#[inline]
pub fn fill_block_f64<S: SampleSource + ?Sized>(source: Option<&mut S>, out: &mut [f64]) {
    match source {
        Some(source) => {
            for slot in out.iter_mut() {
                *slot = source.next_sample();
            }
        }
        None => out.fill(0.0),
    }
}

/// Fill an interleaved buffer of `channels` channels, copying each mono
/// sample into every channel of its frame.
///
/// A trailing partial frame is filled with silence.
#[inline]
pub fn fill_interleaved<S: SampleSource + ?Sized>(
    source: Option<&mut S>,
    out: &mut [f32],
    channels: usize,
) {
    let channels = channels.max(1);
    let Some(source) = source else {
        out.fill(0.0);
        return;
    };

    let mut frames = out.chunks_exact_mut(channels);
    for frame in &mut frames {
        frame.fill(source.next_sample() as f32);
    }
    frames.into_remainder().fill(0.0);
}

/// Pull `frames` samples from `source` into a new buffer.
pub fn render<S: SampleSource + ?Sized>(source: &mut S, frames: usize) -> Vec<f32> {
    let mut out = alloc::vec![0.0; frames];
    fill_block(Some(source), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts up by one per call.
    struct Ramp(f64);

    impl SampleSource for Ramp {
        fn next_sample(&mut self) -> f64 {
            self.0 += 1.0;
            self.0
        }
    }

    #[test]
    fn test_fill_block_pulls_once_per_frame_in_order() {
        let mut ramp = Ramp(0.0);
        let mut block = [0.0f32; 8];
        fill_block(Some(&mut ramp), &mut block);
        assert_eq!(block, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(ramp.0, 8.0);
    }

    #[test]
    fn test_fill_block_without_source_is_silent() {
        let mut block = [0.5f32; 16];
        fill_block::<Ramp>(None, &mut block);
        assert!(block.iter().all(|&s| s == 0.0));

        let mut wide = [0.5f64; 16];
        fill_block_f64::<Ramp>(None, &mut wide);
        assert!(wide.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_fill_interleaved_duplicates_frames() {
        let mut ramp = Ramp(0.0);
        let mut block = [9.0f32; 7];
        fill_interleaved(Some(&mut ramp), &mut block, 2);
        assert_eq!(block, [1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 0.0]);
        assert_eq!(ramp.0, 3.0);
    }

    #[test]
    fn test_render_length() {
        let mut ramp = Ramp(0.0);
        let out = render(&mut ramp, 100);
        assert_eq!(out.len(), 100);
        assert_eq!(out[99], 100.0);
    }
}
