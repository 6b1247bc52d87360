//! Pitch codes, notes and the default guitar tuning.
//!
//! Pitches are integer semitone codes in the MIDI convention: 69 is A4 at
//! 440 Hz and each step is one equal-tempered semitone. A [`Note`] addresses a
//! string by index and adds a fret offset to that string's base pitch.

/// Pitch code of the reference note A4.
pub const A4_PITCH: i32 = 69;

/// Frequency of [`A4_PITCH`] in Hz.
pub const A4_FREQUENCY: f64 = 440.0;

/// Six-string standard tuning, low to high: E2 A2 D3 G3 B3 E4.
///
/// Index-addressed, not pitch-sorted: `STANDARD_TUNING[0]` is the low E string.
pub const STANDARD_TUNING: [i32; 6] = [40, 45, 50, 55, 59, 64];

/// Lowest pitch whose period is pre-reserved in every string's delay line.
///
/// Plucks at or above this pitch never reallocate.
pub const LOWEST_POOLED_PITCH: i32 = 0;

/// A note to play: which string, and how many semitones above its base pitch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Note {
    /// String index, `0` is the first entry of the tuning.
    pub string: usize,
    /// Semitone offset added to the string's base pitch.
    pub fret: i32,
}

impl Note {
    /// Create a note on `string` at `fret`.
    pub const fn new(string: usize, fret: i32) -> Self {
        Self { string, fret }
    }

    /// Sounded pitch for this note under `tuning`, or `None` if the string
    /// index is outside the tuning. Saturates at the `i32` bounds.
    pub fn pitch(&self, tuning: &[i32]) -> Option<i32> {
        tuning.get(self.string).map(|base| base.saturating_add(self.fret))
    }
}

/// Convert a pitch code to its frequency in Hz.
///
/// `440 * 2^((pitch - 69) / 12)`.
#[inline]
pub fn pitch_to_frequency(pitch: i32) -> f64 {
    A4_FREQUENCY * libm::pow(2.0, f64::from(pitch.saturating_sub(A4_PITCH)) / 12.0)
}

/// Convert a frequency in Hz to a (fractional) pitch code.
#[inline]
pub fn frequency_to_pitch(freq: f64) -> f64 {
    f64::from(A4_PITCH) + 12.0 * libm::log2(freq / A4_FREQUENCY)
}

/// Delay-line length for one period of `frequency`: `round(sample_rate / frequency)`.
///
/// Clamped to `1..=sample_rate`, so degenerate pitches still yield a usable
/// buffer of at most one second.
#[inline]
pub fn period_samples(sample_rate: f64, frequency: f64) -> usize {
    let max = libm::ceil(sample_rate).max(1.0);
    let n = libm::round(sample_rate / frequency);
    if n.is_finite() { n.clamp(1.0, max) as usize } else { max as usize }
}
