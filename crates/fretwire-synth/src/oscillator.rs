//! Karplus-Strong plucked-string oscillator.
//!
//! A [`PluckedString`] stores one period of its waveform in a ring buffer of
//! length `N = round(sample_rate / frequency)`. Every output sample reads the
//! slot under the write cursor, runs it through a one-pole smoother whose
//! coefficient is the current decay factor, and writes the smoothed value
//! back. Replaying the buffer once per period through the smoother produces a
//! decaying tone at the fundamental.
//!
//! ```text
//! pluck ──► ring buffer (N slots, zeros)
//!              │   first N samples: += (u1 - u2) / 4   (excitation)
//!              ▼
//!   y += (buf[i] - y) * decay      buf[i] = y      decay *= 0.99999
//! ```
//!
//! The excitation window lasts exactly `N` calls after a pluck. Once the
//! decay factor drops below [`SILENCE_THRESHOLD`] the string goes silent and
//! stays silent until plucked again.

use crate::note::{LOWEST_POOLED_PITCH, period_samples, pitch_to_frequency};
use crate::render::SampleSource;
use alloc::vec::Vec;
use rand::Rng;
use rand::rngs::SmallRng;

/// Per-sample multiplier applied to the decay factor while sounding.
pub const DECAY_CONSTANT: f64 = 0.99999;

/// Decay factor below which a string stops sounding.
pub const SILENCE_THRESHOLD: f64 = 0.1;

/// Starting decay factor for a string rooted at `pitch`.
///
/// `pitch / 80 + 0.1`: lower strings smooth harder and die out sooner.
#[inline]
pub fn base_decay_rate(pitch: i32) -> f64 {
    f64::from(pitch) / 80.0 + 0.1
}

/// One plucked string.
///
/// # Invariants
///
/// - `ring_buffer.len()` equals the period of the current frequency
/// - `decay_factor` never increases between plucks
/// - a silent string returns exactly `0.0` and leaves its state untouched
///
/// # Example
///
/// ```rust
/// use fretwire_synth::PluckedString;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let mut string = PluckedString::new(44100.0, 40);
/// string.pluck(45);
///
/// assert_eq!(string.period(), 401); // A2 at 44.1 kHz
/// let sample = string.next_sample(&mut rng);
/// assert!(sample.abs() <= 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct PluckedString {
    sample_rate: f64,
    base_pitch: i32,
    base_decay_rate: f64,
    frequency: f64,
    ring_buffer: Vec<f64>,
    write_index: usize,
    excitation_remaining: usize,
    decay_factor: f64,
    current_value: f64,
    sounding: bool,
}

impl PluckedString {
    /// Create a silent string rooted at `base_pitch`.
    ///
    /// Reserves delay-line capacity for [`LOWEST_POOLED_PITCH`] so later
    /// plucks do not allocate.
    pub fn new(sample_rate: f64, base_pitch: i32) -> Self {
        let capacity = period_samples(sample_rate, pitch_to_frequency(LOWEST_POOLED_PITCH));
        let mut string = Self {
            sample_rate,
            base_pitch,
            base_decay_rate: base_decay_rate(base_pitch),
            frequency: 0.0,
            ring_buffer: Vec::with_capacity(capacity),
            write_index: 0,
            excitation_remaining: 0,
            decay_factor: 0.0,
            current_value: 0.0,
            sounding: false,
        };
        string.reset_frequency(base_pitch);
        string
    }

    /// Re-root the string at `pitch`.
    ///
    /// Updates the base pitch and decay rate used by future plucks. An idle
    /// string also re-initialises its delay line for the new pitch; a string
    /// that is still ringing keeps its in-flight state.
    pub fn set_root_pitch(&mut self, pitch: i32) {
        self.base_pitch = pitch;
        self.base_decay_rate = base_decay_rate(pitch);
        if !self.sounding {
            self.reset_frequency(pitch);
        }
    }

    /// Excite the string at `pitch` and start sounding.
    ///
    /// Fully restarts the string: zeroed delay line of the new period, cursor
    /// at 0, a fresh excitation window and the base decay rate.
    pub fn pluck(&mut self, pitch: i32) {
        self.reset_frequency(pitch);
        self.excitation_remaining = self.ring_buffer.len();
        self.decay_factor = self.base_decay_rate;
        self.current_value = 0.0;
        self.sounding = true;
    }

    /// Stop sounding immediately. Buffered state is kept but not read.
    pub fn mute(&mut self) {
        self.sounding = false;
    }

    /// Produce the next output sample.
    ///
    /// Call exactly once per output frame. `rng` supplies the excitation
    /// noise; it is only drawn from during the excitation window.
    #[inline]
    pub fn next_sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        if !self.sounding {
            return 0.0;
        }

        if self.write_index == self.ring_buffer.len() {
            self.write_index = 0;
        }

        let slot = &mut self.ring_buffer[self.write_index];
        if self.excitation_remaining > 0 {
            let a: f64 = rng.gen_range(0.0..1.0);
            let b: f64 = rng.gen_range(0.0..1.0);
            *slot += (a - b) / 4.0;
            self.excitation_remaining -= 1;
        }

        self.current_value += (*slot - self.current_value) * self.decay_factor;
        *slot = self.current_value;

        self.write_index += 1;
        self.decay_factor *= DECAY_CONSTANT;

        if self.decay_factor < SILENCE_THRESHOLD {
            self.sounding = false;
        }

        self.current_value
    }

    /// Point the delay line at `pitch`: new period, zeroed, cursor at 0.
    fn reset_frequency(&mut self, pitch: i32) {
        self.frequency = pitch_to_frequency(pitch);
        let period = period_samples(self.sample_rate, self.frequency);
        self.ring_buffer.clear();
        self.ring_buffer.resize(period, 0.0);
        self.write_index = 0;
    }

    /// Sample rate in Hz, fixed at construction.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Open-string pitch code.
    pub fn base_pitch(&self) -> i32 {
        self.base_pitch
    }

    /// Decay factor a pluck starts from.
    pub fn base_decay_rate(&self) -> f64 {
        self.base_decay_rate
    }

    /// Frequency the delay line is currently sized for, in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Delay-line length `N` in samples.
    pub fn period(&self) -> usize {
        self.ring_buffer.len()
    }

    /// Contents of the delay line.
    pub fn ring_buffer(&self) -> &[f64] {
        &self.ring_buffer
    }

    /// Write cursor position, in `0..=N`.
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Samples left in the excitation window.
    pub fn excitation_remaining(&self) -> usize {
        self.excitation_remaining
    }

    /// Current per-sample smoothing coefficient.
    pub fn decay_factor(&self) -> f64 {
        self.decay_factor
    }

    /// Last emitted sample.
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Whether the string is producing output.
    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}

/// A string with its own noise source, so it can be rendered on its own.
#[derive(Debug, Clone)]
pub struct SoloString<R = SmallRng> {
    /// The string being played.
    pub string: PluckedString,
    /// Excitation noise for this string only.
    pub rng: R,
}

impl<R: Rng> SoloString<R> {
    /// Pair `string` with `rng`.
    pub fn new(string: PluckedString, rng: R) -> Self {
        Self { string, rng }
    }
}

impl<R: Rng> SampleSource for SoloString<R> {
    #[inline]
    fn next_sample(&mut self) -> f64 {
        self.string.next_sample(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const SR: f64 = 44100.0;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0xF00D)
    }

    #[test]
    fn test_new_is_silent() {
        let string = PluckedString::new(SR, 40);
        assert!(!string.is_sounding());
        assert_eq!(string.base_pitch(), 40);
        assert!((string.base_decay_rate() - 0.6).abs() < 1e-12);
        assert_eq!(string.period(), 535);
        assert!(string.ring_buffer().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_silent_string_outputs_zero_without_state_change() {
        let mut string = PluckedString::new(SR, 40);
        let mut rng = rng();
        for _ in 0..1000 {
            assert_eq!(string.next_sample(&mut rng), 0.0);
        }
        assert_eq!(string.write_index(), 0);
        assert!(string.ring_buffer().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_pluck_resets_state() {
        let mut string = PluckedString::new(SR, 40);
        string.pluck(69);
        assert!(string.is_sounding());
        assert_eq!(string.period(), 100);
        assert_eq!(string.write_index(), 0);
        assert_eq!(string.excitation_remaining(), 100);
        assert_eq!(string.decay_factor(), string.base_decay_rate());
        assert_eq!(string.current_value(), 0.0);
        assert!(string.ring_buffer().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_first_sample_bounded_by_noise_amplitude() {
        let mut string = PluckedString::new(SR, 40);
        let mut rng = rng();
        string.pluck(40);
        let first = string.next_sample(&mut rng);
        // y = noise * decay, decay = 0.6
        assert!(first.abs() <= 0.25 * 0.6);
    }

    #[test]
    fn test_excitation_window_closes_after_one_period() {
        let mut string = PluckedString::new(SR, 40);
        let mut rng = rng();
        string.pluck(45);
        let n = string.period();
        for i in 0..n {
            assert_eq!(string.excitation_remaining(), n - i);
            string.next_sample(&mut rng);
        }
        assert_eq!(string.excitation_remaining(), 0);
        assert_eq!(string.write_index(), n);

        // Next call wraps the cursor.
        string.next_sample(&mut rng);
        assert_eq!(string.write_index(), 1);
    }

    #[test]
    fn test_decay_is_monotonic() {
        let mut string = PluckedString::new(SR, 64);
        let mut rng = rng();
        string.pluck(64);
        let mut prev = string.decay_factor();
        for _ in 0..10_000 {
            string.next_sample(&mut rng);
            let d = string.decay_factor();
            assert!(d < prev);
            prev = d;
        }
    }

    #[test]
    fn test_goes_silent_below_threshold_and_stays_silent() {
        let mut string = PluckedString::new(SR, 40);
        let mut rng = rng();
        string.pluck(40);

        // 0.6 * 0.99999^n < 0.1  =>  n > ln(6) / -ln(0.99999) ~= 179_175
        let mut calls = 0usize;
        while string.is_sounding() {
            string.next_sample(&mut rng);
            calls += 1;
            assert!(calls < 200_000, "string never went silent");
        }
        assert!(calls > 170_000, "went silent too early: {calls}");
        assert!(string.decay_factor() < SILENCE_THRESHOLD);

        let index = string.write_index();
        for _ in 0..100 {
            assert_eq!(string.next_sample(&mut rng), 0.0);
        }
        assert_eq!(string.write_index(), index);
    }

    #[test]
    fn test_mute_silences_immediately() {
        let mut string = PluckedString::new(SR, 50);
        let mut rng = rng();
        string.pluck(50);
        for _ in 0..64 {
            string.next_sample(&mut rng);
        }
        let snapshot = string.ring_buffer().to_vec();
        string.mute();
        assert!(!string.is_sounding());
        assert_eq!(string.next_sample(&mut rng), 0.0);
        assert_eq!(string.ring_buffer(), snapshot.as_slice());
    }

    #[test]
    fn test_set_root_pitch_on_idle_string_resizes() {
        let mut string = PluckedString::new(SR, 40);
        string.set_root_pitch(69);
        assert_eq!(string.base_pitch(), 69);
        assert_eq!(string.period(), 100);
        assert!((string.base_decay_rate() - (69.0 / 80.0 + 0.1)).abs() < 1e-12);
        assert!(!string.is_sounding());
    }

    #[test]
    fn test_set_root_pitch_keeps_ringing_string_intact() {
        let mut string = PluckedString::new(SR, 40);
        let mut rng = rng();
        string.pluck(40);
        for _ in 0..300 {
            string.next_sample(&mut rng);
        }
        let period = string.period();
        let index = string.write_index();
        string.set_root_pitch(45);
        assert_eq!(string.base_pitch(), 45);
        assert_eq!(string.period(), period);
        assert_eq!(string.write_index(), index);
        assert!(string.is_sounding());
    }

    #[test]
    fn test_pluck_within_pool_does_not_reallocate() {
        let mut string = PluckedString::new(SR, 40);
        let capacity = string.ring_buffer.capacity();
        for pitch in 0..=127 {
            string.pluck(pitch);
            assert_eq!(string.ring_buffer.capacity(), capacity, "pitch {pitch}");
        }
    }

    #[test]
    fn test_replucking_restarts_identically() {
        let mut string = PluckedString::new(SR, 55);
        let mut rng = rng();
        string.pluck(57);
        for _ in 0..500 {
            string.next_sample(&mut rng);
        }
        let first = (string.period(), string.base_decay_rate());
        string.pluck(57);
        assert_eq!((string.period(), string.decay_factor()), first);
        assert_eq!(string.write_index(), 0);
        assert_eq!(string.excitation_remaining(), string.period());
    }

    #[test]
    fn test_solo_string_matches_direct_calls() {
        let mut direct = PluckedString::new(SR, 50);
        direct.pluck(52);
        let mut solo = SoloString::new(direct.clone(), rng());

        let mut direct_rng = rng();
        let expected: Vec<f64> = (0..2000).map(|_| direct.next_sample(&mut direct_rng)).collect();
        let rendered = crate::render(&mut solo, 2000);

        for (a, b) in expected.iter().zip(&rendered) {
            assert_eq!(*a as f32, *b);
        }
    }
}
