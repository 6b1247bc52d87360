//! Multi-string instrument.
//!
//! An [`Instrument`] owns a fixed, index-addressed set of [`PluckedString`]s
//! and the tuning that roots them. Notes are routed by string index; the
//! output is the average of all strings scaled by a gain, so adding strings
//! does not push the mix toward clipping.

use crate::error::SynthError;
use crate::note::Note;
use crate::oscillator::PluckedString;
use crate::render::SampleSource;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Default output gain applied after averaging the strings.
pub const DEFAULT_GAIN: f64 = 4.0;

/// Seed used by [`Instrument::new`].
pub const DEFAULT_SEED: u64 = 0x6775_6974_6172_2121;

/// A set of plucked strings sharing one tuning, mixer and noise source.
///
/// `R` is the excitation noise source. It defaults to a seeded
/// [`SmallRng`]; tests can inject any [`Rng`].
///
/// # Example
///
/// ```rust
/// use fretwire_synth::{Instrument, Note, STANDARD_TUNING};
///
/// let mut guitar = Instrument::new(44100.0, &STANDARD_TUNING);
/// guitar.play_notes(&[Note::new(0, 0)]).unwrap();
///
/// let sample = guitar.next_sample();
/// assert!(sample.abs() <= guitar.gain());
/// ```
#[derive(Debug, Clone)]
pub struct Instrument<R = SmallRng> {
    strings: Vec<PluckedString>,
    tuning: Vec<i32>,
    gain: f64,
    sample_rate: f64,
    rng: R,
}

impl Instrument<SmallRng> {
    /// Build one string per tuning entry, with the default noise seed.
    pub fn new(sample_rate: f64, tuning: &[i32]) -> Self {
        Self::with_seed(sample_rate, tuning, DEFAULT_SEED)
    }

    /// Build one string per tuning entry, seeding the noise source with `seed`.
    pub fn with_seed(sample_rate: f64, tuning: &[i32], seed: u64) -> Self {
        Self::with_rng(sample_rate, tuning, SmallRng::seed_from_u64(seed))
    }

    /// An instrument with no strings yet.
    ///
    /// The first [`set_tuning`](Self::set_tuning) call decides the string count.
    pub fn unconfigured(sample_rate: f64) -> Self {
        Self::new(sample_rate, &[])
    }
}

impl<R: Rng> Instrument<R> {
    /// Build one string per tuning entry, drawing excitation noise from `rng`.
    pub fn with_rng(sample_rate: f64, tuning: &[i32], rng: R) -> Self {
        let mut instrument = Self {
            strings: Vec::new(),
            tuning: Vec::new(),
            gain: DEFAULT_GAIN,
            sample_rate,
            rng,
        };
        instrument.reconfigure(tuning);
        instrument
    }

    /// Replace every string with a fresh batch built from `tuning`.
    ///
    /// This is the only operation that changes the string count. It
    /// allocates, so call it from the control side, never from the render
    /// callback.
    pub fn reconfigure(&mut self, tuning: &[i32]) {
        self.strings = tuning
            .iter()
            .map(|&pitch| PluckedString::new(self.sample_rate, pitch))
            .collect();
        self.tuning = tuning.to_vec();

        #[cfg(feature = "tracing")]
        tracing::debug!(strings = self.strings.len(), "instrument configured");
    }

    /// Re-root every string in place.
    ///
    /// `tuning` must have one entry per string. On mismatch nothing changes
    /// and [`SynthError::TuningMismatch`] is returned. An instrument with no
    /// strings takes its string count from the first tuning it is given.
    /// Strings that are still ringing keep sounding at their plucked pitch.
    pub fn set_tuning(&mut self, tuning: &[i32]) -> Result<(), SynthError> {
        if self.strings.is_empty() && !tuning.is_empty() {
            self.reconfigure(tuning);
            return Ok(());
        }
        self.retune(tuning)
    }

    /// Re-root every string in place without ever changing the string count.
    ///
    /// Like [`set_tuning`](Self::set_tuning), except that an instrument with
    /// no strings rejects any non-empty tuning. Never allocates, so it is safe
    /// to call from the render callback.
    pub fn retune(&mut self, tuning: &[i32]) -> Result<(), SynthError> {
        if tuning.len() != self.strings.len() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                expected = self.strings.len(),
                found = tuning.len(),
                "tuning rejected"
            );
            return Err(SynthError::TuningMismatch {
                expected: self.strings.len(),
                found: tuning.len(),
            });
        }

        for ((string, base), &pitch) in self.strings.iter_mut().zip(&mut self.tuning).zip(tuning) {
            string.set_root_pitch(pitch);
            *base = pitch;
        }
        Ok(())
    }

    /// Pluck each note's string at `tuning[string] + fret`.
    ///
    /// The sum saturates at the `i32` bounds, so extreme frets clamp to the
    /// shortest or longest delay line instead of overflowing.
    ///
    /// An empty slice is the same as [`stop_all`](Self::stop_all). Notes that
    /// name a string outside the instrument are skipped; the remaining notes
    /// still sound and the first skipped index is reported as
    /// [`SynthError::StringOutOfRange`]. When one call names the same string
    /// twice, the later note wins.
    pub fn play_notes(&mut self, notes: &[Note]) -> Result<(), SynthError> {
        if notes.is_empty() {
            self.stop_all();
            return Ok(());
        }

        let strings = self.strings.len();
        let mut rejected = None;
        for note in notes {
            match (self.strings.get_mut(note.string), self.tuning.get(note.string)) {
                (Some(string), Some(&base)) => string.pluck(base.saturating_add(note.fret)),
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(string = note.string, strings, "note skipped");
                    rejected.get_or_insert(note.string);
                }
            }
        }

        match rejected {
            Some(index) => Err(SynthError::StringOutOfRange { index, strings }),
            None => Ok(()),
        }
    }

    /// Mute every string.
    pub fn stop_all(&mut self) {
        for string in &mut self.strings {
            string.mute();
        }
    }

    /// Average of all strings times the gain; `0.0` with no strings.
    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        if self.strings.is_empty() {
            return 0.0;
        }

        let mut sum = 0.0;
        for string in &mut self.strings {
            sum += string.next_sample(&mut self.rng);
        }

        let out = sum / self.strings.len() as f64 * self.gain;
        if out.is_finite() { out } else { 0.0 }
    }

    /// Set the output gain. Non-finite values are ignored.
    pub fn set_gain(&mut self, gain: f64) {
        if gain.is_finite() {
            self.gain = gain;
        }
    }

    /// Output gain.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Sample rate in Hz, as given at construction.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of strings.
    pub fn num_strings(&self) -> usize {
        self.strings.len()
    }

    /// Base pitch of each string, by index.
    pub fn tuning(&self) -> &[i32] {
        &self.tuning
    }

    /// The strings, by index.
    pub fn strings(&self) -> &[PluckedString] {
        &self.strings
    }

    /// Whether any string is sounding.
    pub fn is_sounding(&self) -> bool {
        self.strings.iter().any(PluckedString::is_sounding)
    }
}

impl<R: Rng> SampleSource for Instrument<R> {
    #[inline]
    fn next_sample(&mut self) -> f64 {
        Instrument::next_sample(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::STANDARD_TUNING;

    const SR: f64 = 44100.0;

    #[test]
    fn test_new_builds_one_string_per_entry() {
        let guitar = Instrument::new(SR, &STANDARD_TUNING);
        assert_eq!(guitar.num_strings(), 6);
        assert_eq!(guitar.tuning(), &STANDARD_TUNING);
        assert_eq!(guitar.gain(), DEFAULT_GAIN);
        for (string, &pitch) in guitar.strings().iter().zip(&STANDARD_TUNING) {
            assert_eq!(string.base_pitch(), pitch);
            assert!(!string.is_sounding());
        }
    }

    #[test]
    fn test_silent_instrument_outputs_zero() {
        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        for _ in 0..1024 {
            assert_eq!(guitar.next_sample(), 0.0);
        }
    }

    #[test]
    fn test_no_strings_outputs_zero() {
        let mut empty = Instrument::unconfigured(SR);
        assert_eq!(empty.num_strings(), 0);
        assert_eq!(empty.next_sample(), 0.0);
    }

    #[test]
    fn test_play_routes_to_string_with_fret_offset() {
        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        guitar.play_notes(&[Note::new(4, 10)]).unwrap();
        let string = &guitar.strings()[4];
        assert!(string.is_sounding());
        // B3 + 10 = 69 = A4
        assert_eq!(string.frequency(), 440.0);
        assert_eq!(string.period(), 100);
        assert!(!guitar.strings()[0].is_sounding());
    }

    #[test]
    fn test_empty_play_stops_all() {
        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        guitar
            .play_notes(&[Note::new(0, 0), Note::new(3, 2), Note::new(5, 3)])
            .unwrap();
        assert!(guitar.is_sounding());
        guitar.play_notes(&[]).unwrap();
        assert!(guitar.strings().iter().all(|s| !s.is_sounding()));
        assert_eq!(guitar.next_sample(), 0.0);
    }

    #[test]
    fn test_out_of_range_note_is_skipped() {
        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        let result = guitar.play_notes(&[Note::new(9, 0), Note::new(1, 0), Note::new(7, 0)]);
        assert_eq!(
            result,
            Err(SynthError::StringOutOfRange {
                index: 9,
                strings: 6
            })
        );
        assert!(guitar.strings()[1].is_sounding());
    }

    #[test]
    fn test_extreme_frets_saturate() {
        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        guitar
            .play_notes(&[Note::new(0, i32::MAX), Note::new(1, i32::MIN)])
            .unwrap();
        assert_eq!(guitar.strings()[0].period(), 1);
        assert_eq!(guitar.strings()[1].period(), SR as usize);
        for _ in 0..1024 {
            assert!(guitar.next_sample().is_finite());
        }
    }

    #[test]
    fn test_same_string_last_note_wins() {
        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        guitar
            .play_notes(&[Note::new(0, 0), Note::new(0, 5)])
            .unwrap();
        // E2 + 5 = A2
        assert_eq!(guitar.strings()[0].period(), 401);
    }

    #[test]
    fn test_set_tuning_mismatch_leaves_state() {
        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        let result = guitar.set_tuning(&[38, 45, 50, 55, 59]);
        assert_eq!(
            result,
            Err(SynthError::TuningMismatch {
                expected: 6,
                found: 5
            })
        );
        assert_eq!(guitar.tuning(), &STANDARD_TUNING);
        assert_eq!(guitar.strings()[0].base_pitch(), 40);
    }

    #[test]
    fn test_set_tuning_reroots_in_place() {
        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        let drop_d = [38, 45, 50, 55, 59, 64];
        guitar.set_tuning(&drop_d).unwrap();
        assert_eq!(guitar.tuning(), &drop_d);
        assert_eq!(guitar.strings()[0].base_pitch(), 38);
        assert_eq!(guitar.num_strings(), 6);

        guitar.play_notes(&[Note::new(0, 0)]).unwrap();
        let expected = crate::note::period_samples(SR, crate::note::pitch_to_frequency(38));
        assert_eq!(guitar.strings()[0].period(), expected);
    }

    #[test]
    fn test_first_tuning_sets_string_count() {
        let mut bass = Instrument::unconfigured(SR);
        bass.set_tuning(&[28, 33, 38, 43]).unwrap();
        assert_eq!(bass.num_strings(), 4);
        assert!(bass.set_tuning(&STANDARD_TUNING).is_err());
    }

    #[test]
    fn test_retune_never_adopts() {
        let mut guitar = Instrument::unconfigured(SR);
        assert_eq!(
            guitar.retune(&STANDARD_TUNING),
            Err(SynthError::TuningMismatch {
                expected: 0,
                found: 6
            })
        );
        assert_eq!(guitar.num_strings(), 0);

        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        guitar.retune(&[38, 45, 50, 55, 59, 64]).unwrap();
        assert_eq!(guitar.tuning(), [38, 45, 50, 55, 59, 64]);
    }

    #[test]
    fn test_first_sample_bounded_by_gain() {
        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        guitar.play_notes(&[Note::new(0, 0)]).unwrap();
        let s = guitar.next_sample();
        assert!(s.is_finite());
        assert!(s.abs() <= 4.0);
        assert!(s.abs() <= 0.25 * 0.6 / 6.0 * 4.0);
    }

    #[test]
    fn test_same_seed_same_output() {
        let mut a = Instrument::with_seed(SR, &STANDARD_TUNING, 42);
        let mut b = Instrument::with_seed(SR, &STANDARD_TUNING, 42);
        let chord = [Note::new(1, 0), Note::new(2, 2), Note::new(3, 2)];
        a.play_notes(&chord).unwrap();
        b.play_notes(&chord).unwrap();
        for _ in 0..4096 {
            assert_eq!(a.next_sample().to_bits(), b.next_sample().to_bits());
        }
    }

    #[test]
    fn test_set_gain_ignores_non_finite() {
        let mut guitar = Instrument::new(SR, &STANDARD_TUNING);
        guitar.set_gain(2.0);
        guitar.set_gain(f64::NAN);
        guitar.set_gain(f64::INFINITY);
        assert_eq!(guitar.gain(), 2.0);
    }
}
