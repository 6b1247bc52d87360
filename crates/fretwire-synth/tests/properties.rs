//! Property-based tests for the plucked-string model.
//!
//! Uses proptest to check the oscillator and instrument invariants across
//! random pitches, sample rates and noise seeds.

use fretwire_synth::{
    Instrument, Note, PluckedString, STANDARD_TUNING, SILENCE_THRESHOLD, period_samples,
    pitch_to_frequency,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SAMPLE_RATES: [f64; 3] = [44100.0, 48000.0, 96000.0];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Frequency follows 440 * 2^((p - 69) / 12) and doubles per octave.
    #[test]
    fn frequency_is_equal_tempered(pitch in -24i32..140) {
        let f = pitch_to_frequency(pitch);
        let expected = 440.0 * 2f64.powf(f64::from(pitch - 69) / 12.0);
        prop_assert!((f - expected).abs() <= expected * 1e-12);
        let octave = pitch_to_frequency(pitch + 12);
        prop_assert!((octave / f - 2.0).abs() < 1e-12);
    }

    /// After a pluck the delay line is one rounded period long and all zero.
    #[test]
    fn pluck_sizes_delay_line(
        rate in 0usize..3,
        root in 20i32..80,
        pitch in 0i32..128,
    ) {
        let sr = SAMPLE_RATES[rate];
        let mut string = PluckedString::new(sr, root);
        string.pluck(pitch);
        let expected = (sr / pitch_to_frequency(pitch)).round() as usize;
        prop_assert_eq!(string.period(), expected.max(1));
        prop_assert_eq!(string.period(), period_samples(sr, string.frequency()));
        prop_assert!(string.ring_buffer().iter().all(|&s| s == 0.0));
        prop_assert_eq!(string.excitation_remaining(), string.period());
    }

    /// The excitation window closes after exactly N samples, the decay
    /// factor never rises, and every sample stays finite.
    #[test]
    fn excitation_and_decay(
        pitch in 28i32..90,
        seed in any::<u64>(),
        extra in 0usize..2000,
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut string = PluckedString::new(44100.0, pitch);
        string.pluck(pitch);
        let n = string.period();

        let mut prev = string.decay_factor();
        for _ in 0..n {
            let s = string.next_sample(&mut rng);
            prop_assert!(s.is_finite());
            prop_assert!(string.decay_factor() <= prev);
            prev = string.decay_factor();
        }
        prop_assert_eq!(string.excitation_remaining(), 0);

        for _ in 0..extra {
            let s = string.next_sample(&mut rng);
            prop_assert!(s.is_finite());
            prop_assert!(string.decay_factor() <= prev);
            prev = string.decay_factor();
        }
    }

    /// A silent string never mutates its delay line.
    #[test]
    fn silent_string_is_inert(pitch in 0i32..128, calls in 1usize..5000, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut string = PluckedString::new(48000.0, pitch);
        let before = string.ring_buffer().to_vec();
        for _ in 0..calls {
            prop_assert_eq!(string.next_sample(&mut rng), 0.0);
        }
        prop_assert_eq!(string.ring_buffer(), before.as_slice());
        prop_assert_eq!(string.write_index(), 0);
    }

    /// Re-plucking the same pitch restores the same starting state.
    #[test]
    fn repluck_is_deterministic_restart(pitch in 0i32..128, played in 0usize..3000, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut string = PluckedString::new(44100.0, 45);
        string.pluck(pitch);
        let first = (string.period(), string.write_index(), string.decay_factor());
        for _ in 0..played {
            string.next_sample(&mut rng);
        }
        string.pluck(pitch);
        let second = (string.period(), string.write_index(), string.decay_factor());
        prop_assert_eq!(first, second);
        prop_assert!(string.is_sounding() || string.decay_factor() < SILENCE_THRESHOLD);
    }

    /// The mixed first sample of any single-string pluck is bounded by the gain.
    #[test]
    fn first_mixed_sample_bounded(string in 0usize..6, fret in 0i32..20, seed in any::<u64>()) {
        let mut guitar = Instrument::with_seed(44100.0, &STANDARD_TUNING, seed);
        guitar.play_notes(&[Note::new(string, fret)]).unwrap();
        let s = guitar.next_sample();
        prop_assert!(s.is_finite());
        prop_assert!(s.abs() <= guitar.gain());
    }

    /// Out-of-range indices are skipped while valid notes still sound.
    #[test]
    fn bad_indices_skipped(bad in 6usize..64, good in 0usize..6) {
        let mut guitar = Instrument::new(44100.0, &STANDARD_TUNING);
        let result = guitar.play_notes(&[Note::new(bad, 0), Note::new(good, 0)]);
        prop_assert!(result.is_err());
        prop_assert!(guitar.strings()[good].is_sounding());
    }
}
