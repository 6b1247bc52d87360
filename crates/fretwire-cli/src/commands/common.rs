//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use fretwire_config::{
    GuitarConfig, Note, PitchSpec, TuningSpec, find_config, parse_chord_shape,
};
use fretwire_io::Strum;
use std::path::PathBuf;

/// Instrument options shared by `play` and `render`.
#[derive(Args, Debug, Clone)]
pub struct InstrumentArgs {
    /// Chord shapes, low string first (e.g. x32010, "x,10,12,12,11,x"),
    /// or names from the config's [chords] table
    #[arg(value_name = "CHORD", required = true, allow_hyphen_values = true)]
    pub chords: Vec<String>,

    /// Tuning name (see `fretwire tunings`) or comma-separated notes (e.g. D2,A2,D3,G3,B3,E4)
    #[arg(short, long)]
    pub tuning: Option<String>,

    /// Configuration file (defaults to the user config if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seconds each chord rings before the next
    #[arg(short, long, default_value = "2.0")]
    pub seconds: f64,

    /// Milliseconds between successive strings of a strum (0 plucks all at once)
    #[arg(short, long, default_value = "0")]
    pub gap: f64,

    /// Output gain
    #[arg(long)]
    pub gain: Option<f64>,
}

impl InstrumentArgs {
    /// Load the configuration and apply command-line overrides.
    pub fn load_config(&self) -> anyhow::Result<GuitarConfig> {
        let mut config = match find_config(self.config.as_deref()) {
            Some(path) => GuitarConfig::load(&path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GuitarConfig::default(),
        };

        if let Some(tuning) = &self.tuning {
            config.tuning = parse_tuning_arg(tuning);
        }
        if let Some(gain) = self.gain {
            config.gain = gain;
        }
        config.validate()?;

        if !self.seconds.is_finite() || self.seconds <= 0.0 {
            anyhow::bail!("--seconds must be positive, got {}", self.seconds);
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            anyhow::bail!("--gap must not be negative, got {}", self.gap);
        }
        Ok(config)
    }

    /// Parse every chord argument against the configured tuning.
    pub fn chords(&self, config: &GuitarConfig) -> anyhow::Result<Vec<Vec<Note>>> {
        let strings = config.resolve_tuning()?.len();
        self.chords
            .iter()
            .map(|chord| {
                parse_chord_shape(config.chord_shape(chord), strings)
                    .with_context(|| format!("chord '{chord}'"))
            })
            .collect()
    }
}

/// A `--tuning` value: a comma-separated list is taken as notes, anything
/// else as a tuning name.
pub fn parse_tuning_arg(value: &str) -> TuningSpec {
    if !value.contains(',') {
        return TuningSpec::Named(value.to_string());
    }
    TuningSpec::Pitches(
        value
            .split(',')
            .map(str::trim)
            .map(|part| match part.parse::<i32>() {
                Ok(code) => PitchSpec::Code(code),
                Err(_) => PitchSpec::Name(part.to_string()),
            })
            .collect(),
    )
}

/// Lay chords out in time: chord `i` starts at `i * seconds`, and with a
/// non-zero `gap_ms` its strings are plucked one after another, low first.
pub fn strum_plan(chords: &[Vec<Note>], seconds: f64, gap_ms: f64) -> Vec<Strum> {
    let gap = gap_ms / 1000.0;
    let mut plan = Vec::new();
    for (i, chord) in chords.iter().enumerate() {
        let start = i as f64 * seconds;
        if gap == 0.0 || chord.is_empty() {
            plan.push(Strum::new(start, chord.clone()));
        } else {
            plan.extend(
                chord
                    .iter()
                    .enumerate()
                    .map(|(j, &note)| Strum::new(start + j as f64 * gap, vec![note])),
            );
        }
    }
    plan
}
