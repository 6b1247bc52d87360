//! Synchronous rendering into memory and WAV files.

use crate::{AudioSink, Renderer, Result, WavSpec, write_wav};
use fretwire_config::GuitarConfig;
use fretwire_synth::{DEFAULT_SEED, Instrument, Note};
use std::path::Path;

/// A sink that renders only when asked, into a caller-supplied buffer.
///
/// It pulls from the renderer in blocks of `block_size`, applying queued
/// commands at each block boundary exactly as a live device would.
#[derive(Debug)]
pub struct OfflineSink {
    sample_rate: u32,
    block_size: usize,
    renderer: Option<Renderer>,
    running: bool,
}

impl OfflineSink {
    /// Create an offline sink running at `sample_rate`.
    pub fn new(sample_rate: u32, block_size: usize) -> Self {
        Self {
            sample_rate,
            block_size: block_size.max(1),
            renderer: None,
            running: false,
        }
    }

    /// Fill `out` block by block. Silence if nothing is attached.
    pub fn render_into(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(self.block_size) {
            match self.renderer.as_mut() {
                Some(renderer) => renderer.render_block(block),
                None => block.fill(0.0),
            }
        }
    }

    /// Render `frames` frames into a new buffer.
    pub fn render(&mut self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        self.render_into(&mut out);
        out
    }

    /// Apply queued commands now instead of at the next block.
    pub fn flush(&mut self) -> usize {
        self.renderer
            .as_mut()
            .map_or(0, |renderer| renderer.drain_commands())
    }

    /// The attached renderer.
    pub fn renderer(&self) -> Option<&Renderer> {
        self.renderer.as_ref()
    }
}

impl AudioSink for OfflineSink {
    fn name(&self) -> &str {
        "offline"
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn attach(&mut self, renderer: Renderer) {
        self.renderer = Some(renderer);
    }

    fn start(&mut self) -> Result<()> {
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.running = false;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Notes to pluck at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Strum {
    /// Offset from the start of the render, in seconds.
    pub at: f64,
    /// Notes to pluck; empty stops every string.
    pub notes: Vec<Note>,
}

impl Strum {
    /// Pluck `notes` at `at` seconds.
    pub fn new(at: f64, notes: Vec<Note>) -> Self {
        Self { at, notes }
    }
}

/// Render `seconds` of audio with the instrument described by `config`,
/// plucking each strum at its start time.
///
/// Strums are applied in time order; ties keep their given order. Notes on
/// strings the tuning does not have are skipped with a warning.
pub fn render_strums(config: &GuitarConfig, strums: &[Strum], seconds: f64) -> Result<Vec<f32>> {
    config.validate()?;
    let tuning = config.resolve_tuning()?;
    let sample_rate = config.sample_rate;

    let mut instrument = Instrument::with_seed(
        f64::from(sample_rate),
        &tuning,
        config.seed.unwrap_or(DEFAULT_SEED),
    );
    instrument.set_gain(config.gain);
    let (handle, renderer) = Renderer::new(instrument);

    let mut sink = OfflineSink::new(sample_rate, config.buffer_size as usize);
    sink.attach(renderer);

    let to_frame = |t: f64| (t.max(0.0) * f64::from(sample_rate)).round() as usize;
    let total = to_frame(seconds);
    let mut out = vec![0.0f32; total];

    let mut ordered: Vec<&Strum> = strums.iter().collect();
    ordered.sort_by(|a, b| a.at.total_cmp(&b.at));

    let mut cursor = 0;
    for strum in ordered {
        let start = to_frame(strum.at).min(total);
        sink.render_into(&mut out[cursor..start]);
        cursor = start;

        if let Some(bad) = strum.notes.iter().find(|n| n.string >= tuning.len()) {
            tracing::warn!(
                string = bad.string,
                strings = tuning.len(),
                at = strum.at,
                "skipping note on missing string"
            );
        }
        handle.play_notes(&strum.notes);
        sink.flush();
    }
    sink.render_into(&mut out[cursor..]);

    tracing::debug!(frames = total, strums = strums.len(), "offline render complete");
    Ok(out)
}

/// [`render_strums`] straight to a mono 32-bit float WAV file.
///
/// Returns the number of frames written.
pub fn render_to_wav(
    config: &GuitarConfig,
    strums: &[Strum],
    seconds: f64,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let samples = render_strums(config, strums, seconds)?;
    write_wav(path, &samples, WavSpec::mono(config.sample_rate))?;
    Ok(samples.len())
}
