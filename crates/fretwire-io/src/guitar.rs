//! The [`Guitar`] facade: one instrument wired to one sink.

use crate::{
    AudioSink, CpalSink, Error, InstrumentHandle, MAX_TUNING_STRINGS, NullSink, Renderer, Result,
    SinkOptions,
};
use fretwire_config::GuitarConfig;
use fretwire_synth::{DEFAULT_SEED, Instrument, Note, SynthError};

/// A playable guitar.
///
/// Owns the sink and the control handle for an instrument rendering on it.
/// When no output device can be opened the guitar falls back to a
/// [`NullSink`]: [`is_supported`](Self::is_supported) turns `false` and every
/// call becomes a harmless no-op instead of an error.
///
/// The guitar keeps its own copy of the tuning so requests can be checked
/// before they are queued for the audio thread. The copy only changes once
/// the render thread has been sent the new tuning.
pub struct Guitar {
    sink: Box<dyn AudioSink>,
    handle: InstrumentHandle,
    tuning: Vec<i32>,
    gain: f64,
    seed: u64,
    destroyed: bool,
}

impl Guitar {
    /// Open the configured output device, falling back to silence if it
    /// cannot be used.
    ///
    /// Fails only if `config` itself is invalid.
    pub fn open(config: &GuitarConfig) -> Result<Self> {
        config.validate()?;
        let options = SinkOptions::from(config);

        let sink: Box<dyn AudioSink> = match CpalSink::open(&options) {
            Ok(sink) => Box::new(sink),
            Err(err) => {
                tracing::warn!(%err, "audio output unavailable, guitar will be silent");
                Box::new(NullSink::new(options.sample_rate))
            }
        };

        Ok(Self::with_sink(
            sink,
            &config.resolve_tuning()?,
            config.gain,
            config.seed,
        ))
    }

    /// Build an instrument at the sink's sample rate and attach it.
    pub fn with_sink(
        mut sink: Box<dyn AudioSink>,
        tuning: &[i32],
        gain: f64,
        seed: Option<u64>,
    ) -> Self {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        let (handle, gain) = attach_instrument(sink.as_mut(), tuning, gain, seed);
        tracing::info!(
            sink = sink.name(),
            sample_rate = sink.sample_rate(),
            strings = tuning.len(),
            "guitar ready"
        );

        Self {
            sink,
            handle,
            tuning: tuning.to_vec(),
            gain,
            seed,
            destroyed: false,
        }
    }

    /// Queue a command on a sink that plays. Silent sinks never render, so
    /// nothing is sent to them.
    fn queue(&self, send: impl FnOnce(&InstrumentHandle) -> bool) -> Result<()> {
        if !self.sink.is_available() || send(&self.handle) {
            Ok(())
        } else {
            Err(Error::CommandDropped)
        }
    }

    /// Replace the instrument with fresh strings built here, on the control
    /// thread. Ringing strings are cut off.
    fn restring(&mut self, tuning: &[i32]) {
        let (handle, _) = attach_instrument(self.sink.as_mut(), tuning, self.gain, self.seed);
        self.handle = handle;
        tracing::debug!(strings = tuning.len(), "guitar restrung");
    }

    /// Pluck `notes`; an empty list stops every string.
    ///
    /// Notes on strings outside the tuning are skipped and the rest still
    /// play. The first skipped note is reported as
    /// [`SynthError::StringOutOfRange`]. If the render queue is full nothing
    /// is played and [`Error::CommandDropped`] is returned.
    pub fn play_notes(&self, notes: &[Note]) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.queue(|handle| handle.play_notes(notes))?;

        let strings = self.tuning.len();
        match notes.iter().find(|n| n.string >= strings) {
            Some(bad) => Err(SynthError::StringOutOfRange {
                index: bad.string,
                strings,
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Re-root the strings.
    ///
    /// `tuning` must have one entry per string; otherwise nothing changes and
    /// [`SynthError::TuningMismatch`] is returned. A guitar with no strings
    /// is restrung with `tuning`, as is one whose tuning is too long to queue.
    pub fn set_tuning(&mut self, tuning: &[i32]) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        let adopt = self.tuning.is_empty() && !tuning.is_empty();
        if !adopt && tuning.len() != self.tuning.len() {
            return Err(SynthError::TuningMismatch {
                expected: self.tuning.len(),
                found: tuning.len(),
            }
            .into());
        }

        if adopt || tuning.len() > MAX_TUNING_STRINGS {
            self.restring(tuning);
        } else {
            self.queue(|handle| handle.set_tuning(tuning))?;
        }
        self.tuning = tuning.to_vec();
        Ok(())
    }

    /// Silence every string.
    pub fn stop_all(&self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.queue(InstrumentHandle::stop_all)
    }

    /// Change the output gain. Non-finite values are ignored.
    pub fn set_gain(&mut self, gain: f64) -> Result<()> {
        if self.destroyed || !gain.is_finite() {
            return Ok(());
        }
        self.queue(|handle| handle.set_gain(gain))?;
        self.gain = gain;
        Ok(())
    }

    /// Start audio output.
    pub fn turn_on(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.sink.start()
    }

    /// Pause audio output. Ringing strings resume where they were on
    /// [`turn_on`](Self::turn_on).
    pub fn turn_off(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.sink.stop()
    }

    /// Stop output and release the guitar. Every later call is a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.handle.stop_all();
        if let Err(err) = self.sink.stop() {
            tracing::warn!(%err, "failed to stop output while destroying guitar");
        }
        // Dropping the sink drops the renderer and closes the stream.
        self.sink = Box::new(NullSink::new(self.sink.sample_rate()));
        self.destroyed = true;
        tracing::debug!("guitar destroyed");
    }

    /// Whether a real output device backs this guitar.
    pub fn is_supported(&self) -> bool {
        !self.destroyed && self.sink.is_available()
    }

    /// Whether the guitar can currently make sound: supported, not
    /// destroyed and its renderer still connected.
    pub fn ok(&self) -> bool {
        self.is_supported() && self.handle.is_connected()
    }

    /// Whether output is running.
    pub fn is_on(&self) -> bool {
        self.sink.is_running()
    }

    /// Sample rate of the sink, in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sink.sample_rate()
    }

    /// Current tuning.
    pub fn tuning(&self) -> &[i32] {
        &self.tuning
    }

    /// Output gain last sent to the instrument.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Name of the sink in use.
    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }
}

/// Build an instrument at the sink's rate and hand its renderer to the sink.
/// Returns the control handle and the gain the instrument accepted.
fn attach_instrument(
    sink: &mut dyn AudioSink,
    tuning: &[i32],
    gain: f64,
    seed: u64,
) -> (InstrumentHandle, f64) {
    let mut instrument = Instrument::with_seed(f64::from(sink.sample_rate()), tuning, seed);
    instrument.set_gain(gain);
    let gain = instrument.gain();

    let (handle, renderer) = Renderer::new(instrument);
    sink.attach(renderer);
    (handle, gain)
}

impl std::fmt::Debug for Guitar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guitar")
            .field("sink", &self.sink.name())
            .field("tuning", &self.tuning)
            .field("gain", &self.gain)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl Drop for Guitar {
    fn drop(&mut self) {
        self.destroy();
    }
}
