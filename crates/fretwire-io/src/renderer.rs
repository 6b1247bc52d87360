//! Control-to-render handoff.
//!
//! The [`Renderer`] owns the [`Instrument`] outright and lives on the audio
//! thread. Everything else talks to it through an [`InstrumentHandle`], which
//! pushes [`Command`]s into a bounded channel. The renderer drains that
//! channel without blocking at the top of every block, so a command takes
//! effect at a block boundary and never lands halfway through one.
//!
//! ```text
//!   control thread                      audio thread
//!  ┌────────────────┐   Command   ┌─────────────────────────┐
//!  │InstrumentHandle│ ──────────▶ │Renderer                 │
//!  │  play_notes    │  (bounded)  │  drain_commands()       │
//!  │  set_tuning    │             │  fill block from        │
//!  │  stop_all ...  │             │  Instrument::next_sample│
//!  └────────────────┘             └─────────────────────────┘
//! ```
//!
//! Every [`Command`] is `Copy` with its payload stored inline, so receiving
//! and discarding commands on the audio thread never touches the heap.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use fretwire_synth::{Instrument, Note, fill_block, fill_interleaved};
use rand::Rng;
use rand::rngs::SmallRng;

/// Notes carried by a single [`Command::PlayNotes`].
pub const MAX_BATCH_NOTES: usize = 16;

/// Strings a [`Command::SetTuning`] can carry.
pub const MAX_TUNING_STRINGS: usize = 16;

/// Commands that can be queued before the renderer drains them.
pub const COMMAND_QUEUE_CAPACITY: usize = 64;

/// Fixed-capacity list of notes, stored inline.
///
/// Moving one through the channel never touches the heap, so the render
/// thread neither allocates nor frees when it receives a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteBatch {
    notes: [Note; MAX_BATCH_NOTES],
    len: usize,
}

impl NoteBatch {
    /// An empty batch. Playing it stops every string.
    pub const fn new() -> Self {
        Self {
            notes: [Note::new(0, 0); MAX_BATCH_NOTES],
            len: 0,
        }
    }

    /// Copy up to [`MAX_BATCH_NOTES`] notes; `None` if `notes` is longer.
    pub fn from_notes(notes: &[Note]) -> Option<Self> {
        if notes.len() > MAX_BATCH_NOTES {
            return None;
        }
        let mut batch = Self::new();
        batch.notes[..notes.len()].copy_from_slice(notes);
        batch.len = notes.len();
        Some(batch)
    }

    /// Append a note. Returns `false` if the batch is full.
    pub fn push(&mut self, note: Note) -> bool {
        if self.len == MAX_BATCH_NOTES {
            return false;
        }
        self.notes[self.len] = note;
        self.len += 1;
        true
    }

    /// The notes in this batch.
    pub fn as_slice(&self) -> &[Note] {
        &self.notes[..self.len]
    }

    /// Number of notes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the batch holds no notes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for NoteBatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-capacity tuning, stored inline like [`NoteBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuningBatch {
    pitches: [i32; MAX_TUNING_STRINGS],
    len: usize,
}

impl TuningBatch {
    /// Copy `tuning`; `None` if it has more than [`MAX_TUNING_STRINGS`] entries.
    pub fn from_pitches(tuning: &[i32]) -> Option<Self> {
        if tuning.len() > MAX_TUNING_STRINGS {
            return None;
        }
        let mut pitches = [0; MAX_TUNING_STRINGS];
        pitches[..tuning.len()].copy_from_slice(tuning);
        Some(Self {
            pitches,
            len: tuning.len(),
        })
    }

    /// The base pitches, by string index.
    pub fn as_slice(&self) -> &[i32] {
        &self.pitches[..self.len]
    }
}

/// A request for the instrument, applied on the render thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Pluck each note; an empty batch stops all strings.
    PlayNotes(NoteBatch),
    /// Re-root the strings in place. Never changes the string count.
    SetTuning(TuningBatch),
    /// Silence every string.
    StopAll,
    /// Change the output gain.
    SetGain(f64),
}

/// Control-side sender for a [`Renderer`].
///
/// Cheap to clone. Sending never blocks: when the queue is full the command
/// is dropped with a warning and the method returns `false`.
#[derive(Debug, Clone)]
pub struct InstrumentHandle {
    commands: Sender<Command>,
}

impl InstrumentHandle {
    /// Queue a command.
    pub fn send(&self, command: Command) -> bool {
        match self.commands.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(command)) => {
                tracing::warn!(?command, "render queue full, command dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("renderer gone, command dropped");
                false
            }
        }
    }

    /// Pluck `notes`. Lists longer than [`MAX_BATCH_NOTES`] are split across
    /// several commands that the renderer applies in the same block.
    ///
    /// A split list is queued whole or not at all: if the queue lacks room
    /// for every chunk, nothing is sent.
    pub fn play_notes(&self, notes: &[Note]) -> bool {
        if notes.is_empty() {
            return self.send(Command::PlayNotes(NoteBatch::new()));
        }

        let chunks = notes.len().div_ceil(MAX_BATCH_NOTES);
        if chunks > 1
            && let Some(capacity) = self.commands.capacity()
            && capacity.saturating_sub(self.commands.len()) < chunks
        {
            tracing::warn!(notes = notes.len(), "render queue too full for chord, dropped");
            return false;
        }

        notes.chunks(MAX_BATCH_NOTES).fold(true, |sent, chunk| {
            let batch = NoteBatch::from_notes(chunk).unwrap_or_default();
            self.send(Command::PlayNotes(batch)) && sent
        })
    }

    /// Re-root the strings. Returns `false` without sending if the tuning has
    /// more than [`MAX_TUNING_STRINGS`] entries.
    pub fn set_tuning(&self, tuning: &[i32]) -> bool {
        match TuningBatch::from_pitches(tuning) {
            Some(batch) => self.send(Command::SetTuning(batch)),
            None => {
                tracing::warn!(strings = tuning.len(), "tuning too long to queue");
                false
            }
        }
    }

    /// Silence every string.
    pub fn stop_all(&self) -> bool {
        self.send(Command::StopAll)
    }

    /// Change the output gain.
    pub fn set_gain(&self, gain: f64) -> bool {
        self.send(Command::SetGain(gain))
    }

    /// Whether the renderer on the other end still exists.
    pub fn is_connected(&self) -> bool {
        // The renderer holds the only receiver.
        self.commands.receiver_count() > 0
    }
}

/// Render-side owner of the instrument.
#[derive(Debug)]
pub struct Renderer<R = SmallRng> {
    instrument: Instrument<R>,
    commands: Receiver<Command>,
}

impl<R: Rng> Renderer<R> {
    /// Take ownership of `instrument` and return the handle that controls it.
    pub fn new(instrument: Instrument<R>) -> (InstrumentHandle, Self) {
        Self::with_capacity(instrument, COMMAND_QUEUE_CAPACITY)
    }

    /// Like [`new`](Self::new) with a custom queue capacity.
    pub fn with_capacity(instrument: Instrument<R>, capacity: usize) -> (InstrumentHandle, Self) {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        (
            InstrumentHandle { commands: tx },
            Self {
                instrument,
                commands: rx,
            },
        )
    }

    /// Apply every queued command. Returns how many were applied.
    pub fn drain_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, command: Command) {
        match command {
            // Rejections were already reported to the caller by the facade.
            Command::PlayNotes(batch) => {
                let _ = self.instrument.play_notes(batch.as_slice());
            }
            Command::SetTuning(tuning) => {
                let _ = self.instrument.retune(tuning.as_slice());
            }
            Command::StopAll => self.instrument.stop_all(),
            Command::SetGain(gain) => self.instrument.set_gain(gain),
        }
    }

    /// Apply queued commands, then fill a mono block.
    pub fn render_block(&mut self, out: &mut [f32]) {
        self.drain_commands();
        fill_block(Some(&mut self.instrument), out);
    }

    /// Apply queued commands, then fill an interleaved block with the mono
    /// signal copied into every channel.
    pub fn render_interleaved(&mut self, out: &mut [f32], channels: usize) {
        self.drain_commands();
        fill_interleaved(Some(&mut self.instrument), out, channels);
    }

    /// The instrument being rendered.
    pub fn instrument(&self) -> &Instrument<R> {
        &self.instrument
    }
}
