//! Sink that discards everything.

use crate::{AudioSink, Renderer, Result};

/// A sink with no device behind it.
///
/// Every call succeeds and does nothing. [`Guitar`](crate::Guitar) falls back
/// to this when no output device can be opened, so the rest of the program
/// keeps working without sound.
#[derive(Debug)]
pub struct NullSink {
    sample_rate: u32,
    renderer: Option<Renderer>,
}

impl NullSink {
    /// Create a null sink reporting `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            renderer: None,
        }
    }

    /// Whether a renderer has been attached.
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Discard whatever the handle has queued, so a sender never sees a
    /// full queue. Returns how many commands were dropped.
    pub fn discard_commands(&mut self) -> usize {
        self.renderer
            .as_mut()
            .map_or(0, |renderer| renderer.drain_commands())
    }
}

impl AudioSink for NullSink {
    fn name(&self) -> &str {
        "null"
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn attach(&mut self, renderer: Renderer) {
        // Held so the handle stays connected.
        self.renderer = Some(renderer);
    }

    fn start(&mut self) -> Result<()> {
        self.discard_commands();
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.discard_commands();
        Ok(())
    }

    fn is_running(&self) -> bool {
        false
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::COMMAND_QUEUE_CAPACITY;
    use fretwire_synth::{Instrument, STANDARD_TUNING};

    #[test]
    fn test_null_sink_is_inert() {
        let mut sink = NullSink::new(22050);
        assert_eq!(sink.name(), "null");
        assert_eq!(sink.sample_rate(), 22050);
        assert!(!sink.is_available());

        let (handle, renderer) = Renderer::new(Instrument::new(22050.0, &STANDARD_TUNING));
        sink.attach(renderer);
        assert!(sink.has_renderer());
        assert!(handle.is_connected());

        sink.start().unwrap();
        assert!(!sink.is_running());
        sink.stop().unwrap();
    }

    #[test]
    fn test_start_and_stop_discard_queued_commands() {
        let mut sink = NullSink::new(44100);
        let (handle, renderer) = Renderer::new(Instrument::new(44100.0, &STANDARD_TUNING));
        sink.attach(renderer);

        for _ in 0..COMMAND_QUEUE_CAPACITY {
            assert!(handle.stop_all());
        }
        assert!(!handle.stop_all());

        sink.stop().unwrap();
        assert!(handle.stop_all());
        assert_eq!(sink.discard_commands(), 1);
    }
}
