//! Live output through cpal.

use crate::devices::{device_name, find_output_device};
use crate::{AudioSink, Error, Renderer, Result, SinkOptions};
use cpal::traits::{DeviceTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};

/// Plays the attached renderer on a system output device.
///
/// The stream is built once, when the sink is opened, and then paused or
/// resumed by [`start`](AudioSink::start) and [`stop`](AudioSink::stop). The
/// sample rate is whatever the device prefers; the renderer's mono signal is
/// copied into every output channel.
///
/// A renderer attached later is handed to the audio callback through a
/// one-slot channel and picked up at the next block boundary. The renderer
/// it replaces is sent back and dropped on the control thread.
pub struct CpalSink {
    stream: cpal::Stream,
    device_name: String,
    sample_rate: u32,
    channels: u16,
    attach: Sender<Renderer>,
    pending: Receiver<Renderer>,
    retired: Receiver<Renderer>,
    running: bool,
}

/// Replaced renderers the callback can hand back before the control side
/// collects them. Each attach collects first, so at most two are in flight.
const RETIRED_CAPACITY: usize = 4;

impl CpalSink {
    /// Open the default output device, or the first whose name contains
    /// `options.device_name`.
    pub fn open(options: &SinkOptions) -> Result<Self> {
        let host = cpal::default_host();
        let device = find_output_device(&host, options.device_name.as_deref())?;
        let name = device_name(&device).unwrap_or_else(|_| "unknown".to_string());

        let default_config = device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?;
        let sample_rate = default_config.sample_rate();
        let channels = default_config.channels();

        let (attach_tx, attach_rx) = crossbeam_channel::bounded::<Renderer>(1);
        let (retire_tx, retire_rx) = crossbeam_channel::bounded::<Renderer>(RETIRED_CAPACITY);
        let mut stream_config = cpal::StreamConfig {
            channels,
            sample_rate,
            buffer_size: cpal::BufferSize::Fixed(options.buffer_size),
        };

        let stream = match build_stream(
            &device,
            &stream_config,
            attach_rx.clone(),
            retire_tx.clone(),
        ) {
            Ok(stream) => stream,
            Err(err) => {
                tracing::warn!(
                    %err,
                    buffer_size = options.buffer_size,
                    "fixed buffer size rejected, using device default"
                );
                stream_config.buffer_size = cpal::BufferSize::Default;
                build_stream(&device, &stream_config, attach_rx.clone(), retire_tx)?
            }
        };

        // Some hosts start streams immediately.
        let _ = stream.pause();

        tracing::info!(
            device = %name,
            sample_rate,
            channels,
            buffer_size = options.buffer_size,
            "output stream ready"
        );

        Ok(Self {
            stream,
            device_name: name,
            sample_rate,
            channels,
            attach: attach_tx,
            pending: attach_rx,
            retired: retire_rx,
            running: false,
        })
    }

    /// Name of the device being played on.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Number of interleaved output channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Drop renderers the callback has replaced. Returns how many.
    fn collect_retired(&self) -> usize {
        self.retired.try_iter().count()
    }
}

/// Build a stream whose callback renders from whichever renderer arrives on
/// `attached`, or outputs silence before the first one. Replaced renderers
/// go out on `retire` so the callback never frees one.
fn build_stream(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    attached: Receiver<Renderer>,
    retire: Sender<Renderer>,
) -> Result<cpal::Stream> {
    let channels = usize::from(config.channels);
    let mut renderer: Option<Renderer> = None;

    device
        .build_output_stream(
            config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                if let Ok(next) = attached.try_recv()
                    && let Some(old) = renderer.replace(next)
                {
                    // Only fails if the control side stopped collecting.
                    let _ = retire.try_send(old);
                }
                match renderer.as_mut() {
                    Some(renderer) => renderer.render_interleaved(data, channels),
                    None => data.fill(0.0),
                }
            },
            |err| tracing::error!(%err, "output stream error"),
            None,
        )
        .map_err(|e| Error::Stream(e.to_string()))
}

impl std::fmt::Debug for CpalSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpalSink")
            .field("device_name", &self.device_name)
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl AudioSink for CpalSink {
    fn name(&self) -> &str {
        "cpal"
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn attach(&mut self, renderer: Renderer) {
        self.collect_retired();
        // A renderer the callback has not collected yet is replaced.
        while self.pending.try_recv().is_ok() {}
        if self.attach.try_send(renderer).is_err() {
            tracing::warn!("could not hand renderer to the audio callback");
        }
    }

    fn start(&mut self) -> Result<()> {
        self.stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        self.running = true;
        tracing::debug!(device = %self.device_name, "output started");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.stream
            .pause()
            .map_err(|e| Error::Stream(e.to_string()))?;
        self.running = false;
        self.collect_retired();
        tracing::debug!(device = %self.device_name, "output stopped");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
