//! Live playback of chord shapes.

use super::common::{InstrumentArgs, strum_plan};
use clap::Args;
use fretwire_config::note_name;
use fretwire_io::Guitar;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Polling interval while waiting for the next strum.
const TICK: Duration = Duration::from_millis(10);

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    instrument: InstrumentArgs,

    /// Output device (partial name match)
    #[arg(short, long)]
    device: Option<String>,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let mut config = args.instrument.load_config()?;
    if args.device.is_some() {
        config.output_device = args.device;
    }
    let chords = args.instrument.chords(&config)?;
    let tuning = config.resolve_tuning()?;

    let mut guitar = Guitar::open(&config)?;
    if !guitar.is_supported() {
        println!("No usable audio output; playing silently.");
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    println!(
        "Playing {} chord(s) at {} Hz... Press Ctrl+C to stop.\n",
        chords.len(),
        guitar.sample_rate()
    );
    guitar.turn_on()?;

    let seconds = args.instrument.seconds;
    let start = Instant::now();

    'chords: for (i, chord) in chords.iter().enumerate() {
        let chord_start = i as f64 * seconds;
        for strum in strum_plan(std::slice::from_ref(chord), seconds, args.instrument.gap) {
            if !wait_until(start, chord_start + strum.at, &running) {
                break 'chords;
            }
            if strum.at == 0.0 {
                let notes: Vec<String> = chord
                    .iter()
                    .filter_map(|n| n.pitch(&tuning))
                    .map(note_name)
                    .collect();
                println!("  {:<12} {}", args.instrument.chords[i], notes.join(" "));
            }
            if let Err(err) = guitar.play_notes(&strum.notes) {
                tracing::warn!(%err, "strum not fully played");
            }
        }
    }

    wait_until(start, chords.len() as f64 * seconds, &running);
    guitar.destroy();
    Ok(())
}

/// Sleep until `at` seconds after `start`. Returns `false` if interrupted.
fn wait_until(start: Instant, at: f64, running: &AtomicBool) -> bool {
    let deadline = start + Duration::from_secs_f64(at.max(0.0));
    while running.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(TICK.min(deadline - now));
    }
    false
}
