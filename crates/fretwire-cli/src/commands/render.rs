//! Offline rendering of chord shapes to WAV.

use super::common::{InstrumentArgs, strum_plan};
use clap::Args;
use fretwire_io::render_to_wav;
use std::path::PathBuf;

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    instrument: InstrumentArgs,

    /// Output WAV file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Sample rate in Hz (overrides the config)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Extra seconds after the last chord to let strings ring out
    #[arg(long, default_value = "3.0")]
    tail: f64,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = args.instrument.load_config()?;
    if let Some(rate) = args.sample_rate {
        anyhow::ensure!(rate > 0, "--sample-rate must be non-zero");
        config.sample_rate = rate;
    }
    anyhow::ensure!(
        args.tail.is_finite() && args.tail >= 0.0,
        "--tail must not be negative"
    );

    let chords = args.instrument.chords(&config)?;
    let seconds = args.instrument.seconds;
    let plan = strum_plan(&chords, seconds, args.instrument.gap);
    let total = chords.len() as f64 * seconds + args.tail;

    println!(
        "Rendering {} chord(s), {:.1}s at {} Hz...",
        chords.len(),
        total,
        config.sample_rate
    );
    let frames = render_to_wav(&config, &plan, total, &args.output)?;
    println!("Wrote {} frames to {}", frames, args.output.display());
    Ok(())
}
