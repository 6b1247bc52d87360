//! Built-in tuning listing.

use clap::Args;
use fretwire_config::{named_tunings, note_name};

#[derive(Args)]
pub struct TuningsArgs {
    /// Print pitch codes instead of note names
    #[arg(long)]
    codes: bool,
}

pub fn run(args: TuningsArgs) -> anyhow::Result<()> {
    println!("Built-in Tunings");
    println!("================\n");

    for tuning in named_tunings() {
        let strings: Vec<String> = tuning
            .pitches
            .iter()
            .map(|&p| if args.codes { p.to_string() } else { note_name(p) })
            .collect();
        println!(
            "  {:<16} {:<24} {}",
            tuning.name,
            strings.join(" "),
            tuning.description
        );
    }

    println!();
    println!("Use with: fretwire play --tuning drop-d xx0232");
    Ok(())
}
