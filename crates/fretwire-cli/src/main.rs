//! Fretwire CLI - strum a synthesized guitar from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fretwire")]
#[command(author, version, about = "Plucked-string guitar synthesizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strum chord shapes on the audio output
    Play(commands::play::PlayArgs),

    /// Render chord shapes to a WAV file
    Render(commands::render::RenderArgs),

    /// List built-in tunings
    Tunings(commands::tunings::TuningsArgs),

    /// List audio output devices
    Devices(commands::devices::DevicesArgs),

    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Tunings(args) => commands::tunings::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
