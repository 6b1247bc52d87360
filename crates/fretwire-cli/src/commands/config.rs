//! Configuration file management.

use clap::{Args, Subcommand};
use fretwire_config::{GuitarConfig, default_config_path};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration file path
    Path,

    /// Print the effective configuration
    Show {
        /// Configuration file (defaults to the user config)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Write a default configuration file
    Init {
        /// Where to write (defaults to the user config path)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(ConfigCommand::Path) {
        ConfigCommand::Path => {
            let path = default_config_path();
            let state = if path.is_file() { "" } else { " (not created)" };
            println!("{}{}", path.display(), state);
        }
        ConfigCommand::Show { config } => {
            let path = config.unwrap_or_else(default_config_path);
            let guitar = if path.is_file() {
                GuitarConfig::load(&path)?
            } else {
                GuitarConfig::default()
            };
            print!("{}", guitar.to_toml()?);
        }
        ConfigCommand::Init { output, force } => {
            let path = output.unwrap_or_else(default_config_path);
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            GuitarConfig::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
