//! Audio output device listing.

use clap::Args;
use fretwire_io::{default_output_device, list_output_devices};

#[derive(Args)]
pub struct DevicesArgs {
    /// Show only the default output device
    #[arg(long)]
    default: bool,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    if args.default {
        match default_output_device()? {
            Some(device) => {
                println!("Default Output:");
                println!("  Name: {}", device.name);
                println!("  Sample Rate: {} Hz", device.default_sample_rate);
                println!("  Channels: {}", device.channels);
            }
            None => println!("Default Output: None"),
        }
        return Ok(());
    }

    let devices = list_output_devices()?;
    if devices.is_empty() {
        println!("No audio output devices found.");
        return Ok(());
    }

    println!("Output Devices");
    println!("==============\n");
    for device in &devices {
        let marker = if device.is_default { " (default)" } else { "" };
        println!(
            "  {} ({} Hz, {} ch){}",
            device.name, device.default_sample_rate, device.channels, marker
        );
    }
    println!();
    println!("Tip: select one with a partial name:");
    println!("  fretwire play --device \"USB\" 022100");
    Ok(())
}
