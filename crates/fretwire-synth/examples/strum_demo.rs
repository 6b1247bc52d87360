//! Strum demo: pluck a chord and print the envelope as it rings out.
//!
//! Run with: cargo run -p fretwire-synth --example strum_demo

use fretwire_synth::{Instrument, Note, STANDARD_TUNING, fill_block};

fn main() {
    let sample_rate = 44100.0;
    let mut guitar = Instrument::new(sample_rate, &STANDARD_TUNING);

    // Open A minor: x 0 2 2 1 0
    let chord = [
        Note::new(1, 0),
        Note::new(2, 2),
        Note::new(3, 2),
        Note::new(4, 1),
        Note::new(5, 0),
    ];
    guitar.play_notes(&chord).expect("chord fits a six-string guitar");

    println!("=== Strings ===\n");
    for (i, string) in guitar.strings().iter().enumerate() {
        println!(
            "string {i}: root {:>3}  {:>8.2} Hz  period {:>4}  decay {:.4}  {}",
            string.base_pitch(),
            string.frequency(),
            string.period(),
            string.base_decay_rate(),
            if string.is_sounding() { "ringing" } else { "-" }
        );
    }

    println!("\n=== Peak level per 0.25 s ===\n");
    let mut block = vec![0.0f32; 1024];
    let blocks_per_step = (sample_rate / 4.0 / block.len() as f64).ceil() as usize;
    let mut step = 0;
    while guitar.is_sounding() {
        let mut peak = 0.0f32;
        for _ in 0..blocks_per_step {
            fill_block(Some(&mut guitar), &mut block);
            peak = block.iter().fold(peak, |m, s| m.max(s.abs()));
        }
        let bar = "#".repeat((peak * 60.0).min(60.0) as usize);
        println!("{:>5.2}s {:>7.4} {bar}", step as f64 * 0.25, peak);
        step += 1;
    }
    println!("\nsilent after ~{:.2}s", step as f64 * 0.25);
}
