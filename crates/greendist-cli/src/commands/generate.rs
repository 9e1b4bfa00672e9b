//! Test signal generation command.

use clap::{Args, Subcommand};
use greendist_io::{AudioBuffer, WavSpec, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Sine {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "1000.0")]
        freq: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Number of channels (1 or 2)
        #[arg(long, default_value = "2", value_parser = clap::value_parser!(u16).range(1..=2))]
        channels: u16,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Sine {
            output,
            freq,
            amplitude,
            duration,
            sample_rate,
            channels,
        } => {
            if sample_rate == 0 {
                anyhow::bail!("Sample rate must be greater than zero");
            }
            println!(
                "Generating {freq} Hz sine, {duration}s at {sample_rate} Hz ({channels} ch)..."
            );

            let frames = (duration.max(0.0) * sample_rate as f32) as usize;
            let tone: Vec<f32> = (0..frames)
                .map(|i| {
                    let t = i as f32 / sample_rate as f32;
                    amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()
                })
                .collect();
            let audio = AudioBuffer::new(vec![tone; channels as usize]);

            let spec = WavSpec {
                channels,
                sample_rate,
                bits_per_sample: 32,
            };
            write_wav(&output, &audio, spec)?;
            println!("Saved to {}", output.display());
        }
    }

    Ok(())
}
