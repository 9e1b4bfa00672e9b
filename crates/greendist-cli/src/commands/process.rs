//! File-based distortion processing command.

use clap::Args;
use greendist_effects::{Param, ParamStore, ProcessorConfig, negotiate_layout};
use greendist_io::{OfflineHost, WavSpec, read_wav, write_wav};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Drive amount (0-1)
    #[arg(long)]
    drive: Option<f32>,

    /// Lowpass (tone) cutoff in Hz (20-20000)
    #[arg(long)]
    tone: Option<f32>,

    /// Highpass cutoff in Hz (20-20000)
    #[arg(long)]
    highpass: Option<f32>,

    /// Dry/wet mix (0 = dry, 1 = wet)
    #[arg(long)]
    mix: Option<f32>,

    /// Output trim in dB (-24 to 24)
    #[arg(long = "output", value_name = "DB", allow_negative_numbers = true)]
    output_db: Option<f32>,

    /// Parameter overrides by id (e.g., "tone=4000")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

/// Parse a `key=value` string for clap's `value_parser`.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected key=value)"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Write `value` into the store, warning when it had to be clamped.
fn apply(store: &ParamStore, param: Param, value: f32) {
    store.set(param, value);
    let stored = store.get(param);
    if stored != value {
        tracing::warn!("{} = {value} out of range, using {stored}", param.id());
    }
}

fn apply_params(store: &ParamStore, args: &ProcessArgs) -> anyhow::Result<()> {
    let flags = [
        (Param::Drive, args.drive),
        (Param::Tone, args.tone),
        (Param::Highpass, args.highpass),
        (Param::Mix, args.mix),
        (Param::Output, args.output_db),
    ];
    for (param, value) in flags {
        if let Some(value) = value {
            apply(store, param, value);
        }
    }

    for (key, value) in &args.param {
        let param = Param::from_id(key).ok_or_else(|| {
            let known: Vec<&str> = Param::ALL.iter().map(|p| p.id()).collect();
            anyhow::anyhow!("Unknown parameter '{key}' (expected one of: {})", known.join(", "))
        })?;
        let value: f32 = value
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid value for '{key}': '{value}'"))?;
        apply(store, param, value);
    }
    Ok(())
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (mut audio, spec) = read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} ch, {} Hz, {:.2}s",
        audio.len(),
        audio.channel_count(),
        spec.sample_rate,
        audio.len() as f32 / sample_rate
    );

    let layout = negotiate_layout(audio.channel_count(), audio.channel_count())?;
    let config = ProcessorConfig::new(sample_rate, args.block_size, layout);
    let mut host = OfflineHost::new(config)?;
    apply_params(host.params(), &args)?;

    let settings: Vec<String> = Param::ALL
        .iter()
        .map(|&p| {
            let desc = p.descriptor();
            format!("{}={}{}", p.id(), host.params().get(p), desc.unit.suffix())
        })
        .collect();
    println!("Processing ({})...", settings.join(", "));

    let input_peak = audio.peak_db();
    let input_rms = audio.rms_db();

    let pb = ProgressBar::new(audio.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    host.process(&mut audio, |done, _| pb.set_position(done as u64));
    pb.finish_with_message("done");

    println!("\nStats:");
    println!("  Input:  RMS {input_rms:.1} dB, Peak {input_peak:.1} dB");
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        audio.rms_db(),
        audio.peak_db()
    );

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &audio, out_spec)?;
    println!("Done!");

    Ok(())
}
