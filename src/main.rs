use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use speechgain::cli::Cli;
use speechgain::pipeline::Amplifier;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.resolve_config().context("invalid configuration")?;
    info!(?config, "configuration resolved");

    let amplifier = Amplifier::new(config)?;
    let summary = amplifier
        .process_file(&cli.input)
        .with_context(|| format!("failed to amplify {}", cli.input.display()))?;

    let stats = &summary.stats;
    println!(
        "{} samples at {} Hz, {} sound interval(s), average length {:.4} s",
        stats.sample_count, stats.sample_rate, stats.sound_intervals, stats.average_sound_seconds
    );
    if let (Some(min), Some(max)) = (stats.min_gain(), stats.max_gain()) {
        println!("gain ratios between {min:.3} and {max:.3}");
    }
    println!("wrote {}", summary.output.display());
    if let Some(report) = &summary.debug_report {
        println!("wrote {}", report.display());
    }

    Ok(())
}

fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {err}");
    }
}
