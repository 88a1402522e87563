use std::path::PathBuf;

use clap::Parser;

use crate::config::{AmplifyConfig, SourceVariant};
use crate::domain::errors::ConfigError;

/// Amplify the speech in a mono 16-bit PCM WAV recording
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Recording to amplify; the result is written next to it with an `_Amplified` suffix
    pub input: PathBuf,

    /// TOML file with default settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tool that produced the recording (fixes the header length)
    #[arg(short, long)]
    pub source: Option<SourceVariant>,

    /// Sliding RMS below this level counts as quiet
    #[arg(long)]
    pub cutting_amplitude: Option<f32>,

    /// Width of the sliding RMS window in seconds
    #[arg(long)]
    pub window_seconds: Option<f64>,

    /// Average amplitude each speech segment is brought to
    #[arg(short, long)]
    pub target_amplitude: Option<f32>,

    /// Sample rate to assume when the header cannot be read
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Also write a JSON report of the waveform, envelope and cut points
    #[arg(long)]
    pub debug_report: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Defaults, overridden by the config file, overridden by flags.
    pub fn resolve_config(&self) -> Result<AmplifyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AmplifyConfig::load_from_file(path)?,
            None => AmplifyConfig::default(),
        };

        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(cutting_amplitude) = self.cutting_amplitude {
            config.cutting_amplitude = cutting_amplitude;
        }
        if let Some(window_seconds) = self.window_seconds {
            config.window_seconds = window_seconds;
        }
        if let Some(target_amplitude) = self.target_amplitude {
            config.target_amplitude = target_amplitude;
        }
        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        config.debug_report |= self.debug_report;
        if self.no_progress {
            config.progress = false;
        }

        config.validate()?;
        Ok(config)
    }
}
