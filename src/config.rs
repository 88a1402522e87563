use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ConfigError;
use crate::preprocessing::envelope::window_len;

/// The tool that produced the recording, which fixes the header length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceVariant {
    /// Zoom H6 field recorder.
    Zoom,
    /// Audacity WAV export.
    Audacity,
}

impl SourceVariant {
    pub fn header_len(self) -> usize {
        match self {
            // 65536 sample slots of 2 bytes each
            SourceVariant::Zoom => 131_072,
            SourceVariant::Audacity => 44,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AmplifyConfig {
    pub source: SourceVariant,
    /// Used when the header cannot be probed for its own rate.
    pub sample_rate: u32,
    /// Envelope values below this are quiet.
    pub cutting_amplitude: f32,
    pub window_seconds: f64,
    pub target_amplitude: f32,
    pub debug_report: bool,
    pub progress: bool,
}

impl Default for AmplifyConfig {
    fn default() -> Self {
        Self {
            source: SourceVariant::Zoom,
            sample_rate: 44_100,
            cutting_amplitude: 0.002,
            window_seconds: 0.2,
            target_amplitude: 0.25,
            debug_report: false,
            progress: true,
        }
    }
}

impl AmplifyConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid("sample_rate must be positive".into()));
        }
        if !(self.cutting_amplitude.is_finite() && self.cutting_amplitude > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cutting_amplitude must be a positive number, got {}",
                self.cutting_amplitude
            )));
        }
        if !(self.target_amplitude.is_finite() && self.target_amplitude > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "target_amplitude must be a positive number, got {}",
                self.target_amplitude
            )));
        }
        if !(self.window_seconds.is_finite() && self.window_seconds > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "window_seconds must be a positive number, got {}",
                self.window_seconds
            )));
        }
        if self.window_len(self.sample_rate) == 0 {
            return Err(ConfigError::Invalid(format!(
                "a {}s window holds no samples at {} Hz",
                self.window_seconds, self.sample_rate
            )));
        }
        Ok(())
    }

    pub fn window_len(&self, sample_rate: u32) -> usize {
        window_len(sample_rate, self.window_seconds)
    }
}
