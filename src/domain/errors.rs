use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed PCM file: {0}")]
    Format(#[from] FormatError),
    #[error("unsupported WAV layout: {channels} channel(s), {bits_per_sample}-bit (expected mono 16-bit)")]
    UnsupportedFormat { channels: u16, bits_per_sample: u16 },
    #[error("degenerate segmentation: {0}")]
    Degenerate(#[from] DegenerateSegmentation),
    #[error("encoded sample {value} escaped the saturation range")]
    Range { value: i64 },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to serialize debug report: {0}")]
    Report(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("file holds {actual} bytes, shorter than the {expected}-byte header")]
    HeaderTooShort { expected: usize, actual: usize },
    #[error("payload of {len} bytes is not a whole number of 16-bit samples")]
    OddPayload { len: usize },
    #[error("audio data starts at byte {actual}, but the source variant expects {expected}")]
    HeaderMismatch { expected: usize, actual: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DegenerateSegmentation {
    #[error("no sound interval rises above the cutting amplitude")]
    NoSound,
    #[error("{cut_points} cut points cannot bracket {sound_intervals} sound intervals")]
    Unpaired {
        cut_points: usize,
        sound_intervals: usize,
    },
    #[error("sound interval {index} has zero average amplitude")]
    SilentSegment { index: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file: {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file: {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}
