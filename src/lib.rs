//! Raises the loudness of speech in mono 16-bit PCM field recordings while
//! leaving the quiet stretches between utterances close to where they were.
//!
//! The recording is split at the middle of each quiet stretch, and every
//! resulting segment gets one gain that brings the average sliding-window RMS
//! of its speech to a target level.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod pipeline;
pub mod preprocessing;

pub use config::{AmplifyConfig, SourceVariant};
pub use domain::errors::AppError;
pub use pipeline::{Amplifier, RunSummary};
