use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::config::AmplifyConfig;
use crate::domain::errors::{AppError, ConfigError, FormatError};
use crate::infrastructure::debug_report::DebugReport;
use crate::infrastructure::output::{amplified_path, debug_report_path, write_atomic};
use crate::infrastructure::pcm;
use crate::infrastructure::progress::stage_bar;
use crate::preprocessing::envelope::sliding_rms;
use crate::preprocessing::segmenter::Segmenter;
use crate::preprocessing::{cut_points, normalizer};

const STAGES: u64 = 7;

/// Figures gathered while amplifying one recording.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub sample_rate: u32,
    pub sample_count: usize,
    pub sound_intervals: usize,
    pub average_sound_seconds: f64,
    pub gain_ratios: Vec<f32>,
}

impl RunStats {
    pub fn min_gain(&self) -> Option<f32> {
        self.gain_ratios.iter().copied().reduce(f32::min)
    }

    pub fn max_gain(&self) -> Option<f32> {
        self.gain_ratios.iter().copied().reduce(f32::max)
    }
}

/// The fully encoded output of one run, not yet written anywhere.
#[derive(Debug)]
pub struct Amplified {
    pub bytes: Vec<u8>,
    pub stats: RunStats,
    pub debug_report: Option<DebugReport>,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub debug_report: Option<PathBuf>,
    pub stats: RunStats,
}

pub struct Amplifier {
    config: AmplifyConfig,
}

impl Amplifier {
    pub fn new(config: AmplifyConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Amplifier { config })
    }

    /// Amplifies `input` into its `_Amplified` sibling. Nothing is written
    /// unless every stage succeeds; once the audio is written, a debug report
    /// that cannot be saved is only logged.
    pub fn process_file(&self, input: &Path) -> Result<RunSummary, AppError> {
        let bar = stage_bar(STAGES, self.config.progress);
        bar.set_message(format!("Amplifying {}", input.display()));

        let bytes = fs::read(input)?;
        info!(path = %input.display(), bytes = bytes.len(), "read recording");
        let amplified = self.run_stages(bytes, &bar)?;
        let report_json = amplified
            .debug_report
            .as_ref()
            .map(DebugReport::to_json)
            .transpose()?;

        let output = amplified_path(input);
        write_atomic(&output, &amplified.bytes)?;
        bar.inc(1);
        info!(path = %output.display(), "wrote amplified recording");

        let debug_report = report_json.and_then(|json| {
            let path = debug_report_path(input);
            match write_atomic(&path, &json) {
                Ok(()) => {
                    info!(path = %path.display(), "wrote debug report");
                    Some(path)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to write debug report");
                    None
                }
            }
        });

        bar.finish_with_message("Amplification completed!");
        Ok(RunSummary {
            output,
            debug_report,
            stats: amplified.stats,
        })
    }

    /// Runs every stage on an in-memory file and returns the encoded result.
    pub fn amplify(&self, bytes: Vec<u8>) -> Result<Amplified, AppError> {
        self.run_stages(bytes, &ProgressBar::hidden())
    }

    fn run_stages(&self, bytes: Vec<u8>, bar: &ProgressBar) -> Result<Amplified, AppError> {
        let header_len = self.config.source.header_len();
        let sample_rate = self.resolve_sample_rate(&bytes, header_len)?;
        let window = self.config.window_len(sample_rate);
        if window == 0 {
            return Err(ConfigError::Invalid(format!(
                "a {}s window holds no samples at the recording's {} Hz",
                self.config.window_seconds, sample_rate
            ))
            .into());
        }

        let recording = pcm::decode(bytes, header_len)?;
        let header = recording.header;
        let mut samples = recording.samples;
        bar.inc(1);
        info!(
            samples = samples.len(),
            seconds = samples.len() as f64 / f64::from(sample_rate),
            "decoded payload"
        );

        let envelope = sliding_rms(&samples, window);
        bar.inc(1);
        debug!(window, "computed sliding rms");

        let segmentation = Segmenter::new(self.config.cutting_amplitude).classify(&envelope);
        bar.inc(1);

        // the envelope and an untouched copy of the samples only outlive this
        // point when a debug report will be drawn from them
        let retained = if self.config.debug_report {
            Some((envelope, samples.clone()))
        } else {
            drop(envelope);
            None
        };

        let cuts = cut_points::select(&segmentation.quiet, segmentation.sound.len(), samples.len())?;
        bar.inc(1);
        let sound_samples: usize = segmentation.sound.iter().map(|s| s.len()).sum();
        let average_sound_seconds =
            sound_samples as f64 / segmentation.sound.len() as f64 / f64::from(sample_rate);
        info!(
            sound_intervals = segmentation.sound.len(),
            cut_points = cuts.len(),
            average_sound_seconds,
            "segmented recording"
        );

        let ratios = normalizer::gain_ratios(
            &segmentation.average_amplitudes,
            self.config.target_amplitude,
        )?;
        for (i, (interval, ratio)) in segmentation.sound.iter().zip(&ratios).enumerate() {
            debug!(index = i, start = interval.start, end = interval.end, ratio, "segment gain");
        }
        normalizer::apply(&mut samples, &cuts, &ratios)?;
        bar.inc(1);

        let debug_report = retained.map(|(envelope, original)| {
            DebugReport::new(sample_rate, &original, &envelope, &samples, &segmentation, &cuts)
        });

        let stats = RunStats {
            sample_rate,
            sample_count: samples.len(),
            sound_intervals: segmentation.sound.len(),
            average_sound_seconds,
            gain_ratios: ratios,
        };

        let bytes = pcm::encode(samples, &header)?;
        bar.inc(1);

        Ok(Amplified {
            bytes,
            stats,
            debug_report,
        })
    }

    /// Checks the RIFF header when hound can read it and takes the sample
    /// rate from there; opaque headers fall back to the configured rate.
    fn resolve_sample_rate(&self, bytes: &[u8], header_len: usize) -> Result<u32, AppError> {
        let probed = match pcm::probe_header(bytes) {
            Ok(probed) => probed,
            Err(e) => {
                warn!(error = %e, fallback = self.config.sample_rate, "header is not readable RIFF; using configured sample rate");
                return Ok(self.config.sample_rate);
            }
        };

        let spec = probed.spec;
        if spec.channels != 1 || spec.bits_per_sample != 16 {
            return Err(AppError::UnsupportedFormat {
                channels: spec.channels,
                bits_per_sample: spec.bits_per_sample,
            });
        }
        if probed.data_offset != header_len {
            return Err(FormatError::HeaderMismatch {
                expected: header_len,
                actual: probed.data_offset,
            }
            .into());
        }
        if spec.sample_rate == 0 {
            warn!(fallback = self.config.sample_rate, "header reports a zero sample rate");
            return Ok(self.config.sample_rate);
        }

        debug!(sample_rate = spec.sample_rate, "probed header");
        Ok(spec.sample_rate)
    }
}
