use serde::Serialize;

use crate::domain::entities::{CutPoint, Segmentation};
use crate::domain::errors::AppError;

/// Traces are peak-decimated down to at most this many points.
pub const MAX_TRACE_POINTS: usize = 4000;

#[derive(Debug, Serialize)]
pub struct SoundIntervalReport {
    pub start: usize,
    pub end: usize,
    pub average_amplitude: f32,
}

/// Everything needed to plot the waveform, envelope and cuts of one run.
#[derive(Debug, Serialize)]
pub struct DebugReport {
    pub sample_rate: u32,
    pub sample_count: usize,
    /// Samples represented by each trace point.
    pub decimation: usize,
    pub cut_points: Vec<f64>,
    pub sound_intervals: Vec<SoundIntervalReport>,
    pub original: Vec<f32>,
    pub envelope: Vec<f32>,
    pub amplified: Vec<f32>,
}

impl DebugReport {
    pub fn new(
        sample_rate: u32,
        original: &[f64],
        envelope: &[f32],
        amplified: &[f64],
        segmentation: &Segmentation,
        cut_points: &[CutPoint],
    ) -> Self {
        let decimation = original.len().div_ceil(MAX_TRACE_POINTS).max(1);
        let sound_intervals = segmentation
            .sound
            .iter()
            .zip(&segmentation.average_amplitudes)
            .map(|(interval, &average_amplitude)| SoundIntervalReport {
                start: interval.start,
                end: interval.end,
                average_amplitude,
            })
            .collect();

        DebugReport {
            sample_rate,
            sample_count: original.len(),
            decimation,
            cut_points: cut_points.iter().map(CutPoint::position).collect(),
            sound_intervals,
            original: peaks(original, decimation),
            envelope: peaks(envelope, decimation),
            amplified: peaks(amplified, decimation),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, AppError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Keeps the largest-magnitude value of each chunk, sign included.
fn peaks<T: Copy + Into<f64>>(values: &[T], chunk: usize) -> Vec<f32> {
    values
        .chunks(chunk)
        .map(|c| {
            c.iter()
                .map(|&v| v.into())
                .fold(0.0f64, |peak, v| if v.abs() > peak.abs() { v } else { peak }) as f32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Interval, IntervalKind};

    #[test]
    fn peaks_keep_sign_of_largest_magnitude() {
        assert_eq!(peaks(&[0.1f64, -0.5, 0.2, 0.3, 0.0], 2), vec![-0.5, 0.3, 0.0]);
    }

    #[test]
    fn report_is_decimated_and_serializable() {
        let original = vec![0.25f64; 10_000];
        let envelope = vec![0.25f32; 10_000];
        let segmentation = Segmentation {
            quiet: Vec::new(),
            sound: vec![Interval::new(0, 9_999, IntervalKind::Sound)],
            average_amplitudes: vec![0.25],
        };
        let cuts = [CutPoint::before(0), CutPoint::before(10_000)];
        let report = DebugReport::new(8000, &original, &envelope, &original, &segmentation, &cuts);

        assert_eq!(report.decimation, 3);
        assert!(report.original.len() <= MAX_TRACE_POINTS);
        assert_eq!(report.cut_points, vec![-0.5, 9999.5]);

        let json: serde_json::Value = serde_json::from_slice(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["sound_intervals"][0]["end"], 9_999);
    }
}
