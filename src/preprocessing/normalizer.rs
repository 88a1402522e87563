use crate::domain::entities::CutPoint;
use crate::domain::errors::DegenerateSegmentation;

/// Gain that brings each sound interval's average amplitude to `target`.
pub fn gain_ratios(
    average_amplitudes: &[f32],
    target: f32,
) -> Result<Vec<f32>, DegenerateSegmentation> {
    average_amplitudes
        .iter()
        .enumerate()
        .map(|(index, &average)| {
            if average > 0.0 {
                Ok(target / average)
            } else {
                Err(DegenerateSegmentation::SilentSegment { index })
            }
        })
        .collect()
}

/// Multiplies every sample strictly between `cut_points[i]` and
/// `cut_points[i + 1]` by `ratios[i]`, in place.
///
/// Each segment spans its sound interval plus the nearer half of the quiet
/// stretch on either side, so those halves get the same gain.
pub fn apply(
    samples: &mut [f64],
    cut_points: &[CutPoint],
    ratios: &[f32],
) -> Result<(), DegenerateSegmentation> {
    if cut_points.len() != ratios.len() + 1 {
        return Err(DegenerateSegmentation::Unpaired {
            cut_points: cut_points.len(),
            sound_intervals: ratios.len(),
        });
    }

    for (bounds, &ratio) in cut_points.windows(2).zip(ratios) {
        let start = bounds[0].right().min(samples.len());
        let end = bounds[1].right().min(samples.len());
        for sample in &mut samples[start..end] {
            *sample *= f64::from(ratio);
        }
    }
    Ok(())
}
