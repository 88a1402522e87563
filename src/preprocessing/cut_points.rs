use crate::domain::entities::{CutPoint, Interval};
use crate::domain::errors::DegenerateSegmentation;

/// Chooses the boundaries between independently gained segments of a buffer
/// of `len` samples.
///
/// The two file edges are always boundaries. Quiet intervals touching an edge
/// just adjoin those sentinels; every other quiet interval is cut right after
/// its (lower) middle sample. The result must bracket each sound interval
/// exactly once.
pub fn select(
    quiet: &[Interval],
    sound_intervals: usize,
    len: usize,
) -> Result<Vec<CutPoint>, DegenerateSegmentation> {
    if sound_intervals == 0 {
        return Err(DegenerateSegmentation::NoSound);
    }

    let mut cut_points = Vec::with_capacity(sound_intervals + 1);
    cut_points.push(CutPoint::before(0));
    cut_points.extend(
        quiet
            .iter()
            .filter(|interval| !interval.touches_edge(len))
            .map(|interval| CutPoint::after((interval.start + interval.end) / 2)),
    );
    cut_points.push(CutPoint::before(len));
    cut_points.sort_unstable();

    if cut_points.len() != sound_intervals + 1 {
        return Err(DegenerateSegmentation::Unpaired {
            cut_points: cut_points.len(),
            sound_intervals,
        });
    }
    Ok(cut_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::IntervalKind;
    use crate::preprocessing::segmenter::Segmenter;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn quiet(start: usize, end: usize) -> Interval {
        Interval::new(start, end, IntervalKind::Quiet)
    }

    #[test]
    fn edge_quiet_intervals_are_skipped() {
        // quiet 0..=2, sound 3..=5, quiet 6..=9, sound 10..=11, quiet 12..=13
        let cuts = select(&[quiet(0, 2), quiet(6, 9), quiet(12, 13)], 2, 14).unwrap();
        let positions: Vec<f64> = cuts.iter().map(CutPoint::position).collect();
        assert_eq!(positions, vec![-0.5, 7.5, 13.5]);
    }

    #[test]
    fn midpoint_rounds_toward_lower_index() {
        let cuts = select(&[quiet(4, 4), quiet(8, 9)], 3, 12).unwrap();
        let positions: Vec<f64> = cuts.iter().map(CutPoint::position).collect();
        assert_eq!(positions, vec![-0.5, 4.5, 8.5, 11.5]);
    }

    #[test]
    fn no_sound_is_degenerate() {
        assert_eq!(
            select(&[quiet(0, 9)], 0, 10),
            Err(DegenerateSegmentation::NoSound)
        );
    }

    #[test]
    fn mismatched_counts_are_degenerate() {
        assert_eq!(
            select(&[], 2, 10),
            Err(DegenerateSegmentation::Unpaired {
                cut_points: 2,
                sound_intervals: 2
            })
        );
    }

    #[test]
    fn random_envelopes_pair_every_sound_interval() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let len = rng.random_range(1..300);
            // bursts of sound so runs of both kinds have varied lengths
            let loud_odds = rng.random_range(0.05..0.95);
            let envelope: Vec<f32> = (0..len)
                .map(|_| if rng.random_bool(loud_odds) { 0.3 } else { 0.0 })
                .collect();
            let segmentation = Segmenter::new(0.1).classify(&envelope);

            let result = select(&segmentation.quiet, segmentation.sound.len(), len);
            if segmentation.sound.is_empty() {
                assert_eq!(result, Err(DegenerateSegmentation::NoSound));
                continue;
            }
            let cuts = result.unwrap();
            assert_eq!(cuts.len(), segmentation.sound.len() + 1);
            assert_eq!(cuts.first(), Some(&CutPoint::before(0)));
            assert_eq!(cuts.last(), Some(&CutPoint::before(len)));
            for (i, sound) in segmentation.sound.iter().enumerate() {
                assert!(cuts[i].position() < sound.start as f64);
                assert!(cuts[i + 1].position() > sound.end as f64);
            }
        }
    }

    #[test]
    fn one_more_cut_point_than_sound_intervals() {
        let envelope = [0.0, 0.3, 0.0, 0.0, 0.4, 0.4, 0.0, 0.2, 0.2];
        let segmentation = Segmenter::new(0.1).classify(&envelope);
        let cuts = select(&segmentation.quiet, segmentation.sound.len(), envelope.len()).unwrap();

        assert_eq!(cuts.len(), segmentation.sound.len() + 1);
        assert!(cuts.windows(2).all(|pair| pair[0] < pair[1]));
        for (i, sound) in segmentation.sound.iter().enumerate() {
            assert!(cuts[i].position() < sound.start as f64);
            assert!(cuts[i + 1].position() > sound.end as f64);
        }
    }
}
