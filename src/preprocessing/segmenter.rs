use crate::domain::entities::{Interval, IntervalKind, Segmentation};

/// Splits an envelope into quiet and sound runs around a cutting amplitude.
pub struct Segmenter {
    cutting_amplitude: f32,
}

impl Segmenter {
    pub fn new(cutting_amplitude: f32) -> Self {
        Segmenter { cutting_amplitude }
    }

    fn kind_of(&self, value: f32) -> IntervalKind {
        if value < self.cutting_amplitude {
            IntervalKind::Quiet
        } else {
            IntervalKind::Sound
        }
    }

    /// Tags every index and coalesces equal neighbours. Runs of length one are
    /// kept; the threshold alone decides what counts as sound.
    pub fn classify(&self, envelope: &[f32]) -> Segmentation {
        let mut segmentation = Segmentation::default();
        let Some(&first) = envelope.first() else {
            return segmentation;
        };

        let mut start = 0;
        let mut kind = self.kind_of(first);
        for (i, &value) in envelope.iter().enumerate().skip(1) {
            let next = self.kind_of(value);
            if next != kind {
                close_interval(&mut segmentation, envelope, Interval::new(start, i - 1, kind));
                start = i;
                kind = next;
            }
        }
        close_interval(
            &mut segmentation,
            envelope,
            Interval::new(start, envelope.len() - 1, kind),
        );

        segmentation
    }
}

fn close_interval(segmentation: &mut Segmentation, envelope: &[f32], interval: Interval) {
    match interval.kind {
        IntervalKind::Quiet => segmentation.quiet.push(interval),
        IntervalKind::Sound => {
            let values = &envelope[interval.start..=interval.end];
            let sum: f64 = values.iter().copied().map(f64::from).sum();
            segmentation
                .average_amplitudes
                .push((sum / values.len() as f64) as f32);
            segmentation.sound.push(interval);
        }
    }
}
