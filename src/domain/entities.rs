/// A decoded recording: the opaque header kept verbatim for re-emission and
/// the normalized samples in temporal order.
#[derive(Debug)]
pub struct Recording {
    pub header: Vec<u8>,
    pub samples: Vec<f64>,
}

impl Recording {
    pub fn new(header: Vec<u8>, samples: Vec<f64>) -> Self {
        Recording { header, samples }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    Quiet,
    Sound,
}

/// Inclusive sample-index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
    pub kind: IntervalKind,
}

impl Interval {
    pub fn new(start: usize, end: usize, kind: IntervalKind) -> Self {
        Interval { start, end, kind }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// True when the interval adjoins the first or last sample of a buffer of `len` samples.
    pub fn touches_edge(&self, len: usize) -> bool {
        self.start == 0 || self.end + 1 == len
    }
}

/// Quiet and sound intervals of one envelope, each list ordered by start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    pub quiet: Vec<Interval>,
    pub sound: Vec<Interval>,
    /// Mean envelope value of each sound interval, positionally paired with `sound`.
    pub average_amplitudes: Vec<f32>,
}

impl Segmentation {
    /// All intervals merged back into temporal order.
    pub fn partition(&self) -> Vec<Interval> {
        let mut all: Vec<Interval> = self.quiet.iter().chain(&self.sound).copied().collect();
        all.sort_by_key(|interval| interval.start);
        all
    }
}

/// A boundary strictly between two adjacent samples.
///
/// Stored as the index of the first sample to the right of the boundary, so
/// the leading sentinel (`-0.5`) is `0` and the trailing one (`len - 0.5`) is `len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CutPoint {
    right: usize,
}

impl CutPoint {
    pub fn before(index: usize) -> Self {
        CutPoint { right: index }
    }

    pub fn after(index: usize) -> Self {
        CutPoint { right: index + 1 }
    }

    pub fn right(&self) -> usize {
        self.right
    }

    /// Half-integer position on the sample axis.
    pub fn position(&self) -> f64 {
        self.right as f64 - 0.5
    }
}
