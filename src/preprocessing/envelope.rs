/// Number of samples covered by a window of `window_seconds` at `sample_rate`.
pub fn window_len(sample_rate: u32, window_seconds: f64) -> usize {
    (f64::from(sample_rate) * window_seconds).round() as usize
}

/// Centered sliding-window RMS of `samples`.
///
/// The `window - 1` neighbours of each position are split with the smaller
/// half before it and the larger half after it. Positions that cannot hold a
/// full window stay at 0, as does the whole envelope when the buffer is
/// shorter than one window. The running sum makes the cost linear in the
/// buffer length whatever the window width.
pub fn sliding_rms(samples: &[f64], window: usize) -> Vec<f32> {
    let mut envelope = vec![0.0f32; samples.len()];
    if window == 0 || samples.len() < window {
        return envelope;
    }

    let in_front = (window - 1) / 2;
    let squared = |x: f64| x * x;
    let mut window_sum: f64 = samples[..window].iter().copied().map(squared).sum();

    for i in 0..=(samples.len() - window) {
        if i > 0 {
            window_sum -= squared(samples[i - 1]);
            window_sum += squared(samples[i + window - 1]);
        }
        // float drift can dip a silent window a hair below zero
        let mean = (window_sum / window as f64).max(0.0);
        envelope[i + in_front] = mean.sqrt() as f32;
    }

    envelope
}
