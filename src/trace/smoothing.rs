use super::params::SpikeParams;
use std::collections::VecDeque;

/// Centered moving average clipped to the array bounds.
///
/// Each output averages `data[i - window/2 ..= i + window/2]`; near the ends
/// the window shrinks instead of padding. A zero window is treated as one.
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    let half = window.max(1) / 2;
    let mut result = Vec::with_capacity(data.len());
    for i in 0..data.len() {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(data.len());
        let slice = &data[start..end];
        result.push(slice.iter().sum::<f64>() / slice.len() as f64);
    }
    result
}

/// Replaces samples that jump away from the trailing average.
///
/// The history holds the last `average_window` accepted values; a
/// replacement value enters the history in place of the spike. Non-finite
/// entries pass through untouched and are not added to the history.
/// Returns the cleaned values and the number of replaced samples.
pub fn reject_spikes(data: &[f64], params: &SpikeParams) -> (Vec<f64>, usize) {
    let capacity = params.average_window.max(1);
    let mut history: VecDeque<f64> = VecDeque::with_capacity(capacity);
    let mut out = Vec::with_capacity(data.len());
    let mut replaced = 0usize;

    for &value in data {
        if !value.is_finite() {
            out.push(value);
            continue;
        }
        let accepted = if history.is_empty() {
            value
        } else {
            let average = history.iter().sum::<f64>() / history.len() as f64;
            if (value - average).abs() > params.threshold_px {
                replaced += 1;
                average
            } else {
                value
            }
        };
        if history.len() == capacity {
            history.pop_front();
        }
        history.push_back(accepted);
        out.push(accepted);
    }
    (out, replaced)
}
