use serde::{Deserialize, Serialize};

/// A robust measurement anchor: median value and the frame it came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedianSample {
    pub value: f64,
    pub frame: usize,
}

/// Median of `(frame, value)` pairs, ordered by value.
///
/// Odd counts return the middle pair. Even counts average the two middle
/// values and report the frame of the lower one. Ties keep frame order.
/// Non-finite values are skipped; `None` when nothing remains.
pub fn median_with_frame<I>(samples: I) -> Option<MedianSample>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut sorted: Vec<(usize, f64)> = samples
        .into_iter()
        .filter(|(_, v)| v.is_finite())
        .collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));

    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        let (frame, value) = sorted[mid];
        Some(MedianSample { value, frame })
    } else {
        let (frame, low) = sorted[mid - 1];
        let (_, high) = sorted[mid];
        Some(MedianSample {
            value: (low + high) / 2.0,
            frame,
        })
    }
}

/// Median over `trace[start..=end]`, clipped to the trace length.
pub fn median_in_range(trace: &[f64], start: usize, end: usize) -> Option<MedianSample> {
    if start >= trace.len() || end < start {
        return None;
    }
    let end = end.min(trace.len() - 1);
    median_with_frame((start..=end).map(|frame| (frame, trace[frame])))
}
