use serde::{Deserialize, Serialize};

/// How a gap-filled trace is cleaned before charting and summarising.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingStrategy {
    /// Centered moving average over `window` frames.
    #[default]
    MovingAverage,
    /// Replace jumps away from the trailing average; no averaging otherwise.
    SpikeRejection,
}

/// Trace preprocessing knobs.
///
/// - `window`: centered moving-average width in frames. Even widths behave as
///   `window + 1` since the window is `[i - window/2, i + window/2]`.
/// - `spike`: thresholds for [`SmoothingStrategy::SpikeRejection`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceParams {
    pub strategy: SmoothingStrategy,
    pub window: usize,
    pub spike: SpikeParams,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            strategy: SmoothingStrategy::MovingAverage,
            window: 25,
            spike: SpikeParams::default(),
        }
    }
}

impl TraceParams {
    pub fn moving_average(window: usize) -> Self {
        Self {
            strategy: SmoothingStrategy::MovingAverage,
            window,
            ..Default::default()
        }
    }

    pub fn spike_rejection(spike: SpikeParams) -> Self {
        Self {
            strategy: SmoothingStrategy::SpikeRejection,
            spike,
            ..Default::default()
        }
    }
}

/// Spike rejection against the average of recently accepted values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpikeParams {
    /// Maximum distance (pixels) from the trailing average before a sample
    /// counts as a spike.
    pub threshold_px: f64,
    /// Number of accepted values the trailing average spans.
    pub average_window: usize,
}

impl Default for SpikeParams {
    fn default() -> Self {
        Self {
            threshold_px: 20.0,
            average_window: 10,
        }
    }
}
