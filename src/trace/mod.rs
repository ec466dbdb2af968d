//! Trace preprocessing: gap filling followed by one of two smoothing
//! strategies.
//!
//! Every (eye, axis) array is processed independently and the output always
//! has the input's length with no missing entries:
//! 1. [`fill_missing`] linearly interpolates gaps (flat at both ends).
//! 2. [`moving_average`] or [`reject_spikes`] cleans the dense array, per
//!    [`TraceParams::strategy`].
//!
//! A trace without a single valid sample becomes all zeros. That fallback
//! only keeps charts alive: the trace is marked in [`EyeTraces::degenerate`]
//! and yields no medians or manual points.

mod interpolate;
pub mod params;
mod smoothing;


pub use interpolate::fill_missing;
pub use params::{SmoothingStrategy, SpikeParams, TraceParams};
pub use smoothing::{moving_average, reject_spikes};

use crate::types::{Axis, Coordinate, Eye};
use log::warn;
use serde::Serialize;

/// Bookkeeping for one preprocessed trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStats {
    pub len: usize,
    pub valid: usize,
    pub interpolated: usize,
    pub spikes_replaced: usize,
    pub degenerate: bool,
}

/// Dense output of the preprocessor for one (eye, axis) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedTrace {
    pub values: Vec<f64>,
    pub stats: TraceStats,
}

/// Runs gap filling and smoothing, keeping per-trace statistics.
pub fn preprocess(raw: &[Coordinate], params: &TraceParams) -> PreparedTrace {
    let valid = raw.iter().filter(|c| !c.is_missing()).count();
    let mut stats = TraceStats {
        len: raw.len(),
        valid,
        interpolated: raw.len() - valid,
        ..Default::default()
    };

    let Some(filled) = fill_missing(raw) else {
        if !raw.is_empty() {
            warn!("trace of {} frames has no valid sample, using zeros", raw.len());
        }
        stats.interpolated = 0;
        stats.degenerate = !raw.is_empty();
        return PreparedTrace {
            values: vec![0.0; raw.len()],
            stats,
        };
    };

    let values = match params.strategy {
        SmoothingStrategy::MovingAverage => moving_average(&filled, params.window),
        SmoothingStrategy::SpikeRejection => {
            let (values, replaced) = reject_spikes(&filled, &params.spike);
            stats.spikes_replaced = replaced;
            values
        }
    };
    PreparedTrace { values, stats }
}

/// Smoothed trace of equal length with every frame defined.
pub fn smooth(raw: &[Coordinate], params: &TraceParams) -> Vec<f64> {
    preprocess(raw, params).values
}

/// Traces that were filled with zeros because they had no valid sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegenerateMask {
    pub od_x: bool,
    pub od_y: bool,
    pub os_x: bool,
    pub os_y: bool,
}

impl DegenerateMask {
    pub fn get(&self, eye: Eye, axis: Axis) -> bool {
        match (eye, axis) {
            (Eye::Od, Axis::X) => self.od_x,
            (Eye::Od, Axis::Y) => self.od_y,
            (Eye::Os, Axis::X) => self.os_x,
            (Eye::Os, Axis::Y) => self.os_y,
        }
    }

    pub fn set(&mut self, eye: Eye, axis: Axis, degenerate: bool) {
        let flag = match (eye, axis) {
            (Eye::Od, Axis::X) => &mut self.od_x,
            (Eye::Od, Axis::Y) => &mut self.od_y,
            (Eye::Os, Axis::X) => &mut self.os_x,
            (Eye::Os, Axis::Y) => &mut self.os_y,
        };
        *flag = degenerate;
    }
}

/// The four smoothed traces of a recording, one per eye and axis.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeTraces {
    pub od_x: Vec<f64>,
    pub od_y: Vec<f64>,
    pub os_x: Vec<f64>,
    pub os_y: Vec<f64>,
    pub degenerate: DegenerateMask,
}

impl EyeTraces {
    pub fn get(&self, eye: Eye, axis: Axis) -> &[f64] {
        match (eye, axis) {
            (Eye::Od, Axis::X) => &self.od_x,
            (Eye::Od, Axis::Y) => &self.od_y,
            (Eye::Os, Axis::X) => &self.os_x,
            (Eye::Os, Axis::Y) => &self.os_y,
        }
    }

    pub fn get_mut(&mut self, eye: Eye, axis: Axis) -> &mut Vec<f64> {
        match (eye, axis) {
            (Eye::Od, Axis::X) => &mut self.od_x,
            (Eye::Od, Axis::Y) => &mut self.od_y,
            (Eye::Os, Axis::X) => &mut self.os_x,
            (Eye::Os, Axis::Y) => &mut self.os_y,
        }
    }

    /// Length of the shortest trace.
    pub fn len(&self) -> usize {
        self.od_x
            .len()
            .min(self.od_y.len())
            .min(self.os_x.len())
            .min(self.os_y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores one preprocessed trace along with its degenerate flag.
    pub fn insert(&mut self, eye: Eye, axis: Axis, prepared: PreparedTrace) {
        self.degenerate.set(eye, axis, prepared.stats.degenerate);
        *self.get_mut(eye, axis) = prepared.values;
    }

    /// The trace if it was built from at least one real sample. Degenerate
    /// traces are display-only and never feed a measurement.
    pub fn observed(&self, eye: Eye, axis: Axis) -> Option<&[f64]> {
        if self.degenerate.get(eye, axis) {
            None
        } else {
            Some(self.get(eye, axis))
        }
    }

    /// Observed value at `frame`; `None` past the end of the trace or when
    /// the trace is degenerate.
    pub fn value_at(&self, eye: Eye, axis: Axis, frame: usize) -> Option<f64> {
        self.observed(eye, axis)?.get(frame).copied()
    }
}
