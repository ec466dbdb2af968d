//! Dense per-eye buffers assembled from the streamed samples.
//!
//! The transport delivers samples frame by frame and may redeliver a frame.
//! [`Recording`] places every sample at its `frameIndex`, so rebuilding the
//! buffers from the same messages always yields the same arrays and the
//! analysis can simply be re-run whenever new frames arrive.

use crate::types::{Axis, Coordinate, Eye, EyeMessage, Sample};
use log::warn;
use serde::Serialize;

/// Default bound on `frameIndex`: one hour at 30 fps. Samples at or past
/// the limit are dropped.
pub const DEFAULT_FRAME_LIMIT: usize = 108_000;

/// Frame-indexed arrays for one eye.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeSeries {
    pub x: Vec<Coordinate>,
    pub y: Vec<Coordinate>,
    pub hidden: Vec<bool>,
}

impl EyeSeries {
    /// Builds dense arrays of length `max(frameIndex) + 1`.
    ///
    /// Frames without a sample are missing and not hidden. A repeated frame
    /// index keeps the sample that arrived last. Indices at or past
    /// [`DEFAULT_FRAME_LIMIT`] are dropped.
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut series = Self::default();
        for sample in samples {
            series.insert(*sample, DEFAULT_FRAME_LIMIT);
        }
        series
    }

    /// Places `sample` at its frame index. Returns false, leaving the series
    /// untouched, when the index is not below `frame_limit`.
    pub fn insert(&mut self, sample: Sample, frame_limit: usize) -> bool {
        let idx = sample.frame_index;
        if idx >= frame_limit {
            warn!("dropping sample at frame {idx}, limit is {frame_limit}");
            return false;
        }
        if idx >= self.len() {
            let len = idx + 1;
            self.x.resize(len, Coordinate::Missing);
            self.y.resize(len, Coordinate::Missing);
            self.hidden.resize(len, false);
        }
        self.x[idx] = sample.x;
        self.y[idx] = sample.y;
        self.hidden[idx] = sample.is_hide;
        true
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }

    pub fn axis(&self, axis: Axis) -> &[Coordinate] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn missing_count(&self, axis: Axis) -> usize {
        self.axis(axis).iter().filter(|c| c.is_missing()).count()
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.iter().filter(|&&h| h).count()
    }
}

/// Both eyes of one exam recording.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recording {
    pub od: EyeSeries,
    pub os: EyeSeries,
    #[serde(skip)]
    frame_limit: usize,
}

impl Default for Recording {
    fn default() -> Self {
        Self::with_frame_limit(DEFAULT_FRAME_LIMIT)
    }
}

impl Recording {
    /// Empty recording accepting frame indices below `frame_limit`.
    pub fn with_frame_limit(frame_limit: usize) -> Self {
        Self {
            od: EyeSeries::default(),
            os: EyeSeries::default(),
            frame_limit,
        }
    }

    pub fn from_samples(od: &[Sample], os: &[Sample]) -> Self {
        let mut recording = Self::default();
        recording.extend(Eye::Od, od);
        recording.extend(Eye::Os, os);
        recording
    }

    /// Splits an interleaved message stream by eye.
    pub fn from_messages(messages: &[EyeMessage]) -> Self {
        let mut recording = Self::default();
        for msg in messages {
            recording.push(msg.eye, msg.sample());
        }
        recording
    }

    pub fn frame_limit(&self) -> usize {
        self.frame_limit
    }

    /// Adds one sample; false when its frame index is out of range.
    pub fn push(&mut self, eye: Eye, sample: Sample) -> bool {
        let limit = self.frame_limit;
        self.series_mut(eye).insert(sample, limit)
    }

    /// Adds samples for one eye, returning how many were accepted.
    pub fn extend(&mut self, eye: Eye, samples: &[Sample]) -> usize {
        samples.iter().filter(|s| self.push(eye, **s)).count()
    }

    pub fn series(&self, eye: Eye) -> &EyeSeries {
        match eye {
            Eye::Od => &self.od,
            Eye::Os => &self.os,
        }
    }

    fn series_mut(&mut self, eye: Eye) -> &mut EyeSeries {
        match eye {
            Eye::Od => &mut self.od,
            Eye::Os => &mut self.os,
        }
    }

    /// Number of frames both eyes cover; every stage works on this prefix.
    pub fn aligned_len(&self) -> usize {
        self.od.len().min(self.os.len())
    }
}
