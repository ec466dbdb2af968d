//! Sample-level types shared by every stage of the pipeline.

use serde::{Deserialize, Serialize};

/// Which eye a sample, trace or measurement belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Eye {
    /// Right eye (oculus dexter).
    #[serde(rename = "OD", alias = "od")]
    Od,
    /// Left eye (oculus sinister).
    #[serde(rename = "OS", alias = "os")]
    Os,
}

impl Eye {
    pub const BOTH: [Eye; 2] = [Eye::Od, Eye::Os];

    pub fn label(self) -> &'static str {
        match self {
            Eye::Od => "OD",
            Eye::Os => "OS",
        }
    }
}

impl std::fmt::Display for Eye {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Image axis of a pupil coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One pupil coordinate as delivered by the detection backend.
///
/// The backend emits `null` (and occasionally `NaN`) when the pupil was not
/// found. Both collapse into [`Coordinate::Missing`] so that "missing" and
/// "zero" can never be confused downstream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Coordinate {
    Value(f64),
    #[default]
    Missing,
}

impl Coordinate {
    /// Wraps a raw float, mapping non-finite values to `Missing`.
    pub fn from_raw(value: f64) -> Self {
        if value.is_finite() {
            Coordinate::Value(value)
        } else {
            Coordinate::Missing
        }
    }

    /// The finite value, if any. A hand-built `Value(NaN)` reads as missing.
    pub fn value(self) -> Option<f64> {
        match self {
            Coordinate::Value(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    pub fn is_missing(self) -> bool {
        self.value().is_none()
    }
}

impl From<Option<f64>> for Coordinate {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Coordinate::Missing, Coordinate::from_raw)
    }
}

impl From<Coordinate> for Option<f64> {
    fn from(value: Coordinate) -> Self {
        value.value()
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::from_raw(value)
    }
}

/// One frame's observation for a single eye.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    #[serde(alias = "frame_index")]
    pub frame_index: usize,
    #[serde(default)]
    pub x: Coordinate,
    #[serde(default)]
    pub y: Coordinate,
    /// The shutter glass blocked this eye at this frame.
    #[serde(default, alias = "is_hide")]
    pub is_hide: bool,
}

impl Sample {
    pub fn new(frame_index: usize, x: impl Into<Coordinate>, y: impl Into<Coordinate>, is_hide: bool) -> Self {
        Self {
            frame_index,
            x: x.into(),
            y: y.into(),
            is_hide,
        }
    }

    pub fn missing(frame_index: usize, is_hide: bool) -> Self {
        Self {
            frame_index,
            x: Coordinate::Missing,
            y: Coordinate::Missing,
            is_hide,
        }
    }

    pub fn coordinate(&self, axis: Axis) -> Coordinate {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// A tagged stream message `{frameIndex, eye, x, y, isHide}` as pushed by
/// the socket feed, carrying samples for both eyes interleaved.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeMessage {
    #[serde(alias = "frame_index")]
    pub frame_index: usize,
    pub eye: Eye,
    #[serde(default)]
    pub x: Coordinate,
    #[serde(default)]
    pub y: Coordinate,
    #[serde(default, alias = "is_hide")]
    pub is_hide: bool,
}

impl EyeMessage {
    pub fn sample(&self) -> Sample {
        Sample {
            frame_index: self.frame_index,
            x: self.x,
            y: self.y,
            is_hide: self.is_hide,
        }
    }
}
