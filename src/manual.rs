//! Operator-selected measurement frames.
//!
//! When automatic segmentation is unusable the operator picks single frames
//! on the chart instead. Each pick captures all four smoothed coordinates at
//! that frame. Two slots make one manual exam: the OD exam compares its
//! source and destination pick, and likewise for OS.

use crate::summary::{Exam, ExamSource, EyeMedians, MedianSample};
use crate::trace::EyeTraces;
use crate::types::{Axis, Eye};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coordinates of all four traces at one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualPoint {
    pub frame: usize,
    pub od_x: Option<f64>,
    pub od_y: Option<f64>,
    pub os_x: Option<f64>,
    pub os_y: Option<f64>,
}

impl ManualPoint {
    /// Reads the smoothed traces at `frame`; `None` past the end of the
    /// recording.
    pub fn capture(traces: &EyeTraces, frame: usize) -> Option<Self> {
        if frame >= traces.len() {
            return None;
        }
        let at = |eye, axis| traces.value_at(eye, axis, frame).filter(|v| v.is_finite());
        Some(Self {
            frame,
            od_x: at(Eye::Od, Axis::X),
            od_y: at(Eye::Od, Axis::Y),
            os_x: at(Eye::Os, Axis::X),
            os_y: at(Eye::Os, Axis::Y),
        })
    }

    pub fn value(&self, eye: Eye, axis: Axis) -> Option<f64> {
        match (eye, axis) {
            (Eye::Od, Axis::X) => self.od_x,
            (Eye::Od, Axis::Y) => self.od_y,
            (Eye::Os, Axis::X) => self.os_x,
            (Eye::Os, Axis::Y) => self.os_y,
        }
    }

    /// Single-frame "medians" so a manual point can stand in for a region.
    pub fn as_medians(&self) -> EyeMedians {
        let sample = |value: Option<f64>| {
            value.map(|value| MedianSample {
                value,
                frame: self.frame,
            })
        };
        EyeMedians {
            od_x: sample(self.od_x),
            od_y: sample(self.od_y),
            os_x: sample(self.os_x),
            os_y: sample(self.os_y),
        }
    }
}

/// Slot a manual pick is stored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualSlot {
    OdSource,
    OdDestination,
    OsSource,
    OsDestination,
}

impl ManualSlot {
    pub const ALL: [ManualSlot; 4] = [
        ManualSlot::OdSource,
        ManualSlot::OdDestination,
        ManualSlot::OsSource,
        ManualSlot::OsDestination,
    ];

    /// Source and destination slot of the manual exam for `eye`.
    pub fn pair(eye: Eye) -> (ManualSlot, ManualSlot) {
        match eye {
            Eye::Od => (ManualSlot::OdSource, ManualSlot::OdDestination),
            Eye::Os => (ManualSlot::OsSource, ManualSlot::OsDestination),
        }
    }
}

/// The operator's current picks. Setting a slot overwrites it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualPointSet {
    points: BTreeMap<ManualSlot, ManualPoint>,
}

impl ManualPointSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: ManualSlot, point: ManualPoint) {
        debug!("manual point {slot:?} set to frame {}", point.frame);
        self.points.insert(slot, point);
    }

    /// Captures `frame` from the traces into `slot`. Returns false (and
    /// leaves the slot alone) when the frame is out of range.
    pub fn capture(&mut self, slot: ManualSlot, traces: &EyeTraces, frame: usize) -> bool {
        match ManualPoint::capture(traces, frame) {
            Some(point) => {
                self.set(slot, point);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, slot: ManualSlot) -> Option<&ManualPoint> {
        self.points.get(&slot)
    }

    pub fn clear(&mut self, slot: ManualSlot) -> Option<ManualPoint> {
        self.points.remove(&slot)
    }

    pub fn reset(&mut self) {
        self.points.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Manual exams for every eye with both slots filled, numbered from
    /// `first_number` (OD before OS).
    pub fn exams(&self, first_number: usize) -> Vec<Exam> {
        Eye::BOTH
            .iter()
            .filter_map(|&eye| {
                let (src, dst) = ManualSlot::pair(eye);
                Some((self.get(src)?, self.get(dst)?))
            })
            .enumerate()
            .map(|(i, (src, dst))| Exam {
                number: first_number + i,
                source: ExamSource::Manual,
                first: src.as_medians(),
                second: dst.as_medians(),
            })
            .collect()
    }
}
