//! Robust per-region summaries and their pairing into exams.
//!
//! Each interior occlusion region is reduced to four medians (OD-x, OD-y,
//! OS-x, OS-y) together with the frames they were taken from. A missing
//! median means "measurement unavailable" and is never replaced by zero.

mod exams;
mod median;

pub use exams::{pair_regions_into_exams, Exam, ExamSource};
pub use median::{median_in_range, median_with_frame, MedianSample};

use crate::regions::{interior_regions, Region, RegionType};
use crate::trace::EyeTraces;
use crate::types::{Axis, Eye};
use log::debug;
use serde::{Deserialize, Serialize};

/// Medians of the four traces over one frame span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeMedians {
    pub od_x: Option<MedianSample>,
    pub od_y: Option<MedianSample>,
    pub os_x: Option<MedianSample>,
    pub os_y: Option<MedianSample>,
}

impl EyeMedians {
    /// Medians over `start..=end`. A degenerate trace has no median.
    pub fn from_traces(traces: &EyeTraces, start: usize, end: usize) -> Self {
        let median = |eye, axis| {
            traces
                .observed(eye, axis)
                .and_then(|values| median_in_range(values, start, end))
        };
        Self {
            od_x: median(Eye::Od, Axis::X),
            od_y: median(Eye::Od, Axis::Y),
            os_x: median(Eye::Os, Axis::X),
            os_y: median(Eye::Os, Axis::Y),
        }
    }

    pub fn get(&self, eye: Eye, axis: Axis) -> Option<MedianSample> {
        match (eye, axis) {
            (Eye::Od, Axis::X) => self.od_x,
            (Eye::Od, Axis::Y) => self.od_y,
            (Eye::Os, Axis::X) => self.os_x,
            (Eye::Os, Axis::Y) => self.os_y,
        }
    }

    pub fn value(&self, eye: Eye, axis: Axis) -> Option<f64> {
        self.get(eye, axis).map(|m| m.value)
    }
}

/// Clinical measurement anchor for one interior region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    /// 1-based position among the interior regions.
    pub region_number: usize,
    pub region_type: RegionType,
    pub frame_range: [usize; 2],
    pub frame_count: usize,
    pub medians: EyeMedians,
}

impl RegionSummary {
    pub fn region(&self) -> Region {
        Region::new(self.region_type, self.frame_range[0], self.frame_range[1])
    }
}

/// Summarises one region against the smoothed traces.
pub fn summarize(region_number: usize, region: &Region, traces: &EyeTraces) -> RegionSummary {
    RegionSummary {
        region_number,
        region_type: region.region_type,
        frame_range: [region.start_frame, region.end_frame],
        frame_count: region.len(),
        medians: EyeMedians::from_traces(traces, region.start_frame, region.end_frame),
    }
}

/// Summarises every interior region, numbering them from 1.
///
/// The first and last region of `regions` are setup and teardown of the
/// shutter sequence and are skipped.
pub fn summarize_interior(regions: &[Region], traces: &EyeTraces) -> Vec<RegionSummary> {
    let interior = interior_regions(regions);
    debug!(
        "summarize_interior: {} of {} regions are interior",
        interior.len(),
        regions.len()
    );
    interior
        .iter()
        .enumerate()
        .map(|(i, region)| summarize(i + 1, region, traces))
        .collect()
}
