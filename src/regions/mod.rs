//! Occlusion region segmentation.
//!
//! During an alternating cover test the shutter glasses block one eye at a
//! time. Each frame is classified from the two `isHide` flags, and runs of the
//! same single-eye state become [`Region`]s. Regions come out in ascending
//! frame order, never overlap, and are maximal.

mod segmenter;
mod types;

pub use segmenter::{coverage, frame_states, interior_regions, segment_regions};
pub use types::{FrameState, Region, RegionType};
