use crate::types::Eye;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Shutter state of one frame across both eyes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameState {
    BothShow,
    BothHide,
    OdHideOsShow,
    OsHideOdShow,
}

impl FrameState {
    pub fn classify(od_hidden: bool, os_hidden: bool) -> Self {
        match (od_hidden, os_hidden) {
            (false, false) => FrameState::BothShow,
            (true, true) => FrameState::BothHide,
            (true, false) => FrameState::OdHideOsShow,
            (false, true) => FrameState::OsHideOdShow,
        }
    }

    /// Single-eye occlusion states map onto a region type.
    pub fn region_type(self) -> Option<RegionType> {
        match self {
            FrameState::OdHideOsShow => Some(RegionType::OdHideOsShow),
            FrameState::OsHideOdShow => Some(RegionType::OsHideOdShow),
            FrameState::BothShow | FrameState::BothHide => None,
        }
    }
}

/// Which eye the shutter covered throughout a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionType {
    OdHideOsShow,
    OsHideOdShow,
}

impl RegionType {
    pub fn hidden_eye(self) -> Eye {
        match self {
            RegionType::OdHideOsShow => Eye::Od,
            RegionType::OsHideOdShow => Eye::Os,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegionType::OdHideOsShow => "OD hide, OS show",
            RegionType::OsHideOdShow => "OD show, OS hide",
        }
    }

    pub fn frame_state(self) -> FrameState {
        match self {
            RegionType::OdHideOsShow => FrameState::OdHideOsShow,
            RegionType::OsHideOdShow => FrameState::OsHideOdShow,
        }
    }
}

/// Maximal run of frames in one single-eye occlusion state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub region_type: RegionType,
    pub start_frame: usize,
    /// Inclusive.
    pub end_frame: usize,
}

impl Region {
    pub fn new(region_type: RegionType, start_frame: usize, end_frame: usize) -> Self {
        Self {
            region_type,
            start_frame,
            end_frame,
        }
    }

    pub fn len(&self) -> usize {
        self.end_frame - self.start_frame + 1
    }

    pub fn frames(&self) -> RangeInclusive<usize> {
        self.start_frame..=self.end_frame
    }
}
