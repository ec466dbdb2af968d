use super::types::{FrameState, Region, RegionType};
use log::{debug, warn};

/// Per-frame shutter states over the common prefix of both flag arrays.
pub fn frame_states(od_hidden: &[bool], os_hidden: &[bool]) -> Vec<FrameState> {
    od_hidden
        .iter()
        .zip(os_hidden)
        .map(|(&od, &os)| FrameState::classify(od, os))
        .collect()
}

/// Splits the recording into maximal single-eye occlusion regions.
///
/// Frames where both eyes are open or both covered close the open region
/// without starting a new one. A direct switch from one single-eye state to
/// the other closes the region and opens the next one on the same frame.
/// Flag arrays of unequal length are truncated to the shorter one.
pub fn segment_regions(od_hidden: &[bool], os_hidden: &[bool]) -> Vec<Region> {
    if od_hidden.len() != os_hidden.len() {
        warn!(
            "occlusion flags differ in length (od={}, os={}), truncating",
            od_hidden.len(),
            os_hidden.len()
        );
    }

    let mut regions = Vec::new();
    let mut open: Option<Region> = None;
    for (frame, state) in frame_states(od_hidden, os_hidden).into_iter().enumerate() {
        let kind = state.region_type();
        if let (Some(kind), Some(region)) = (kind, open.as_mut()) {
            if region.region_type == kind {
                region.end_frame = frame;
                continue;
            }
        }
        if let Some(done) = open.take() {
            regions.push(done);
        }
        open = kind.map(|kind| Region::new(kind, frame, frame));
    }
    if let Some(done) = open {
        regions.push(done);
    }

    debug!(
        "segment_regions: {} regions over {} frames",
        regions.len(),
        od_hidden.len().min(os_hidden.len())
    );
    regions
}

/// Drops the first and last region, which bracket the exam as setup and
/// teardown of the shutter sequence. Fewer than three regions leave nothing.
pub fn interior_regions(regions: &[Region]) -> &[Region] {
    if regions.len() <= 2 {
        return &[];
    }
    &regions[1..regions.len() - 1]
}

/// Number of frames covered by each region type, for diagnostics.
pub fn coverage(regions: &[Region]) -> (usize, usize) {
    regions.iter().fold((0, 0), |(od, os), r| match r.region_type {
        RegionType::OdHideOsShow => (od + r.len(), os),
        RegionType::OsHideOdShow => (od, os + r.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(pattern: &str) -> (Vec<bool>, Vec<bool>) {
        // 'd' = OD hidden, 's' = OS hidden, 'b' = both hidden, '.' = both open
        pattern
            .chars()
            .map(|c| match c {
                'd' => (true, false),
                's' => (false, true),
                'b' => (true, true),
                _ => (false, false),
            })
            .unzip()
    }

    #[test]
    fn runs_become_regions() {
        let (od, os) = flags("..ddd..sss.");
        let regions = segment_regions(&od, &os);
        assert_eq!(
            regions,
            vec![
                Region::new(RegionType::OdHideOsShow, 2, 4),
                Region::new(RegionType::OsHideOdShow, 7, 9),
            ]
        );
    }

    #[test]
    fn direct_switch_splits_on_the_same_frame() {
        let (od, os) = flags("ddss");
        let regions = segment_regions(&od, &os);
        assert_eq!(
            regions,
            vec![
                Region::new(RegionType::OdHideOsShow, 0, 1),
                Region::new(RegionType::OsHideOdShow, 2, 3),
            ]
        );
    }

    #[test]
    fn both_hidden_closes_region() {
        let (od, os) = flags("ddbdd");
        let regions = segment_regions(&od, &os);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].end_frame, 1);
        assert_eq!(regions[1].start_frame, 3);
    }

    #[test]
    fn open_region_is_emitted_at_end() {
        let (od, os) = flags(".sss");
        assert_eq!(
            segment_regions(&od, &os),
            vec![Region::new(RegionType::OsHideOdShow, 1, 3)]
        );
    }

    #[test]
    fn no_occlusion_yields_nothing() {
        let (od, os) = flags("..bb..");
        assert!(segment_regions(&od, &os).is_empty());
        assert!(segment_regions(&[], &[]).is_empty());
    }

    #[test]
    fn unequal_lengths_truncate() {
        let od = vec![true, true, true, true];
        let os = vec![false, false];
        assert_eq!(
            segment_regions(&od, &os),
            vec![Region::new(RegionType::OdHideOsShow, 0, 1)]
        );
    }

    #[test]
    fn regions_are_exhaustive_and_disjoint() {
        let (od, os) = flags("..ddsb.ssdd..bsd.dd.s");
        let states = frame_states(&od, &os);
        let regions = segment_regions(&od, &os);

        for pair in regions.windows(2) {
            assert!(pair[0].end_frame < pair[1].start_frame);
        }
        let covered: usize = regions.iter().map(Region::len).sum();
        assert!(covered <= states.len());

        let mut rebuilt = vec![None; states.len()];
        for r in &regions {
            for f in r.frames() {
                assert_eq!(states[f], r.region_type.frame_state());
                rebuilt[f] = Some(r.region_type);
            }
        }
        for (f, slot) in rebuilt.iter().enumerate() {
            if slot.is_none() {
                assert!(matches!(states[f], FrameState::BothShow | FrameState::BothHide));
            }
        }
    }

    #[test]
    fn interior_drops_first_and_last() {
        let regions: Vec<Region> = (0..5)
            .map(|i| Region::new(RegionType::OdHideOsShow, i * 10, i * 10 + 3))
            .collect();
        let inner = interior_regions(&regions);
        assert_eq!(inner.len(), 3);
        assert_eq!(inner[0].start_frame, 10);
        assert_eq!(inner[2].start_frame, 30);
        assert!(interior_regions(&regions[..2]).is_empty());
    }

    #[test]
    fn coverage_counts_frames_per_type() {
        let (od, os) = flags("dd.sss");
        assert_eq!(coverage(&segment_regions(&od, &os)), (2, 3));
    }
}
