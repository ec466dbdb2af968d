use super::{EyeMedians, RegionSummary};
use crate::types::{Axis, Eye};
use log::warn;
use serde::{Deserialize, Serialize};

/// Where the two anchors of an exam came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamSource {
    /// Two consecutive interior occlusion regions.
    Automatic,
    /// Two frames picked by the operator.
    Manual,
}

/// One cover-test measurement: the fixation anchor before and after the
/// shutter switched eyes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    /// 1-based exam number as printed on the report.
    pub number: usize,
    pub source: ExamSource,
    pub first: EyeMedians,
    pub second: EyeMedians,
}

impl Exam {
    /// The two same-axis values the displacement is measured between.
    pub fn points(&self, eye: Eye, axis: Axis) -> [Option<f64>; 2] {
        [self.first.value(eye, axis), self.second.value(eye, axis)]
    }
}

/// Groups consecutive region summaries into exams: regions 1 and 2 form the
/// first exam, 3 and 4 the second, and so on. A trailing unpaired region is
/// left out.
pub fn pair_regions_into_exams(summaries: &[RegionSummary]) -> Vec<Exam> {
    if summaries.len() % 2 == 1 {
        warn!(
            "region {} has no partner and is left out of the exams",
            summaries.len()
        );
    }
    summaries
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| Exam {
            number: i + 1,
            source: ExamSource::Automatic,
            first: pair[0].medians,
            second: pair[1].medians,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::RegionType;
    use crate::summary::MedianSample;

    fn summary(number: usize, od_x: f64) -> RegionSummary {
        RegionSummary {
            region_number: number,
            region_type: if number % 2 == 1 {
                RegionType::OsHideOdShow
            } else {
                RegionType::OdHideOsShow
            },
            frame_range: [number * 10, number * 10 + 5],
            frame_count: 6,
            medians: EyeMedians {
                od_x: Some(MedianSample {
                    value: od_x,
                    frame: number * 10 + 2,
                }),
                ..Default::default()
            },
        }
    }

    #[test]
    fn consecutive_regions_form_exams() {
        let summaries: Vec<_> = (1..=6).map(|n| summary(n, n as f64)).collect();
        let exams = pair_regions_into_exams(&summaries);
        assert_eq!(exams.len(), 3);
        assert_eq!(exams[0].number, 1);
        assert_eq!(exams[0].points(Eye::Od, Axis::X), [Some(1.0), Some(2.0)]);
        assert_eq!(exams[2].points(Eye::Od, Axis::X), [Some(5.0), Some(6.0)]);
        assert_eq!(exams[2].points(Eye::Os, Axis::Y), [None, None]);
        assert!(exams.iter().all(|e| e.source == ExamSource::Automatic));
    }

    #[test]
    fn odd_trailing_region_is_dropped() {
        let summaries: Vec<_> = (1..=3).map(|n| summary(n, 0.0)).collect();
        assert_eq!(pair_regions_into_exams(&summaries).len(), 1);
        assert!(pair_regions_into_exams(&summaries[..1]).is_empty());
    }
}
