//! Analyzer pipeline driving a recording through every stage.
//!
//! Typical usage:
//! ```no_run
//! use ocular_deviation::{AnalysisParams, DeviationAnalyzer, Recording};
//!
//! # fn example(recording: Recording) {
//! let analyzer = DeviationAnalyzer::new(AnalysisParams::default());
//! let report = analyzer.analyze_with_diagnostics(&recording);
//! for summary in &report.result.summaries {
//!     println!("region {}: {:?}", summary.region_number, summary.frame_range);
//! }
//! # }
//! ```
use super::params::AnalysisParams;
use crate::diagnostics::{
    elapsed_ms, AnalysisReport, InputDescriptor, PipelineTrace, SegmentationStage, TimingBreakdown,
    TraceReport,
};
use crate::recording::Recording;
use crate::regions::{coverage, segment_regions, Region};
use crate::summary::{pair_regions_into_exams, summarize_interior, Exam, RegionSummary};
use crate::trace::{preprocess, EyeTraces};
use crate::types::{Axis, Eye};
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Everything the report layer consumes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Aligned length of the recording the traces were computed over.
    pub frame_count: usize,
    pub traces: EyeTraces,
    /// All single-eye occlusion regions, setup and teardown included.
    pub regions: Vec<Region>,
    /// Interior regions only, numbered from 1.
    pub summaries: Vec<RegionSummary>,
    pub exams: Vec<Exam>,
}

/// Runs trace preprocessing, segmentation, summarisation and exam pairing.
///
/// The analyzer keeps no state between calls, so a growing live recording
/// can simply be re-analysed after every append.
#[derive(Clone, Debug, Default)]
pub struct DeviationAnalyzer {
    params: AnalysisParams,
}

impl DeviationAnalyzer {
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Whether the recording is long enough for region analysis.
    pub fn is_ready(&self, recording: &Recording) -> bool {
        self.params
            .completion
            .is_complete(recording.aligned_len())
    }

    pub fn analyze(&self, recording: &Recording) -> AnalysisResult {
        self.analyze_with_diagnostics(recording).result
    }

    pub fn analyze_with_diagnostics(&self, recording: &Recording) -> AnalysisReport {
        let total_start = Instant::now();
        let frame_count = recording.aligned_len();
        let complete = self.is_ready(recording);
        debug!(
            "DeviationAnalyzer::analyze od={} os={} aligned={} complete={}",
            recording.od.len(),
            recording.os.len(),
            frame_count,
            complete
        );

        let trace_start = Instant::now();
        let mut traces = EyeTraces::default();
        let mut trace_reports = Vec::with_capacity(4);
        for eye in Eye::BOTH {
            let series = recording.series(eye);
            for axis in Axis::BOTH {
                let raw = &series.axis(axis)[..frame_count];
                let prepared = preprocess(raw, &self.params.trace);
                trace_reports.push(TraceReport {
                    eye,
                    axis,
                    stats: prepared.stats,
                });
                traces.insert(eye, axis, prepared);
            }
        }
        let trace_ms = elapsed_ms(trace_start);

        let mut timings = TimingBreakdown::default();
        timings.push("trace", trace_ms);

        let mut result = AnalysisResult {
            frame_count,
            traces,
            ..Default::default()
        };
        let mut segmentation = None;

        if complete {
            let seg_start = Instant::now();
            let od_hidden = &recording.od.hidden[..frame_count];
            let os_hidden = &recording.os.hidden[..frame_count];
            result.regions = segment_regions(od_hidden, os_hidden);
            timings.push("segmentation", elapsed_ms(seg_start));

            let summary_start = Instant::now();
            result.summaries = summarize_interior(&result.regions, &result.traces);
            result.exams = pair_regions_into_exams(&result.summaries);
            timings.push("summary", elapsed_ms(summary_start));

            let (od_hidden_frames, os_hidden_frames) = coverage(&result.regions);
            segmentation = Some(SegmentationStage {
                regions_found: result.regions.len(),
                interior_regions: result.summaries.len(),
                od_hidden_frames,
                os_hidden_frames,
                exams: result.exams.len(),
                unpaired_region: result.summaries.len() % 2 == 1,
            });
            debug!(
                "DeviationAnalyzer::analyze regions={} interior={} exams={}",
                result.regions.len(),
                result.summaries.len(),
                result.exams.len()
            );
        } else {
            debug!(
                "DeviationAnalyzer::analyze waiting for {} frames before segmenting",
                self.params.completion.max_frames
            );
        }

        timings.total_ms = elapsed_ms(total_start);
        AnalysisReport {
            result,
            trace: PipelineTrace {
                input: InputDescriptor {
                    od_frames: recording.od.len(),
                    os_frames: recording.os.len(),
                    aligned_frames: frame_count,
                    complete,
                },
                timings,
                traces: trace_reports,
                segmentation,
            },
        }
    }
}
