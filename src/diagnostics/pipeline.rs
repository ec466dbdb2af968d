use crate::analyzer::AnalysisResult;
use crate::diagnostics::TimingBreakdown;
use crate::trace::TraceStats;
use crate::types::{Axis, Eye};
use serde::Serialize;

/// Result produced by
/// [`DeviationAnalyzer::analyze_with_diagnostics`](crate::DeviationAnalyzer).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub trace: PipelineTrace,
}

/// What the analyzer did on the way to its result.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub traces: Vec<TraceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segmentation: Option<SegmentationStage>,
}

impl PipelineTrace {
    pub fn trace_stats(&self, eye: Eye, axis: Axis) -> Option<&TraceStats> {
        self.traces
            .iter()
            .find(|t| t.eye == eye && t.axis == axis)
            .map(|t| &t.stats)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub od_frames: usize,
    pub os_frames: usize,
    /// Frames both eyes cover; everything downstream works on this prefix.
    pub aligned_frames: usize,
    /// Whether the completion gate let region analysis run.
    pub complete: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceReport {
    pub eye: Eye,
    pub axis: Axis,
    pub stats: TraceStats,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationStage {
    pub regions_found: usize,
    /// Regions kept after dropping the setup and teardown regions.
    pub interior_regions: usize,
    pub od_hidden_frames: usize,
    pub os_hidden_frames: usize,
    pub exams: usize,
    /// An odd interior count leaves the last region without a partner.
    pub unpaired_region: bool,
}
