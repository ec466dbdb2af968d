//! Diagnostics data model returned next to the analysis result.
//!
//! `AnalysisReport` bundles the [`AnalysisResult`](crate::analyzer::AnalysisResult)
//! with a `PipelineTrace` describing the input, per-trace preprocessing,
//! segmentation and stage timings.

pub mod pipeline;
pub mod timing;

pub use pipeline::{AnalysisReport, InputDescriptor, PipelineTrace, SegmentationStage, TraceReport};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
