//! End-to-end analysis of one cover-test recording.
//!
//! Overview
//! - Truncates both eyes to the frames they share.
//! - Gap-fills and smooths the four coordinate traces.
//! - Once the recording is complete, segments single-eye occlusion regions
//!   from the shutter flags, summarises the interior ones with medians and
//!   pairs consecutive regions into exams.
//!
//! Modules
//! - [`params`] – configuration types used by the analyzer and CLI.
//! - `pipeline` – the [`DeviationAnalyzer`] implementation.

pub mod params;
mod pipeline;

pub use params::{AnalysisParams, CompletionGate};
pub use pipeline::{AnalysisResult, DeviationAnalyzer};
