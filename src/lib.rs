#![doc = include_str!("../README.md")]

// Pipeline stages
pub mod analyzer;
pub mod diagnostics;
pub mod recording;
pub mod regions;
pub mod summary;
pub mod trace;
pub mod types;

// Angle inference and reporting
pub mod angle;
pub mod pd;
pub mod regression;
pub mod report;

// Operator-facing helpers and tooling
pub mod calibration;
pub mod config;
pub mod io;
pub mod manual;

// --- High-level re-exports -------------------------------------------------

// Main entry points: analyzer + results.
pub use crate::analyzer::{AnalysisParams, AnalysisResult, CompletionGate, DeviationAnalyzer};
pub use crate::recording::Recording;
pub use crate::types::{Axis, Coordinate, Eye, EyeMessage, Sample};

// Diagnostics returned next to the result.
pub use crate::diagnostics::{AnalysisReport, PipelineTrace};

// Deviation angles and the printable report.
pub use crate::pd::{compute_pd, CalibrationContext, Direction, PdMeasurement, Unavailable};
pub use crate::regression::{ModelError, ModelPreset, RegressionModel};
pub use crate::report::ExamReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use ocular_deviation::prelude::*;
///
/// # fn main() {
/// let od: Vec<Sample> = (0..120).map(|f| Sample::new(f, 100.0, 50.0, (40..80).contains(&f))).collect();
/// let os: Vec<Sample> = (0..120).map(|f| Sample::new(f, 200.0, 50.0, f < 40 || f >= 80)).collect();
/// let recording = Recording::from_samples(&od, &os);
///
/// let result = DeviationAnalyzer::new(AnalysisParams::default()).analyze(&recording);
/// let calib = CalibrationContext::from_limbus(34.6, 11.7, 160.0).unwrap();
/// let report = ExamReport::build(&result.exams, &Default::default(), &calib, &ModelPreset::Quadratic.model());
/// println!("{}", report.render_text());
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        AnalysisParams, CalibrationContext, DeviationAnalyzer, ExamReport, ModelPreset, Recording,
        Sample,
    };
}
