use crate::analyzer::AnalysisParams;
use crate::io::load_model;
use crate::manual::ManualSlot;
use crate::pd::CalibrationContext;
use crate::regression::{ModelPreset, RegressionModel};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ReportToolConfig {
    /// Recording JSON, see [`crate::io::load_recording`].
    pub input: PathBuf,
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub analysis: AnalysisParams,
    /// Operator-picked frames for manual exams.
    #[serde(default)]
    pub manual: Vec<ManualFrameConfig>,
    #[serde(default)]
    pub output: ReportOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CalibrationConfig {
    pub camera_angle_deg: f64,
    /// Real limbus diameter of the patient in millimetres.
    pub limbus_mm: f64,
    /// Limbus diameter as measured on the eye image.
    pub limbus_px: f64,
    /// Measured camera-to-eye distance; derived from the limbus when absent.
    #[serde(default)]
    pub distance_mm: Option<f64>,
}

impl CalibrationConfig {
    pub fn to_context(&self) -> Result<CalibrationContext, String> {
        let ctx =
            CalibrationContext::from_limbus(self.camera_angle_deg, self.limbus_mm, self.limbus_px);
        let ctx = match self.distance_mm {
            Some(distance) => ctx.and_then(|c| c.with_distance(distance)),
            None => ctx,
        };
        ctx.map_err(|e| format!("Invalid calibration: {e}"))
    }
}

/// Regression model selection: `{"preset": "cubic"}`, `{"path": "model.json"}`
/// or an inline `{coefficients, intercept, degree}` literal.
#[derive(Debug, Deserialize)]
#[serde(try_from = "RawModelConfig")]
pub enum ModelConfig {
    Preset { preset: ModelPreset },
    Path { path: PathBuf },
    Inline(RegressionModel),
}

/// Anything that is not a preset or a path is taken as an inline literal and
/// validated separately, so a malformed model reports its own error.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawModelConfig {
    Preset { preset: ModelPreset },
    Path { path: PathBuf },
    Inline(serde_json::Value),
}

impl TryFrom<RawModelConfig> for ModelConfig {
    type Error = String;

    fn try_from(raw: RawModelConfig) -> Result<Self, Self::Error> {
        match raw {
            RawModelConfig::Preset { preset } => Ok(ModelConfig::Preset { preset }),
            RawModelConfig::Path { path } => Ok(ModelConfig::Path { path }),
            RawModelConfig::Inline(value) => serde_json::from_value(value)
                .map(ModelConfig::Inline)
                .map_err(|e| format!("Invalid inline model: {e}")),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig::Preset {
            preset: ModelPreset::default(),
        }
    }
}

impl ModelConfig {
    pub fn resolve(&self) -> Result<RegressionModel, String> {
        match self {
            ModelConfig::Preset { preset } => Ok(preset.model()),
            ModelConfig::Path { path } => load_model(path),
            ModelConfig::Inline(model) => Ok(model.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ManualFrameConfig {
    pub slot: ManualSlot,
    pub frame: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportOutputConfig {
    pub report_json: Option<PathBuf>,
    /// PNG chart of the four traces with occlusion regions shaded.
    pub debug_plot: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ReportToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
