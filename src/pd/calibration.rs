use serde::{Deserialize, Serialize};

/// Optical constant of the eye camera, `focal_length · image_width /
/// sensor_width` rounded to the value the device is calibrated with.
pub const CAMERA_OPTICAL_K: f64 = 410.0;

/// Camera-to-eye distance in millimetres from the limbus diameter, a
/// known-size reference on the eye (`K · limbus_mm / limbus_px`).
pub fn camera_distance_mm(limbus_mm: f64, limbus_px: f64) -> f64 {
    CAMERA_OPTICAL_K * limbus_mm / limbus_px
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CalibrationError {
    NonPositiveLimbus { limbus_mm: f64, limbus_px: f64 },
    NonFinite(&'static str),
}

impl std::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrationError::NonPositiveLimbus {
                limbus_mm,
                limbus_px,
            } => write!(
                f,
                "limbus diameter must be positive (mm={limbus_mm}, px={limbus_px})"
            ),
            CalibrationError::NonFinite(field) => write!(f, "{field} is not a finite number"),
        }
    }
}

impl std::error::Error for CalibrationError {}

/// Per-exam scalars the regression needs next to the measured displacement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationContext {
    pub camera_angle_deg: f64,
    pub distance_mm: f64,
    pub limbus_mm: f64,
    pub limbus_px: f64,
}

impl CalibrationContext {
    /// Derives the camera-to-eye distance from the limbus measurement.
    pub fn from_limbus(
        camera_angle_deg: f64,
        limbus_mm: f64,
        limbus_px: f64,
    ) -> Result<Self, CalibrationError> {
        if !limbus_mm.is_finite() {
            return Err(CalibrationError::NonFinite("limbus_mm"));
        }
        if !limbus_px.is_finite() {
            return Err(CalibrationError::NonFinite("limbus_px"));
        }
        if limbus_mm <= 0.0 || limbus_px <= 0.0 {
            return Err(CalibrationError::NonPositiveLimbus {
                limbus_mm,
                limbus_px,
            });
        }
        let ctx = Self {
            camera_angle_deg,
            distance_mm: camera_distance_mm(limbus_mm, limbus_px),
            limbus_mm,
            limbus_px,
        };
        ctx.check_finite()?;
        Ok(ctx)
    }

    /// Uses a measured distance instead of the limbus-derived one.
    pub fn with_distance(mut self, distance_mm: f64) -> Result<Self, CalibrationError> {
        self.distance_mm = distance_mm;
        self.check_finite()?;
        Ok(self)
    }

    /// Distance as fed to the regression: whole millimetres.
    pub fn model_distance_mm(&self) -> f64 {
        self.distance_mm.round()
    }

    fn check_finite(&self) -> Result<(), CalibrationError> {
        if !self.camera_angle_deg.is_finite() {
            return Err(CalibrationError::NonFinite("camera_angle_deg"));
        }
        if !self.distance_mm.is_finite() {
            return Err(CalibrationError::NonFinite("distance_mm"));
        }
        Ok(())
    }
}
