//! Prism-diopter post-processing.
//!
//! Turns a pair of same-axis anchor values into a signed displacement, runs
//! the angle regression on its magnitude and classifies the clinical
//! direction from its sign.

pub mod calibration;

pub use calibration::{camera_distance_mm, CalibrationContext, CalibrationError, CAMERA_OPTICAL_K};

use crate::angle::degrees_to_prism_diopters;
use crate::regression::RegressionModel;
use crate::types::{Axis, Eye};
use serde::Serialize;

/// Clinical direction of a deviation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Inward, horizontal.
    Eso,
    /// Outward, horizontal.
    Exo,
    /// Upward, vertical.
    Hyper,
    /// Downward, vertical.
    Hypo,
}

impl Direction {
    /// Classifies the sign of `difference = first - second`.
    ///
    /// The convention depends on the axis only, not on the eye.
    pub fn classify(axis: Axis, difference: f64) -> Self {
        match axis {
            Axis::X if difference > 0.0 => Direction::Eso,
            Axis::X => Direction::Exo,
            Axis::Y if difference > 0.0 => Direction::Hypo,
            Axis::Y => Direction::Hyper,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Eso => "ESO",
            Direction::Exo => "EXO",
            Direction::Hyper => "HYPER",
            Direction::Hypo => "HYPO",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a PD cell could not be computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unavailable {
    /// One of the two anchors has no median.
    MissingPoint,
    /// The anchors differ by a non-finite amount.
    NonFiniteDisplacement,
    /// The regression produced NaN or infinity.
    NonFiniteAngle,
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unavailable::MissingPoint => write!(f, "measurement point unavailable"),
            Unavailable::NonFiniteDisplacement => write!(f, "displacement is not finite"),
            Unavailable::NonFiniteAngle => write!(f, "regression produced a non-finite angle"),
        }
    }
}

impl std::error::Error for Unavailable {}

/// One computed report cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdMeasurement {
    pub side: Eye,
    pub axis: Axis,
    /// Deviation angle, already rounded to one decimal.
    pub degrees: f64,
    pub pd_value: f64,
    pub direction: Direction,
    /// Signed `first - second` in pixels.
    pub difference_px: f64,
}

impl std::fmt::Display for PdMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1}° / {:.1} {}",
            self.degrees, self.pd_value, self.direction
        )
    }
}

/// Computes the deviation for one exam, axis and eye.
///
/// `points` are the same-axis anchors before and after the shutter switched.
/// Missing anchors and non-finite intermediate values yield
/// [`Unavailable`]; nothing is ever coerced to zero.
pub fn compute_pd(
    points: [Option<f64>; 2],
    axis: Axis,
    side: Eye,
    calib: &CalibrationContext,
    model: &RegressionModel,
) -> Result<PdMeasurement, Unavailable> {
    let [Some(first), Some(second)] = points else {
        return Err(Unavailable::MissingPoint);
    };
    let difference_px = first - second;
    if !difference_px.is_finite() {
        return Err(Unavailable::NonFiniteDisplacement);
    }
    let degrees = model.predict(
        calib.camera_angle_deg,
        calib.model_distance_mm(),
        difference_px.abs(),
    );
    if !degrees.is_finite() {
        return Err(Unavailable::NonFiniteAngle);
    }
    Ok(PdMeasurement {
        side,
        axis,
        degrees,
        pd_value: degrees_to_prism_diopters(degrees),
        direction: Direction::classify(axis, difference_px),
        difference_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::{presets, PolynomialDegree};

    fn calib() -> CalibrationContext {
        CalibrationContext {
            camera_angle_deg: 34.6,
            distance_mm: 29.8,
            limbus_mm: 11.7,
            limbus_px: 161.0,
        }
    }

    #[test]
    fn horizontal_direction_follows_sign() {
        let model = presets::quadratic();
        let eso = compute_pd([Some(10.0), Some(5.0)], Axis::X, Eye::Od, &calib(), &model).unwrap();
        assert_eq!(eso.direction, Direction::Eso);
        assert_eq!(eso.difference_px, 5.0);
        let exo = compute_pd([Some(5.0), Some(10.0)], Axis::X, Eye::Os, &calib(), &model).unwrap();
        assert_eq!(exo.direction, Direction::Exo);
        assert_eq!(eso.degrees, exo.degrees);
    }

    #[test]
    fn vertical_direction_follows_sign() {
        let model = presets::quadratic();
        let hypo = compute_pd([Some(10.0), Some(5.0)], Axis::Y, Eye::Od, &calib(), &model).unwrap();
        assert_eq!(hypo.direction, Direction::Hypo);
        let hyper = compute_pd([Some(5.0), Some(10.0)], Axis::Y, Eye::Od, &calib(), &model).unwrap();
        assert_eq!(hyper.direction, Direction::Hyper);
    }

    #[test]
    fn zero_difference_is_exo() {
        assert_eq!(Direction::classify(Axis::X, 0.0), Direction::Exo);
        assert_eq!(Direction::classify(Axis::Y, 0.0), Direction::Hyper);
    }

    #[test]
    fn distance_is_rounded_before_prediction() {
        let model = presets::quadratic();
        let m = compute_pd([Some(112.13), Some(100.0)], Axis::X, Eye::Od, &calib(), &model).unwrap();
        assert_eq!(m.degrees, 6.3);
        assert!((m.pd_value - degrees_to_prism_diopters(6.3)).abs() < 1e-12);
        assert_eq!(m.to_string(), "6.3° / 11.0 ESO");
    }

    #[test]
    fn missing_point_is_unavailable() {
        let model = presets::quadratic();
        assert_eq!(
            compute_pd([None, Some(5.0)], Axis::X, Eye::Od, &calib(), &model),
            Err(Unavailable::MissingPoint)
        );
        assert_eq!(
            compute_pd([Some(f64::NAN), Some(5.0)], Axis::X, Eye::Od, &calib(), &model),
            Err(Unavailable::NonFiniteDisplacement)
        );
    }

    #[test]
    fn overflowing_regression_is_unavailable() {
        let mut coefficients = vec![0.0; 9];
        coefficients[8] = 1e300;
        let model = RegressionModel::new(coefficients, 0.0, PolynomialDegree::Quadratic).unwrap();
        assert_eq!(
            compute_pd([Some(1e10), Some(0.0)], Axis::X, Eye::Od, &calib(), &model),
            Err(Unavailable::NonFiniteAngle)
        );
    }
}
