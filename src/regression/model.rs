use super::features::{polynomial_features, PolynomialDegree};
use crate::angle::round_to_tenth;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Reasons a regression model literal is rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    UnsupportedDegree(u8),
    CoefficientCount {
        degree: u8,
        expected: usize,
        found: usize,
    },
    NonFiniteParameter,
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::UnsupportedDegree(degree) => {
                write!(f, "unsupported polynomial degree {degree} (expected 2 or 3)")
            }
            ModelError::CoefficientCount {
                degree,
                expected,
                found,
            } => write!(
                f,
                "degree {degree} model needs {expected} coefficients, found {found}"
            ),
            ModelError::NonFiniteParameter => {
                write!(f, "model coefficients and intercept must be finite")
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// Wire form of a model: `{coefficients, intercept, degree}`.
///
/// Extra keys written by the fitting script (`feature_names`, `train_r2`,
/// ...) are ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct ModelLiteral {
    coefficients: Vec<f64>,
    intercept: f64,
    degree: u8,
}

/// Pre-trained polynomial regression from `(camera angle, distance,
/// |displacement|)` to the ocular deviation angle in degrees.
///
/// The coefficient count is checked against the degree when the model is
/// built, so evaluation never sees a mismatched model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelLiteral", into = "ModelLiteral")]
pub struct RegressionModel {
    coefficients: DVector<f64>,
    intercept: f64,
    degree: PolynomialDegree,
}

impl RegressionModel {
    pub fn new(
        coefficients: Vec<f64>,
        intercept: f64,
        degree: PolynomialDegree,
    ) -> Result<Self, ModelError> {
        let expected = degree.feature_count();
        if coefficients.len() != expected {
            return Err(ModelError::CoefficientCount {
                degree: degree.as_u8(),
                expected,
                found: coefficients.len(),
            });
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::NonFiniteParameter);
        }
        Ok(Self::from_validated(coefficients, intercept, degree))
    }

    /// Builds a model whose shape is known to be valid (shipped presets).
    pub(crate) fn from_validated(
        coefficients: Vec<f64>,
        intercept: f64,
        degree: PolynomialDegree,
    ) -> Self {
        Self {
            coefficients: DVector::from_vec(coefficients),
            intercept,
            degree,
        }
    }

    pub fn degree(&self) -> PolynomialDegree {
        self.degree
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        self.coefficients.as_slice()
    }

    /// Unrounded prediction in degrees.
    ///
    /// The displacement enters as its absolute value; the sign is recovered
    /// separately when the clinical direction is classified.
    pub fn evaluate(&self, camera_angle_deg: f64, distance_mm: f64, displacement_px: f64) -> f64 {
        let features = polynomial_features(
            self.degree,
            [camera_angle_deg, distance_mm, displacement_px.abs()],
        );
        self.intercept + self.coefficients.dot(&features)
    }

    /// Prediction rounded to one decimal, as shown to clinicians and used for
    /// the prism-diopter conversion.
    pub fn predict(&self, camera_angle_deg: f64, distance_mm: f64, displacement_px: f64) -> f64 {
        round_to_tenth(self.evaluate(camera_angle_deg, distance_mm, displacement_px))
    }
}

impl TryFrom<ModelLiteral> for RegressionModel {
    type Error = ModelError;

    fn try_from(value: ModelLiteral) -> Result<Self, Self::Error> {
        let degree =
            PolynomialDegree::try_from(value.degree).map_err(ModelError::UnsupportedDegree)?;
        RegressionModel::new(value.coefficients, value.intercept, degree)
    }
}

impl From<RegressionModel> for ModelLiteral {
    fn from(value: RegressionModel) -> Self {
        ModelLiteral {
            coefficients: value.coefficients.as_slice().to_vec(),
            intercept: value.intercept,
            degree: value.degree.as_u8(),
        }
    }
}
