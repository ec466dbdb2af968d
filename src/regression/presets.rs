//! Models shipped with the device software.
//!
//! Both were fitted offline with ridge regression (alpha 0.1) on the x-axis
//! calibration table. They are not interchangeable: each coefficient vector
//! belongs to its own feature expansion.

use super::features::PolynomialDegree;
use super::model::RegressionModel;
use serde::{Deserialize, Serialize};

const QUADRATIC_COEFFICIENTS: [f64; 9] = [
    -2.2387824844363826,
    3.979322228739907,
    -0.7912247841309185,
    0.03231470827124965,
    0.003903178090166144,
    0.010904810365084418,
    -0.07413295152308078,
    0.03183824148301351,
    0.00037495198198095824,
];
const QUADRATIC_INTERCEPT: f64 = -18.30161180756047;

const CUBIC_COEFFICIENTS: [f64; 19] = [
    0.05254387061234375,
    -0.028742627008759188,
    -0.17877073760540407,
    -0.66683245240096,
    1.5382806906485866,
    -0.07544195012160597,
    -0.695946743790273,
    0.08995792712135837,
    0.0047060259149694535,
    0.009585340778036262,
    -0.008874311239509611,
    0.0009451311660494132,
    -0.017984396373082957,
    0.0008761458156192285,
    -9.395471777929276e-05,
    0.013372397837818562,
    -0.0015732458508927035,
    -5.19334223107604e-05,
    4.200015984722308e-06,
];
const CUBIC_INTERCEPT: f64 = -52.95494873092329;

/// Degree-2 model (84 measured samples interpolated to 732), used by the
/// printable report.
pub fn quadratic() -> RegressionModel {
    RegressionModel::from_validated(
        QUADRATIC_COEFFICIENTS.to_vec(),
        QUADRATIC_INTERCEPT,
        PolynomialDegree::Quadratic,
    )
}

/// Degree-3 model fitted on 66 measured samples.
pub fn cubic() -> RegressionModel {
    RegressionModel::from_validated(
        CUBIC_COEFFICIENTS.to_vec(),
        CUBIC_INTERCEPT,
        PolynomialDegree::Cubic,
    )
}

/// Named selection of a shipped model, as used in configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelPreset {
    #[default]
    Quadratic,
    Cubic,
}

impl ModelPreset {
    pub fn model(self) -> RegressionModel {
        match self {
            ModelPreset::Quadratic => quadratic(),
            ModelPreset::Cubic => cubic(),
        }
    }
}
