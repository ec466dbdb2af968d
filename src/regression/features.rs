use nalgebra::DVector;
use serde::Serialize;

/// Number of model inputs: camera angle, distance, displacement.
pub const INPUT_COUNT: usize = 3;

/// Degree of the polynomial feature expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum PolynomialDegree {
    Quadratic,
    Cubic,
}

impl PolynomialDegree {
    pub fn as_u8(self) -> u8 {
        match self {
            PolynomialDegree::Quadratic => 2,
            PolynomialDegree::Cubic => 3,
        }
    }

    /// Features produced for three inputs without a bias column.
    pub fn feature_count(self) -> usize {
        match self {
            PolynomialDegree::Quadratic => 9,
            PolynomialDegree::Cubic => 19,
        }
    }
}

impl TryFrom<u8> for PolynomialDegree {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(PolynomialDegree::Quadratic),
            3 => Ok(PolynomialDegree::Cubic),
            other => Err(other),
        }
    }
}

impl From<PolynomialDegree> for u8 {
    fn from(value: PolynomialDegree) -> Self {
        value.as_u8()
    }
}

/// Expands `x` into the monomials of degree 1 up to `degree`.
///
/// Order: the linear terms, then `x[i]·x[j]` for `i ≤ j`, then (cubic only)
/// `x[i]·x[j]·x[k]` for `i ≤ j ≤ k`, each in lexicographic index order. This
/// is the column order the shipped coefficient vectors were fitted with.
pub fn polynomial_features(degree: PolynomialDegree, x: [f64; INPUT_COUNT]) -> DVector<f64> {
    let mut features = Vec::with_capacity(degree.feature_count());
    features.extend_from_slice(&x);
    for i in 0..INPUT_COUNT {
        for j in i..INPUT_COUNT {
            features.push(x[i] * x[j]);
        }
    }
    if degree == PolynomialDegree::Cubic {
        for i in 0..INPUT_COUNT {
            for j in i..INPUT_COUNT {
                for k in j..INPUT_COUNT {
                    features.push(x[i] * x[j] * x[k]);
                }
            }
        }
    }
    DVector::from_vec(features)
}
