//! Angle regression: evaluates a pre-trained polynomial model mapping camera
//! angle, camera-to-eye distance and pupil displacement to a deviation angle.
//!
//! Fitting happens offline; this module only expands features and takes the
//! dot product with the fixed coefficients. See [`presets`] for the shipped
//! models and [`RegressionModel`] for loading one from JSON.

mod features;
mod model;
pub mod presets;

pub use features::{polynomial_features, PolynomialDegree, INPUT_COUNT};
pub use model::{ModelError, RegressionModel};
pub use presets::ModelPreset;
