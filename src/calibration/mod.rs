//! X-axis calibration measurements and their storage.
//!
//! Each measurement records the pupil shift observed when the patient fixates
//! a target at a known eye angle. The table is the training set of the
//! shipped regression models.

mod repository;
mod table;

pub use repository::{CalibrationRepository, JsonFileRepository, MemoryRepository, StoreError};
pub use table::{camera_angle_key, distance_key, CalibrationTable, DeltaX, TrainingRow};
