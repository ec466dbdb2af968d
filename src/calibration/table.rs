use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Measured pupil shift for one (camera angle, distance, eye angle) cell.
///
/// Older stores wrote the value as a string (`"12.3"`); both forms load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredDelta", into = "f64")]
pub struct DeltaX(pub f64);

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDelta {
    Number(f64),
    Text(String),
}

impl From<StoredDelta> for DeltaX {
    fn from(value: StoredDelta) -> Self {
        match value {
            StoredDelta::Number(v) => DeltaX(v),
            StoredDelta::Text(s) => DeltaX(s.trim().parse().unwrap_or(f64::NAN)),
        }
    }
}

impl From<DeltaX> for f64 {
    fn from(value: DeltaX) -> Self {
        value.0
    }
}

/// One training example for the offline model fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRow {
    pub camera_angle_deg: f64,
    pub distance_mm: f64,
    /// `|Δx|`, as the regression sees it.
    pub displacement_px: f64,
    pub eye_angle_deg: f64,
}

type EyeAngles = BTreeMap<String, DeltaX>;
type Distances = BTreeMap<String, EyeAngles>;

/// Nested x-axis calibration table:
/// camera angle (`{:.1}`) → distance (`{:.0}` mm) → eye angle (integer
/// degrees) → Δx (pixels, one decimal).
///
/// Keys are kept as strings in the formatting above so the table round-trips
/// with the stores the capture front-end writes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalibrationTable {
    entries: BTreeMap<String, Distances>,
}

pub fn camera_angle_key(camera_angle_deg: f64) -> String {
    format!("{camera_angle_deg:.1}")
}

pub fn distance_key(distance_mm: f64) -> String {
    format!("{distance_mm:.0}")
}

impl CalibrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stored measurements.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .flat_map(|d| d.values())
            .map(|e| e.len())
            .sum()
    }

    /// Stores a measurement, overwriting an existing one for the same cell.
    pub fn record(&mut self, camera_angle_deg: f64, distance_mm: f64, eye_angle_deg: i32, delta_x: f64) {
        let delta = (delta_x * 10.0).round() / 10.0;
        self.entries
            .entry(camera_angle_key(camera_angle_deg))
            .or_default()
            .entry(distance_key(distance_mm))
            .or_default()
            .insert(eye_angle_deg.to_string(), DeltaX(delta));
    }

    pub fn get(&self, camera_angle_deg: f64, distance_mm: f64, eye_angle_deg: i32) -> Option<f64> {
        self.entries
            .get(&camera_angle_key(camera_angle_deg))?
            .get(&distance_key(distance_mm))?
            .get(&eye_angle_deg.to_string())
            .map(|d| d.0)
    }

    pub fn camera_angles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Removes one camera angle with everything below it.
    pub fn remove_camera_angle(&mut self, camera_angle_deg: f64) -> bool {
        self.entries.remove(&camera_angle_key(camera_angle_deg)).is_some()
    }

    /// Removes one distance; a camera angle left without distances goes too.
    pub fn remove_distance(&mut self, camera_angle_deg: f64, distance_mm: f64) -> bool {
        let cam = camera_angle_key(camera_angle_deg);
        let Some(distances) = self.entries.get_mut(&cam) else {
            return false;
        };
        let removed = distances.remove(&distance_key(distance_mm)).is_some();
        if distances.is_empty() {
            self.entries.remove(&cam);
        }
        removed
    }

    /// Removes one measurement, pruning emptied distances and camera angles.
    pub fn remove_eye_angle(&mut self, camera_angle_deg: f64, distance_mm: f64, eye_angle_deg: i32) -> bool {
        let cam = camera_angle_key(camera_angle_deg);
        let dist = distance_key(distance_mm);
        let Some(distances) = self.entries.get_mut(&cam) else {
            return false;
        };
        let Some(angles) = distances.get_mut(&dist) else {
            return false;
        };
        let removed = angles.remove(&eye_angle_deg.to_string()).is_some();
        if angles.is_empty() {
            distances.remove(&dist);
        }
        if distances.is_empty() {
            self.entries.remove(&cam);
        }
        removed
    }

    /// Flattens the table into fit rows, sorted by camera angle, distance and
    /// eye angle. Cells whose key or value does not parse are skipped.
    pub fn training_rows(&self) -> Vec<TrainingRow> {
        let mut rows = Vec::with_capacity(self.len());
        for (cam, distances) in &self.entries {
            for (dist, angles) in distances {
                for (eye, delta) in angles {
                    let parsed = (cam.parse::<f64>(), dist.parse::<f64>(), eye.parse::<f64>());
                    match parsed {
                        (Ok(c), Ok(d), Ok(e)) if delta.0.is_finite() => rows.push(TrainingRow {
                            camera_angle_deg: c,
                            distance_mm: d,
                            displacement_px: delta.0.abs(),
                            eye_angle_deg: e,
                        }),
                        _ => warn!("skipping calibration cell {cam}/{dist}/{eye}"),
                    }
                }
            }
        }
        rows.sort_by(|a, b| {
            a.camera_angle_deg
                .total_cmp(&b.camera_angle_deg)
                .then(a.distance_mm.total_cmp(&b.distance_mm))
                .then(a.eye_angle_deg.total_cmp(&b.eye_angle_deg))
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_formats_keys_and_rounds_delta() {
        let mut table = CalibrationTable::new();
        table.record(34.62, 30.4, 10, -12.14);
        assert_eq!(table.get(34.6, 30.0, 10), Some(-12.1));
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["34.6"]["30"]["10"], -12.1);
    }

    #[test]
    fn removing_last_distance_drops_camera_angle() {
        let mut table = CalibrationTable::new();
        table.record(30.0, 30.0, 5, 4.0);
        table.record(30.0, 40.0, 5, 3.0);
        assert!(table.remove_distance(30.0, 30.0));
        assert_eq!(table.camera_angles().count(), 1);
        assert!(table.remove_distance(30.0, 40.0));
        assert!(table.is_empty());
        assert!(!table.remove_distance(30.0, 40.0));
    }

    #[test]
    fn removing_last_eye_angle_cascades() {
        let mut table = CalibrationTable::new();
        table.record(20.0, 35.0, 10, 8.0);
        assert!(table.remove_eye_angle(20.0, 35.0, 10));
        assert!(table.is_empty());
    }

    #[test]
    fn training_rows_use_absolute_delta_in_numeric_order() {
        let json = r#"{"34.6":{"30":{"10":"-12.1","5":6.0}},"9.0":{"100":{"15":"bad"}}}"#;
        let table: CalibrationTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 3);
        let rows = table.training_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].eye_angle_deg, 5.0);
        assert_eq!(rows[1].displacement_px, 12.1);
        assert_eq!(rows[1].camera_angle_deg, 34.6);
    }
}
