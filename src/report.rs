//! Printable exam table: one row per exam, one PD cell per eye and axis.

use crate::manual::ManualPointSet;
use crate::pd::{compute_pd, CalibrationContext, PdMeasurement, Unavailable};
use crate::regression::RegressionModel;
use crate::summary::{Exam, ExamSource};
use crate::types::{Axis, Eye};
use log::{debug, warn};
use serde::Serialize;
use std::fmt::Write as _;

/// A report cell; unavailable cells render as `-`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PdCell {
    Measured(PdMeasurement),
    Unavailable { reason: String },
}

impl PdCell {
    pub fn measurement(&self) -> Option<&PdMeasurement> {
        match self {
            PdCell::Measured(m) => Some(m),
            PdCell::Unavailable { .. } => None,
        }
    }
}

impl From<Result<PdMeasurement, Unavailable>> for PdCell {
    fn from(value: Result<PdMeasurement, Unavailable>) -> Self {
        match value {
            Ok(m) => PdCell::Measured(m),
            Err(reason) => PdCell::Unavailable {
                reason: reason.to_string(),
            },
        }
    }
}

impl std::fmt::Display for PdCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdCell::Measured(m) => write!(f, "{m}"),
            PdCell::Unavailable { .. } => f.write_str("-"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRow {
    pub number: usize,
    pub source: ExamSource,
    pub od_x: PdCell,
    pub od_y: PdCell,
    pub os_x: PdCell,
    pub os_y: PdCell,
}

impl ExamRow {
    pub fn compute(exam: &Exam, calib: &CalibrationContext, model: &RegressionModel) -> Self {
        let cell = |eye, axis| -> PdCell {
            let result = compute_pd(exam.points(eye, axis), axis, eye, calib, model);
            if let Err(reason) = &result {
                debug!("exam {} {eye} {axis}: {reason}", exam.number);
            }
            result.into()
        };
        Self {
            number: exam.number,
            source: exam.source,
            od_x: cell(Eye::Od, Axis::X),
            od_y: cell(Eye::Od, Axis::Y),
            os_x: cell(Eye::Os, Axis::X),
            os_y: cell(Eye::Os, Axis::Y),
        }
    }

    pub fn cell(&self, eye: Eye, axis: Axis) -> &PdCell {
        match (eye, axis) {
            (Eye::Od, Axis::X) => &self.od_x,
            (Eye::Od, Axis::Y) => &self.od_y,
            (Eye::Os, Axis::X) => &self.os_x,
            (Eye::Os, Axis::Y) => &self.os_y,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamReport {
    pub calibration: CalibrationContext,
    pub rows: Vec<ExamRow>,
}

impl ExamReport {
    /// Computes every cell for the automatic exams followed by the manual
    /// ones, which are numbered on from the last automatic exam.
    pub fn build(
        exams: &[Exam],
        manual: &ManualPointSet,
        calib: &CalibrationContext,
        model: &RegressionModel,
    ) -> Self {
        let next = exams.iter().map(|e| e.number).max().unwrap_or(0) + 1;
        let manual_exams = manual.exams(next);
        let rows: Vec<ExamRow> = exams
            .iter()
            .chain(manual_exams.iter())
            .map(|exam| ExamRow::compute(exam, calib, model))
            .collect();
        let unavailable = rows
            .iter()
            .flat_map(|r| [&r.od_x, &r.od_y, &r.os_x, &r.os_y])
            .filter(|c| c.measurement().is_none())
            .count();
        if unavailable > 0 {
            warn!(
                "{unavailable} of {} report cells are unavailable",
                rows.len() * 4
            );
        }
        Self {
            calibration: *calib,
            rows,
        }
    }

    /// Plain-text table as printed by the report tool.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "camera angle {:.1}°, distance {:.0} mm",
            self.calibration.camera_angle_deg,
            self.calibration.model_distance_mm()
        );
        let _ = writeln!(
            out,
            "{:<16} {:>24} {:>24} {:>24} {:>24}",
            "exam", "OD horizontal", "OD vertical", "OS horizontal", "OS vertical"
        );
        for row in &self.rows {
            let label = match row.source {
                ExamSource::Automatic => format!("{} exam", ordinal(row.number)),
                ExamSource::Manual => format!("{} (manual)", ordinal(row.number)),
            };
            let _ = writeln!(
                out,
                "{:<16} {:>24} {:>24} {:>24} {:>24}",
                label,
                row.od_x.to_string(),
                row.od_y.to_string(),
                row.os_x.to_string(),
                row.os_y.to_string()
            );
        }
        out
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, `12th`, `13th`, `21st`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manual::{ManualPoint, ManualSlot};
    use crate::regression::presets;
    use crate::summary::{EyeMedians, MedianSample};

    fn calib() -> CalibrationContext {
        CalibrationContext {
            camera_angle_deg: 34.6,
            distance_mm: 30.2,
            limbus_mm: 11.7,
            limbus_px: 158.8,
        }
    }

    fn medians(od_x: f64) -> EyeMedians {
        EyeMedians {
            od_x: Some(MedianSample {
                value: od_x,
                frame: 0,
            }),
            os_x: Some(MedianSample {
                value: 100.0,
                frame: 0,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn missing_medians_render_as_dash() {
        let exam = Exam {
            number: 1,
            source: ExamSource::Automatic,
            first: medians(112.13),
            second: medians(100.0),
        };
        let report = ExamReport::build(&[exam], &ManualPointSet::new(), &calib(), &presets::quadratic());
        let row = &report.rows[0];
        assert_eq!(row.od_x.to_string(), "6.3° / 11.0 ESO");
        assert_eq!(row.os_x.measurement().map(|m| m.degrees), Some(presets::quadratic().predict(34.6, 30.0, 0.0)));
        assert_eq!(row.od_y.to_string(), "-");
        assert!(matches!(row.os_y, PdCell::Unavailable { .. }));

        let text = report.render_text();
        assert!(text.contains("1st exam"));
        assert!(text.contains("6.3° / 11.0 ESO"));
    }

    #[test]
    fn manual_exams_follow_automatic_ones() {
        let auto = Exam {
            number: 3,
            source: ExamSource::Automatic,
            first: medians(1.0),
            second: medians(2.0),
        };
        let point = |frame, od_x| ManualPoint {
            frame,
            od_x: Some(od_x),
            od_y: Some(0.0),
            os_x: None,
            os_y: None,
        };
        let mut manual = ManualPointSet::new();
        manual.set(ManualSlot::OdSource, point(5, 90.0));
        manual.set(ManualSlot::OdDestination, point(9, 100.0));

        let report = ExamReport::build(&[auto], &manual, &calib(), &presets::quadratic());
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[1].number, 4);
        assert_eq!(report.rows[1].source, ExamSource::Manual);
        let cell = report.rows[1].cell(Eye::Od, Axis::X).measurement().unwrap();
        assert_eq!(cell.direction, crate::pd::Direction::Exo);
        assert!(report.render_text().contains("4th (manual)"));
    }

    #[test]
    fn ordinals() {
        let got: Vec<_> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101].map(ordinal).into();
        assert_eq!(
            got,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st"]
        );
    }

    #[test]
    fn cells_serialize_with_status_tag() {
        let cell = PdCell::from(Err::<PdMeasurement, _>(Unavailable::MissingPoint));
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["reason"], "measurement point unavailable");
    }
}
