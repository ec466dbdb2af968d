use ocular_deviation::calibration::{CalibrationRepository, JsonFileRepository};
use ocular_deviation::io::{load_model, write_json_file};
use ocular_deviation::regression::{presets, PolynomialDegree};
use ocular_deviation::{compute_pd, CalibrationContext, Eye, ModelError, RegressionModel};
use ocular_deviation::Axis;
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ocular-regression-{}-{name}", std::process::id()))
}

#[test]
fn shipped_models_reload_from_json_files() {
    let dir = temp_dir("models");
    for model in [presets::quadratic(), presets::cubic()] {
        let path = dir.join(format!("degree{}.json", model.degree().as_u8()));
        write_json_file(&path, &model).unwrap();
        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded, model);
        assert_eq!(
            loaded.predict(34.6, 30.0, 12.13),
            model.predict(34.6, 30.0, 12.13)
        );
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn mismatched_model_file_fails_at_load() {
    let dir = temp_dir("mismatch");
    let path = dir.join("model.json");
    let literal = serde_json::json!({
        "coefficients": presets::quadratic().coefficients(),
        "intercept": presets::quadratic().intercept(),
        "degree": 3,
    });
    write_json_file(&path, &literal).unwrap();
    let err = load_model(&path).unwrap_err();
    assert!(err.contains("needs 19 coefficients"), "{err}");

    let direct = RegressionModel::new(vec![0.0; 19], 0.0, PolynomialDegree::Quadratic);
    assert!(matches!(direct, Err(ModelError::CoefficientCount { found: 19, .. })));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn reference_exam_through_pd_computation() {
    let calib = CalibrationContext::from_limbus(34.6, 11.7, 160.0).unwrap();
    let model = presets::quadratic();
    let m = compute_pd([Some(212.13), Some(200.0)], Axis::X, Eye::Os, &calib, &model).unwrap();
    assert_eq!(m.degrees, 6.3);
    assert_eq!(m.to_string(), "6.3° / 11.0 ESO");
}

#[test]
fn calibration_store_feeds_training_rows() {
    let dir = temp_dir("calib");
    let mut repo = JsonFileRepository::new(dir.join("xaxis.json"));
    repo.update(|t| {
        t.record(34.6, 30.0, 5, -4.1);
        t.record(34.6, 30.0, 10, -8.3);
        t.record(34.6, 40.0, 10, -6.2);
    })
    .unwrap();
    repo.update(|t| {
        t.remove_distance(34.6, 40.0);
    })
    .unwrap();

    let rows = repo.load().unwrap().training_rows();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.displacement_px > 0.0 && r.distance_mm == 30.0));

    // Predictions grow with the recorded displacement as the eye angle does.
    let model = presets::quadratic();
    let p: Vec<f64> = rows
        .iter()
        .map(|r| model.evaluate(r.camera_angle_deg, r.distance_mm, r.displacement_px))
        .collect();
    assert!(p[0] < p[1]);
    let _ = std::fs::remove_dir_all(&dir);
}
