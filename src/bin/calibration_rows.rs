use ocular_deviation::calibration::{CalibrationRepository, JsonFileRepository};
use ocular_deviation::io::write_json_file;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let store = args.next().ok_or_else(usage)?;
    let out = args.next();

    let repo = JsonFileRepository::new(&store);
    let table = repo.load().map_err(|e| e.to_string())?;
    let rows = table.training_rows();

    println!("Calibration table {}", repo.path().display());
    println!("  camera angles: {}", table.camera_angles().collect::<Vec<_>>().join(", "));
    println!("  measurements: {} (usable rows: {})", table.len(), rows.len());

    match out {
        Some(path) => {
            write_json_file(Path::new(&path), &rows)?;
            println!("Training rows written to {path}");
        }
        None => {
            println!("\ncam_angle,distance,abs_delta_x,eye_angle");
            for r in &rows {
                println!(
                    "{:.1},{:.0},{:.1},{:.0}",
                    r.camera_angle_deg, r.distance_mm, r.displacement_px, r.eye_angle_deg
                );
            }
        }
    }
    Ok(())
}

fn usage() -> String {
    "Usage: calibration_rows <calibration.json> [rows_out.json]".to_string()
}
