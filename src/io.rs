//! File I/O helpers for the command-line tools.
//!
//! - `load_recording`: read a recording, either split per eye or as a flat
//!   message stream.
//! - `load_model`: read a `{coefficients, intercept, degree}` model file.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `save_trace_plot`: render the four traces with shaded occlusion regions.
use crate::recording::Recording;
use crate::regions::{Region, RegionType};
use crate::regression::RegressionModel;
use crate::trace::EyeTraces;
use crate::types::{Axis, Eye, EyeMessage, Sample};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordingFile {
    Split { od: Vec<Sample>, os: Vec<Sample> },
    Messages(Vec<EyeMessage>),
}

/// Reads `{"od": [...], "os": [...]}` or `[{"eye": "OD", ...}, ...]`.
pub fn load_recording(path: &Path) -> Result<Recording, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read recording {}: {e}", path.display()))?;
    let file: RecordingFile = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse recording {}: {e}", path.display()))?;
    Ok(match file {
        RecordingFile::Split { od, os } => Recording::from_samples(&od, &os),
        RecordingFile::Messages(messages) => Recording::from_messages(&messages),
    })
}

pub fn load_model(path: &Path) -> Result<RegressionModel, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read model {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse model {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

const PANEL_HEIGHT: u32 = 200;
const PX_PER_FRAME: u32 = 3;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const OD_COLOR: Rgb<u8> = Rgb([200, 30, 30]);
const OS_COLOR: Rgb<u8> = Rgb([30, 60, 200]);
const OD_HIDE_SHADE: Rgb<u8> = Rgb([250, 222, 222]);
const OS_HIDE_SHADE: Rgb<u8> = Rgb([222, 230, 250]);

/// Renders the x traces (top panel) and y traces (bottom panel), OD in red
/// and OS in blue, over columns shaded by occlusion region.
pub fn save_trace_plot(path: &Path, traces: &EyeTraces, regions: &[Region]) -> Result<(), String> {
    let frames = traces.len();
    if frames == 0 {
        return Err("Cannot plot an empty recording".to_string());
    }
    let width = frames as u32 * PX_PER_FRAME;
    let mut img = RgbImage::from_pixel(width, PANEL_HEIGHT * 2, BACKGROUND);

    for region in regions {
        let shade = match region.region_type {
            RegionType::OdHideOsShow => OD_HIDE_SHADE,
            RegionType::OsHideOdShow => OS_HIDE_SHADE,
        };
        let x0 = region.start_frame as u32 * PX_PER_FRAME;
        let x1 = ((region.end_frame + 1) as u32 * PX_PER_FRAME).min(width);
        for x in x0..x1 {
            for y in 0..PANEL_HEIGHT * 2 {
                img.put_pixel(x, y, shade);
            }
        }
    }

    for (panel, axis) in Axis::BOTH.into_iter().enumerate() {
        let top = panel as u32 * PANEL_HEIGHT;
        let (lo, hi) = value_range(Eye::BOTH.iter().map(|&eye| traces.get(eye, axis)));
        for (eye, color) in [(Eye::Od, OD_COLOR), (Eye::Os, OS_COLOR)] {
            let rows: Vec<u32> = traces.get(eye, axis)[..frames]
                .iter()
                .map(|&v| top + value_to_row(v, lo, hi))
                .collect();
            draw_polyline(&mut img, &rows, color);
        }
    }

    ensure_parent_dir(path)?;
    img.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

fn value_range<'a>(series: impl Iterator<Item = &'a [f64]>) -> (f64, f64) {
    let (lo, hi) = series
        .flat_map(|s| s.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        (0.0, 1.0)
    } else if hi - lo < 1e-9 {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

/// Image rows grow downwards; a 5% margin keeps extremes off the border.
fn value_to_row(value: f64, lo: f64, hi: f64) -> u32 {
    if !value.is_finite() {
        return PANEL_HEIGHT / 2;
    }
    let usable = (PANEL_HEIGHT - 1) as f64 * 0.9;
    let margin = (PANEL_HEIGHT - 1) as f64 * 0.05;
    let t = (value - lo) / (hi - lo);
    let row = margin + (1.0 - t) * usable;
    row.round().clamp(0.0, (PANEL_HEIGHT - 1) as f64) as u32
}

fn draw_polyline(img: &mut RgbImage, rows: &[u32], color: Rgb<u8>) {
    for (frame, &row) in rows.iter().enumerate() {
        let x0 = frame as u32 * PX_PER_FRAME;
        let prev = if frame == 0 { row } else { rows[frame - 1] };
        let (a, b) = if prev <= row { (prev, row) } else { (row, prev) };
        for y in a..=b {
            img.put_pixel(x0, y, color);
        }
        for dx in 1..PX_PER_FRAME {
            img.put_pixel(x0 + dx, row, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("ocular-io-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn recording_loads_from_both_layouts() {
        let split = temp_path("split.json");
        let doc = serde_json::json!({
            "od": [{"frameIndex": 0, "x": 1.0, "y": 2.0, "isHide": false},
                   {"frameIndex": 1, "x": null, "y": 2.5, "isHide": true}],
            "os": [{"frameIndex": 0, "x": 3.0, "y": 4.0, "isHide": true}]
        });
        write_json_file(&split, &doc).unwrap();
        let rec = load_recording(&split).unwrap();
        assert_eq!(rec.od.len(), 2);
        assert_eq!(rec.aligned_len(), 1);
        assert!(rec.od.x[1].is_missing());

        let flat = temp_path("flat.json");
        let doc = serde_json::json!([
            {"frameIndex": 0, "eye": "OD", "x": 1.0, "y": 2.0, "isHide": false},
            {"frameIndex": 0, "eye": "OS", "x": 3.0, "y": 4.0, "isHide": true},
            {"frameIndex": 1, "eye": "OS", "x": 3.5, "y": 4.5, "isHide": true}
        ]);
        write_json_file(&flat, &doc).unwrap();
        let rec = load_recording(&flat).unwrap();
        assert_eq!(rec.od.len(), 1);
        assert_eq!(rec.os.len(), 2);
        assert!(rec.os.hidden[0]);
    }

    #[test]
    fn missing_files_name_the_path() {
        let err = load_recording(Path::new("/nonexistent/recording.json")).unwrap_err();
        assert!(err.contains("/nonexistent/recording.json"));
        assert!(load_model(Path::new("/nonexistent/model.json")).is_err());
    }

    #[test]
    fn plot_has_two_panels() {
        let traces = EyeTraces {
            od_x: vec![0.0, 1.0, 2.0, 3.0],
            od_y: vec![1.0; 4],
            os_x: vec![3.0, 2.0, 1.0, 0.0],
            os_y: vec![f64::NAN; 4],
            ..Default::default()
        };
        let regions = [Region::new(RegionType::OdHideOsShow, 1, 2)];
        let path = temp_path("plot.png");
        save_trace_plot(&path, &traces, &regions).unwrap();
        let img = image::open(&path).unwrap().into_rgb8();
        assert_eq!(img.dimensions(), (4 * PX_PER_FRAME, PANEL_HEIGHT * 2));
        assert_eq!(value_to_row(0.0, 0.0, 3.0), 189);
        assert_eq!(value_to_row(3.0, 0.0, 3.0), 10);
        assert!(save_trace_plot(&path, &EyeTraces::default(), &[]).is_err());
    }
}
