use ocular_deviation::config::analysis::{self, ReportToolConfig};
use ocular_deviation::io::{load_recording, save_trace_plot, write_json_file};
use ocular_deviation::manual::ManualPointSet;
use ocular_deviation::summary::MedianSample;
use ocular_deviation::types::{Axis, Eye};
use ocular_deviation::{AnalysisReport, DeviationAnalyzer, ExamReport};
use serde::Serialize;
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
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = analysis::load_config(Path::new(&config_path))?;

    let recording = load_recording(&config.input)?;
    let calib = config.calibration.to_context()?;
    let model = config.model.resolve()?;

    let analyzer = DeviationAnalyzer::new(config.analysis.clone());
    let report = analyzer.analyze_with_diagnostics(&recording);
    let manual = manual_points(&config, &report)?;
    let exams = ExamReport::build(&report.result.exams, &manual, &calib, &model);

    print_text_summary(&report);
    println!("\n{}", exams.render_text());

    if let Some(path) = &config.output.report_json {
        write_json_file(
            path,
            &DeviationReportFile {
                analysis: &report,
                exams: &exams,
            },
        )?;
        println!("JSON report written to {}", path.display());
    }
    if let Some(path) = &config.output.debug_plot {
        save_trace_plot(path, &report.result.traces, &report.result.regions)?;
        println!("Trace plot written to {}", path.display());
    }
    Ok(())
}

fn manual_points(config: &ReportToolConfig, report: &AnalysisReport) -> Result<ManualPointSet, String> {
    let mut manual = ManualPointSet::new();
    for pick in &config.manual {
        if !manual.capture(pick.slot, &report.result.traces, pick.frame) {
            return Err(format!(
                "Manual frame {} for {:?} is outside the recording ({} frames)",
                pick.frame, pick.slot, report.result.frame_count
            ));
        }
    }
    Ok(manual)
}

fn usage() -> String {
    "Usage: deviation_report <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviationReportFile<'a> {
    analysis: &'a AnalysisReport,
    exams: &'a ExamReport,
}

fn print_text_summary(report: &AnalysisReport) {
    let input = &report.trace.input;
    println!("Recording summary");
    println!(
        "  frames: od={} os={} aligned={} complete={}",
        input.od_frames, input.os_frames, input.aligned_frames, input.complete
    );
    for t in &report.trace.traces {
        println!(
            "  {} {}: valid={} interpolated={} spikes={}{}",
            t.eye,
            t.axis,
            t.stats.valid,
            t.stats.interpolated,
            t.stats.spikes_replaced,
            if t.stats.degenerate { " (no data)" } else { "" }
        );
    }

    let timings: Vec<String> = report
        .trace
        .timings
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect();
    println!(
        "\nTimings (ms): {} total={:.3}",
        timings.join(" "),
        report.trace.timings.total_ms
    );

    match &report.trace.segmentation {
        Some(seg) => println!(
            "\nSegmentation: regions={} interior={} exams={} od_hidden={} os_hidden={}{}",
            seg.regions_found,
            seg.interior_regions,
            seg.exams,
            seg.od_hidden_frames,
            seg.os_hidden_frames,
            if seg.unpaired_region { " (last region unpaired)" } else { "" }
        ),
        None => println!("\nSegmentation: recording incomplete"),
    }
    for s in &report.result.summaries {
        println!(
            "  region {} [{}..{}] {}: {}",
            s.region_number,
            s.frame_range[0],
            s.frame_range[1],
            s.region_type.label(),
            Eye::BOTH
                .iter()
                .flat_map(|&eye| Axis::BOTH.map(|axis| (eye, axis)))
                .map(|(eye, axis)| format!("{eye}-{axis}={}", format_median(s.medians.get(eye, axis))))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }
}

fn format_median(val: Option<MedianSample>) -> String {
    val.map(|m| format!("{:.2}@{}", m.value, m.frame))
        .unwrap_or_else(|| "-".to_string())
}
