use ocular_deviation::prelude::*;
use ocular_deviation::regions::RegionType;

fn main() {
    // Demo: synthetic alternating cover test with an 8 px esodeviation of
    // the covered eye, analysed with the default parameters.
    env_logger::init();
    let schedule = [
        (0, 30, None),
        (30, 70, Some(RegionType::OsHideOdShow)),
        (70, 110, Some(RegionType::OdHideOsShow)),
        (110, 150, Some(RegionType::OsHideOdShow)),
        (150, 190, Some(RegionType::OdHideOsShow)),
        (190, 230, Some(RegionType::OsHideOdShow)),
        (230, 270, Some(RegionType::OdHideOsShow)),
        (270, 310, Some(RegionType::OsHideOdShow)),
        (310, 350, Some(RegionType::OdHideOsShow)),
        (350, 370, None),
    ];
    let mut od = Vec::new();
    let mut os = Vec::new();
    for (start, end, kind) in schedule {
        for frame in start..end {
            let od_hidden = kind == Some(RegionType::OdHideOsShow);
            let os_hidden = kind == Some(RegionType::OsHideOdShow);
            let od_x = if od_hidden { 108.0 } else { 100.0 };
            let os_x = if os_hidden { 208.0 } else { 200.0 };
            od.push(Sample::new(frame, od_x, 60.0, od_hidden));
            os.push(Sample::new(frame, os_x, 60.0, os_hidden));
        }
    }
    let recording = Recording::from_samples(&od, &os);

    let analyzer = DeviationAnalyzer::new(AnalysisParams::default());
    let result = analyzer.analyze(&recording);
    println!(
        "frames={} regions={} exams={}",
        result.frame_count,
        result.regions.len(),
        result.exams.len()
    );

    match CalibrationContext::from_limbus(34.6, 11.7, 160.0) {
        Ok(calib) => {
            let report = ExamReport::build(
                &result.exams,
                &Default::default(),
                &calib,
                &ModelPreset::Quadratic.model(),
            );
            print!("{}", report.render_text());
        }
        Err(err) => eprintln!("calibration rejected: {err}"),
    }
}
