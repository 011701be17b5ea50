use rcurve::*;

#[test]
fn test_default_job_report() {
    // The stock job: unit circle, x^2 - 2x + 1, y = 2x - 1, samples on [0, 5]
    let report = run_job(&JobConfig::default()).expect("Default job should run");

    assert_eq!(report.sample_count, 51, "Should sample [0, 5] at 0.1");
    assert_eq!(report.polyline[0], Point::new(0.0, 1.0));
    assert_eq!(report.polyline.last().map(|p| p.x.round()), Some(5.0));
    assert_eq!(report.moves, emit_linear_moves(&report.polyline));
    assert_eq!(report.tangents.len(), 2);

    let gcode = report.gcode();
    assert_eq!(gcode.lines.len(), report.segment_count());
    assert!(gcode.lines.iter().all(|l| l.starts_with("G01 X")));
}

#[test]
fn test_approximate_to_gcode() {
    let curve = |x: f64| x * x;
    let gcode = approximate_to_gcode(&curve, -2.0, 2.0, 0.01, 0.05).expect("pipeline");

    assert!(!gcode.lines.is_empty(), "Should generate G-code");
    assert_eq!(
        gcode.lines.last().map(String::as_str),
        Some("G01 X2.00 Y4.00"),
        "Last move should end at the end of the domain"
    );
}

#[test]
fn test_straight_curve_is_one_move() {
    let gcode = approximate_to_gcode(&Line::new(0.5, 1.0), 0.0, 10.0, 0.25, 1e-6)
        .expect("pipeline");
    assert_eq!(gcode.lines, vec!["G01 X10.00 Y6.00"]);
}

#[test]
fn test_config_round_trip_through_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("jobs").join("job.json");

    let mut config = JobConfig::default();
    config.line = Line::new(-1.0, 3.0);
    config.simplify = SimplifyOptions::new(0.25).with_metric(DeviationMetric::ChordLength);
    config.save_to_path(&path).expect("save");

    let loaded = JobConfig::load_from_path(&path).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_config_file_yields_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loaded = JobConfig::load_from_path(dir.path().join("absent.json")).expect("load");
    assert_eq!(loaded, JobConfig::default());
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("job.json");
    std::fs::write(&path, "{ not json").expect("write");

    let err = JobConfig::load_from_path(&path).expect_err("should fail to parse");
    assert!(
        format!("{:#}", err).contains("deserialize job config"),
        "Error should carry context: {:#}",
        err
    );
}

#[test]
fn test_invalid_job_reports_precondition() {
    let mut config = JobConfig::default();
    config.intersection.epsilon = -1.0;

    let err = run_job(&config).expect_err("negative epsilon must fail");
    assert_eq!(
        err,
        ApproxError::InvalidTolerance {
            name: "epsilon",
            value: -1.0
        }
    );
}
