use anyhow::{anyhow, Context, Result};
use rcurve::*;
use std::path::PathBuf;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, config_path) = parse_args(&args)?;

    match command.as_str() {
        "all" => demo_all(&load_config(config_path.as_ref())?),
        "intersect" => demo_intersect(&load_config(config_path.as_ref())?),
        "tangent" => demo_tangent(&load_config(config_path.as_ref())?),
        "approx" => demo_approx(&load_config(config_path.as_ref())?),
        "gcode" => demo_gcode(&load_config(config_path.as_ref())?),
        "init-config" => init_config(config_path),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Usage: rcurve [all|intersect|tangent|approx|gcode|init-config] [--config <path>]");
    println!("  all          - Full report: intersection, tangents, segments, G-code (default)");
    println!("  intersect    - Curve/line intersection by bisection");
    println!("  tangent      - Tangent sweep against the circle");
    println!("  approx       - Simplified polyline segments");
    println!("  gcode        - Grbl program for the simplified polyline");
    println!("  init-config  - Write the default job to --config or ~/.rcurve/job.json");
}

fn parse_args(args: &[String]) -> Result<(String, Option<PathBuf>)> {
    let mut command = None;
    let mut config_path = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter
                .next()
                .ok_or_else(|| anyhow!("--config needs a path argument"))?;
            config_path = Some(PathBuf::from(path));
        } else if command.is_none() {
            command = Some(arg.clone());
        } else {
            return Err(anyhow!("unexpected argument '{}'", arg));
        }
    }
    Ok((command.unwrap_or_else(|| "all".to_string()), config_path))
}

fn load_config(path: Option<&PathBuf>) -> Result<JobConfig> {
    let config = match path {
        Some(path) => JobConfig::load_from_path(path)?,
        None => JobConfig::default(),
    };
    config.validate().context("invalid job configuration")?;
    Ok(config)
}

fn init_config(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => JobConfig::default_config_path()?,
    };
    JobConfig::default().save_to_path(&path)?;
    println!("Wrote default job to {}", path.display());
    Ok(())
}

fn demo_all(config: &JobConfig) -> Result<()> {
    let report = run_job(config).context("approximation job failed")?;
    print!("{}", report.render_text());
    Ok(())
}

fn demo_intersect(config: &JobConfig) -> Result<()> {
    let point = find_intersection(
        &config.curve,
        &config.line,
        config.intersection.x_min,
        config.intersection.x_max,
        config.intersection.epsilon,
    )
    .context("intersection search failed")?;
    println!("Intersection: ({:.4}, {:.4})", point.x, point.y);
    Ok(())
}

fn demo_tangent(config: &JobConfig) -> Result<()> {
    let tangents = find_common_tangents_with(&config.circle, &config.curve, &config.tangent)
        .context("tangent search failed")?;
    println!("Found {} tangent line(s)", tangents.len());
    for tangent in &tangents {
        println!("x = {:.4}: {}", tangent.x, tangent.equation());
    }
    Ok(())
}

fn demo_approx(config: &JobConfig) -> Result<()> {
    let report = run_job(config).context("approximation job failed")?;
    println!(
        "Reduced {} samples to {} points",
        report.sample_count,
        report.polyline.len()
    );
    print!("{}", report.render_segments());
    Ok(())
}

fn demo_gcode(config: &JobConfig) -> Result<()> {
    let samples = sample_curve(
        &config.curve,
        config.sampling.x_start,
        config.sampling.x_end,
        config.sampling.step,
    )?;
    let polyline = simplify_polyline_with(&samples, &config.simplify)?;
    print!("{}", post_process_grbl(&polyline).to_program());
    Ok(())
}

/// Structured logging to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logging() -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
