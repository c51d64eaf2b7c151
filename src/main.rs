mod chart;
mod predict;
mod visibility;
mod web;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::chart::{render_svg, ChartConfig};
use crate::predict::{predict_series, Observer, Satellite, Sgp4Propagator};
use crate::visibility::{minute_instants, visible_windows, SampleSeries, VisibilityWindow};

#[derive(Parser)]
#[command(name = "passwatch")]
#[command(about = "Satellite visibility pass prediction and charting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PredictArgs {
    /// TLE file (two- or three-line element set)
    #[arg(long)]
    tle: PathBuf,
    /// Observer coordinates as "lat, lon" in degrees
    #[arg(long)]
    coordinates: String,
    /// Observer altitude in meters
    #[arg(long, default_value_t = 0.0)]
    altitude: f64,
    /// Look-ahead window, e.g. "90m" or "24h"
    #[arg(long, default_value = "24h")]
    duration: String,
    /// Degrees added to every raw elevation before thresholding
    #[arg(long, default_value_t = 0.0)]
    elevation_bias: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict visible passes and print them
    Passes {
        #[command(flatten)]
        predict: PredictArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Render the elevation chart with pass annotations
    Chart {
        #[command(flatten)]
        predict: PredictArgs,
        /// Output SVG path
        #[arg(long, default_value = "passes.svg")]
        output: PathBuf,
        /// Chart title (defaults to the satellite name)
        #[arg(long)]
        title: Option<String>,
    },
    /// Run the HTTP API and dashboard
    Serve {
        /// YAML configuration file
        #[arg(long)]
        config: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Passes { predict, json } => passes(&predict, json),
        Commands::Chart {
            predict,
            output,
            title,
        } => chart_file(&predict, &output, title),
        Commands::Serve { config } => serve(&config),
    }
}

fn passes(args: &PredictArgs, json: bool) -> ExitCode {
    let (satellite, _, windows) = match compute(args) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        #[derive(serde::Serialize)]
        struct Report<'a> {
            satellite: &'a str,
            window_count: usize,
            windows: &'a [VisibilityWindow],
        }
        let report = Report {
            satellite: &satellite.name,
            window_count: windows.len(),
            windows: &windows,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("JSON error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if windows.is_empty() {
        println!("No visible passes of {} in the next {}", satellite.name, args.duration);
        return ExitCode::SUCCESS;
    }

    println!("Visible passes of {}:", satellite.name);
    for w in &windows {
        println!(
            "  {} - {}  ({} min)",
            w.start.format("%Y-%m-%d %H:%M"),
            w.end.format("%H:%M"),
            w.duration().num_minutes()
        );
    }
    ExitCode::SUCCESS
}

fn chart_file(args: &PredictArgs, output: &PathBuf, title: Option<String>) -> ExitCode {
    let (satellite, series, windows) = match compute(args) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = ChartConfig {
        title: title.unwrap_or_else(|| satellite.name.clone()),
        ..ChartConfig::default()
    };

    let svg = match render_svg(&series, &windows, &config) {
        Ok(svg) => svg,
        Err(e) => {
            eprintln!("Chart error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::write(output, svg) {
        eprintln!("Error writing {}: {}", output.display(), e);
        return ExitCode::FAILURE;
    }
    println!(
        "Wrote {} ({} visible passes)",
        output.display(),
        windows.len()
    );
    ExitCode::SUCCESS
}

fn serve(path: &str) -> ExitCode {
    let config = match web::Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = runtime.block_on(web::run_server(config)) {
        eprintln!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn compute(
    args: &PredictArgs,
) -> Result<(Satellite, SampleSeries, Vec<VisibilityWindow>), String> {
    let duration_hours = parse_duration_hours(&args.duration)?;
    let satellite = Satellite::from_tle_file(&args.tle).map_err(|e| e.to_string())?;
    let observer = Observer::from_coordinates(&args.coordinates, Some(args.altitude))
        .ok_or_else(|| format!("invalid coordinates: {}", args.coordinates))?;

    log::info!(
        "predicting {} over {} for {}",
        satellite.name,
        args.duration,
        args.coordinates
    );

    let instants = minute_instants(duration_hours);
    let propagator = Sgp4Propagator::new(&satellite, observer);
    let series = predict_series(&propagator, &instants).map_err(|e| e.to_string())?;
    let windows = visible_windows(&series, args.elevation_bias).map_err(|e| e.to_string())?;
    Ok((satellite, series, windows))
}

fn parse_duration_hours(s: &str) -> Result<f64, String> {
    humantime::parse_duration(s.trim())
        .map(|d| d.as_secs_f64() / 3600.0)
        .map_err(|e| format!("invalid duration {:?}: {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_parse_to_hours() {
        assert_eq!(parse_duration_hours("24h").unwrap(), 24.0);
        assert_eq!(parse_duration_hours("90m").unwrap(), 1.5);
        assert_eq!(parse_duration_hours("2h 30m").unwrap(), 2.5);
        assert!(parse_duration_hours("soon").is_err());
    }
}
