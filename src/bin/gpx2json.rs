// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPX to JSON converter with ride metrics calculation.
//!
//! Converts GPS tracking data to a JSON ride document and prints the
//! derived metrics. Defaults to imperial units (miles, feet).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ridelog::convert::{self, RideDocument};
use ridelog::geo::UnitSystem;

#[derive(Parser)]
#[command(
    name = "gpx2json",
    about = "Convert a GPX file to JSON with ride metrics"
)]
struct Args {
    /// Input GPX file
    input: PathBuf,

    /// Output JSON file (default: input file with a .json extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Unit system for distances, elevations, and speeds
    #[arg(long, default_value = "imperial")]
    units: UnitSystem,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("json"));

    match convert::convert_file(&args.input, &output, args.units) {
        Ok(doc) => {
            print_report(&doc, args.units);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(doc: &RideDocument, units: UnitSystem) {
    println!("Successfully processed GPX file:");
    println!("Ride name: {}", doc.name.as_deref().unwrap_or("(unnamed)"));
    println!(
        "Start time: {}",
        doc.start_time.as_deref().unwrap_or("(none)")
    );
    println!("End time: {}", doc.end_time.as_deref().unwrap_or("(none)"));
    println!(
        "Elapsed time: {}",
        doc.elapsed_time.as_deref().unwrap_or("(none)")
    );
    println!("Number of waypoints: {}", doc.number_waypoints);
    println!(
        "Total distance: {:.2} {}",
        doc.total_distance,
        units.distance_label()
    );
    println!(
        "Total elevation gain: {:.1} {}",
        doc.total_elevation_gain,
        units.elevation_label()
    );
    if let Some(average) = doc.average_speed {
        println!("Average speed: {:.1} {}", average, units.speed_label());
    }
    if let Some(max) = doc.max_speed {
        println!("Max speed: {:.1} {}", max, units.speed_label());
    }
}
