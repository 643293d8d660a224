//! Full pipeline example: place footprints from a DXF drawing.
//!
//! Usage: cargo run --example update_board <DXF> <PCB> <FOOTPRINT> [RADIUS]

use padplace::prelude::*;
use std::path::Path;

fn main() -> Result<(), PadPlaceError> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: cargo run --example update_board <DXF> <PCB> <FOOTPRINT> [RADIUS]");
        std::process::exit(1);
    }

    let options = PlacementOptions {
        target_radius: args.get(4).and_then(|s| s.parse().ok()),
        ..PlacementOptions::default()
    };

    let report = PadPlaceCore::update_from_dxf(
        Path::new(&args[1]),
        Path::new(&args[2]),
        &args[3],
        &options,
    )?;

    println!(
        "Updated {} of {} footprints. New file saved as {}.",
        report.updated,
        report.requested,
        report.output_path.display()
    );
    if report.updated < report.requested {
        println!("Warning: some coordinates were not placed; check the footprint identifier.");
    }

    Ok(())
}
