//! Extract circle coordinates from a DXF drawing and print them.

use padplace::prelude::*;
use std::path::Path;

fn main() -> Result<(), PadPlaceError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/electrode_array.dxf".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example extract_coordinates [path/to/file.dxf]");
        std::process::exit(1);
    }

    let options = PlacementOptions::default();
    let circles = PadPlaceCore::extract_coordinates(path, &options)?;

    println!("Extracted {} circles from {}:", circles.len(), path.display());
    for (idx, circle) in circles.iter().enumerate() {
        println!(
            "  channel {:>3}: X: {}, Y: {}, R: {}",
            idx + 1,
            circle.x,
            circle.y,
            circle.r
        );
    }

    Ok(())
}
