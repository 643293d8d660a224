//! PadPlace - DXF-driven footprint placement for KiCad PCB files
//!
//! This library extracts circular-element coordinates (electrodes,
//! mounting holes) from DXF CAD drawings and rewrites the matching
//! footprint location directives in a KiCad PCB layout file.
//!
//! # Quick Start
//!
//! ```no_run
//! use padplace::{PadPlaceCore, PlacementOptions};
//! use std::path::Path;
//!
//! let options = PlacementOptions {
//!     target_radius: Some(1.5),
//!     ..PlacementOptions::default()
//! };
//! let report = PadPlaceCore::update_from_dxf(
//!     Path::new("electrodes.dxf"),
//!     Path::new("board.kicad_pcb"),
//!     "CustomComponents:1625-5-57-15_D3.18mm_disk",
//!     &options,
//! ).unwrap();
//!
//! println!("updated {} of {} footprints", report.updated, report.requested);
//! ```
//!
//! # Features
//!
//! - **Extraction**: `CIRCLE` entities from DXF text, with radius
//!   filtering and (x, y) deduplication
//! - **Placement**: positional rewriting of `(at x y)` lines, saved to a
//!   tagged copy of the PCB file
//! - **Remapping**: channel remap files for connector wiring order
//! - **Export**: CSV coordinate dumps for downstream tooling

pub mod core;
pub mod export;
pub mod parser;
pub mod updater;

// Re-export main types
pub use crate::core::{discover_footprints, PadPlaceCore, PadPlaceError, PlacementOptions};
pub use crate::export::{export_coordinates_csv, export_labeled_csv, ExportError};
pub use crate::parser::dxf::{extract_circles, extract_circles_str, DxfScanError};
pub use crate::parser::remap::{apply_remap, parse_remap_file, RemapError};
pub use crate::parser::schema::{classify_circles, Circle, LabeledCircle, RadiusClass};
pub use crate::updater::pcb::{
    rewrite_locations, update_footprint_locations, PcbUpdateError, UpdateOptions, UpdateReport,
};

/// Extract circle coordinates from a DXF file (convenience wrapper).
pub fn extract(
    path: &std::path::Path,
    target_radius: Option<f64>,
) -> Result<Vec<Circle>, PadPlaceError> {
    crate::parser::dxf::extract_circles(path, target_radius).map_err(PadPlaceError::from)
}

/// Rewrite footprint locations in a PCB file (convenience wrapper).
pub fn update_pcb(
    path: &std::path::Path,
    xs: &[f64],
    ys: &[f64],
    footprint_identifier: &str,
) -> Result<UpdateReport, PadPlaceError> {
    crate::updater::pcb::update_footprint_locations(
        path,
        xs,
        ys,
        footprint_identifier,
        &UpdateOptions::default(),
    )
    .map_err(PadPlaceError::from)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Circle, PadPlaceCore, PadPlaceError, PlacementOptions, UpdateOptions, UpdateReport,
    };
}
