//! High-level placement pipeline shared by library consumers and the CLI.
//! No GUI or app-state dependencies.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::export::ExportError;
use crate::parser::dxf::{extract_circles, DxfScanError};
use crate::parser::remap::{apply_remap, parse_remap_file, RemapError};
use crate::parser::schema::Circle;
use crate::updater::pcb::{
    update_footprint_locations, PcbUpdateError, UpdateOptions, UpdateReport,
};

#[derive(Debug, thiserror::Error)]
pub enum PadPlaceError {
    #[error("DXF scan error: {0}")]
    Dxf(#[from] DxfScanError),
    #[error("PCB update error: {0}")]
    Pcb(#[from] PcbUpdateError),
    #[error("Remap error: {0}")]
    Remap(#[from] RemapError),
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for a placement run (CLI or library).
#[derive(Debug, Clone)]
pub struct PlacementOptions {
    /// Keep only circles with this rounded radius; `None` keeps all.
    pub target_radius: Option<f64>,
    /// Negate extracted y coordinates (DXF y-up vs. PCB y-down).
    pub flip_y: bool,
    /// Offset added to x coordinates written to the PCB.
    pub x_offset: f64,
    /// Offset added to y coordinates written to the PCB.
    pub y_offset: f64,
    /// Tag inserted before the output file extension.
    pub name_tag: String,
    /// Optional channel remap file applied between extraction and update.
    pub remap_file: Option<PathBuf>,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            target_radius: None,
            flip_y: false,
            x_offset: 0.0,
            y_offset: 0.0,
            name_tag: "_updated".to_string(),
            remap_file: None,
        }
    }
}

/// Core placement API used by both the library surface and the CLI.
pub struct PadPlaceCore;

impl PadPlaceCore {
    /// Extract circle coordinates from a DXF drawing, applying the
    /// configured radius filter and y flip.
    pub fn extract_coordinates(
        dxf: &Path,
        options: &PlacementOptions,
    ) -> Result<Vec<Circle>, PadPlaceError> {
        let mut circles = extract_circles(dxf, options.target_radius)?;
        if options.flip_y {
            for circle in &mut circles {
                circle.y = -circle.y;
            }
        }
        debug!(count = circles.len(), "extracted circle coordinates");
        Ok(circles)
    }

    /// Run the full pipeline: extract coordinates from the DXF, apply an
    /// optional channel remap and the configured offsets, and rewrite
    /// matching footprint locations in the PCB file. A new file is written
    /// beside the input; the input is never modified.
    pub fn update_from_dxf(
        dxf: &Path,
        pcb: &Path,
        footprint_identifier: &str,
        options: &PlacementOptions,
    ) -> Result<UpdateReport, PadPlaceError> {
        let mut circles = Self::extract_coordinates(dxf, options)?;

        if let Some(remap_path) = &options.remap_file {
            let map = parse_remap_file(remap_path)?;
            circles = apply_remap(&circles, &map);
            info!(entries = map.len(), "applied channel remap");
        }

        let xs: Vec<f64> = circles.iter().map(|c| c.x).collect();
        let ys: Vec<f64> = circles.iter().map(|c| c.y).collect();
        let update_options = UpdateOptions {
            name_tag: options.name_tag.clone(),
            x_offset: options.x_offset,
            y_offset: options.y_offset,
        };

        let report =
            update_footprint_locations(pcb, &xs, &ys, footprint_identifier, &update_options)?;
        Ok(report)
    }
}

/// List the unique footprint library identifiers declared in a PCB file,
/// sorted.
pub fn discover_footprints(pcb: &Path) -> Result<Vec<String>, PadPlaceError> {
    let content = fs::read_to_string(pcb)?;
    let mut names = BTreeSet::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        let Some(rest) = trimmed.strip_prefix("(footprint") else {
            continue;
        };
        if let Some(quoted) = rest.trim_start().strip_prefix('"') {
            if let Some(end) = quoted.find('"') {
                names.insert(quoted[..end].to_string());
            }
        }
    }

    Ok(names.into_iter().collect())
}
