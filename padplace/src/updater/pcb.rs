//! KiCad PCB footprint location rewriting.
//!
//! Rewrites the first `(at x y)` line after each occurrence of a footprint
//! identifier, consuming supplied coordinates positionally. The file is
//! treated as plain text: matching is substring-based on the identifier
//! and on the `(at ` anchor, which is exactly what KiCad's own exports
//! need and nothing more. A new file is written next to the input; the
//! input is never modified.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PcbUpdateError {
    #[error("failed to access PCB file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("coordinate lists differ in length: {xs} x values, {ys} y values")]
    CoordinateMismatch { xs: usize, ys: usize },
}

/// Options for a PCB update run.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Inserted before the file extension to derive the output name.
    pub name_tag: String,
    /// Added to every written x coordinate.
    pub x_offset: f64,
    /// Added to every written y coordinate.
    pub y_offset: f64,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            name_tag: "_updated".to_string(),
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

/// Outcome of a PCB update run.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    /// Footprint locations actually rewritten.
    pub updated: usize,
    /// Coordinate pairs supplied.
    pub requested: usize,
    /// Path the rewritten file was saved to.
    pub output_path: PathBuf,
}

/// Rewrite footprint locations in a KiCad PCB file.
///
/// Scans for lines containing `footprint_identifier`; for each match the
/// first following `(at ` line is replaced with the next coordinate pair,
/// in order. Scanning stops once every supplied pair has been consumed.
/// The rewritten text is saved to `<stem><tag><extension>` in the input's
/// directory and the input file is left untouched.
pub fn update_footprint_locations(
    path: &Path,
    xs: &[f64],
    ys: &[f64],
    footprint_identifier: &str,
    options: &UpdateOptions,
) -> Result<UpdateReport, PcbUpdateError> {
    if xs.len() != ys.len() {
        return Err(PcbUpdateError::CoordinateMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| PcbUpdateError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let shifted_xs: Vec<f64> = xs.iter().map(|x| x + options.x_offset).collect();
    let shifted_ys: Vec<f64> = ys.iter().map(|y| y + options.y_offset).collect();

    let (updated_content, updated) =
        rewrite_locations(&content, &shifted_xs, &shifted_ys, footprint_identifier);

    let output_path = derive_output_path(path, &options.name_tag);
    fs::write(&output_path, updated_content).map_err(|source| PcbUpdateError::Io {
        path: output_path.clone(),
        source,
    })?;

    if updated < xs.len() {
        warn!(
            updated,
            requested = xs.len(),
            "fewer footprints updated than coordinates supplied"
        );
    }
    info!(updated, output = %output_path.display(), "wrote updated PCB file");

    Ok(UpdateReport {
        updated,
        requested: xs.len(),
        output_path,
    })
}

/// String-level rewriting core; see [`update_footprint_locations`].
///
/// Splits on `'\n'` and rejoins with `'\n'`: untouched lines keep any
/// `'\r'` they carried, replaced lines are always LF-terminated.
/// Returns the rewritten text and the number of locations replaced.
pub fn rewrite_locations(
    content: &str,
    xs: &[f64],
    ys: &[f64],
    identifier: &str,
) -> (String, usize) {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    let requested = xs.len().min(ys.len());
    let mut updated = 0;

    let mut i = 0;
    while i < lines.len() && updated < requested {
        if lines[i].contains(identifier) {
            // The first `(at ` line strictly after the match takes the
            // next coordinate pair.
            let mut location = None;
            for (j, line) in lines.iter().enumerate().skip(i + 1) {
                if line.contains("(at ") {
                    location = Some(j);
                    break;
                }
            }
            match location {
                Some(j) => {
                    lines[j] = format!("\t\t(at {} {})", xs[updated], ys[updated]);
                    updated += 1;
                    i = j + 1;
                    continue;
                }
                None => {
                    warn!(
                        line = i,
                        "footprint match without a following location line, skipping"
                    );
                }
            }
        }
        i += 1;
    }

    (lines.join("\n"), updated)
}

fn derive_output_path(path: &Path, tag: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let name = match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{}{}.{}", stem, tag, ext),
        None => format!("{}{}", stem, tag),
    };
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PCB: &str = "(kicad_pcb\n\
\t(footprint \"Lib:Disk\"\n\
\t\t(at 0 0)\n\
\t)\n\
\t(footprint \"Lib:Disk\"\n\
\t\t(at 0 0)\n\
\t)\n\
\t(footprint \"Lib:Disk\"\n\
\t\t(at 0 0)\n\
\t)\n\
)\n";

    #[test]
    fn test_positional_mapping_in_order() {
        let (out, updated) =
            rewrite_locations(PCB, &[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], "Lib:Disk");
        assert_eq!(updated, 3);
        assert!(out.contains("\t\t(at 1 4)"));
        assert!(out.contains("\t\t(at 2 5)"));
        assert!(out.contains("\t\t(at 3 6)"));
        assert!(!out.contains("(at 0 0)"));
    }

    #[test]
    fn test_early_stop_leaves_extra_matches_untouched() {
        let (out, updated) = rewrite_locations(PCB, &[1.0, 2.0], &[4.0, 5.0], "Lib:Disk");
        assert_eq!(updated, 2);
        assert_eq!(out.matches("(at 0 0)").count(), 1);
    }

    #[test]
    fn test_missing_location_line_is_skipped() {
        let pcb = "(kicad_pcb\n\
\t(footprint \"Lib:Disk\"\n\
\t)\n\
)\n";
        let (out, updated) = rewrite_locations(pcb, &[1.0], &[2.0], "Lib:Disk");
        assert_eq!(updated, 0);
        assert_eq!(out, pcb);
    }

    #[test]
    fn test_skipped_match_does_not_affect_later_matches() {
        // The last identifier occurrence has no location line; earlier
        // ones still consume coordinates in order.
        let pcb = "(footprint \"Lib:Disk\"\n\
\t\t(at 0 0)\n\
(footprint \"Lib:Disk\"\n";
        let (out, updated) = rewrite_locations(pcb, &[9.0, 8.0], &[9.0, 8.0], "Lib:Disk");
        assert_eq!(updated, 1);
        assert!(out.contains("\t\t(at 9 9)"));
    }

    #[test]
    fn test_zero_coordinates_copies_content_verbatim() {
        let (out, updated) = rewrite_locations(PCB, &[], &[], "Lib:Disk");
        assert_eq!(updated, 0);
        assert_eq!(out, PCB);
    }

    #[test]
    fn test_crlf_lines_survive_except_replacements() {
        let pcb = "(kicad_pcb\r\n\t(footprint \"Lib:Disk\"\r\n\t\t(at 0 0)\r\n\t)\r\n)\r\n";
        let (out, updated) = rewrite_locations(pcb, &[1.5], &[2.5], "Lib:Disk");
        assert_eq!(updated, 1);
        assert!(out.starts_with("(kicad_pcb\r\n"));
        assert!(out.contains("\t\t(at 1.5 2.5)\n\t)\r\n"));
    }

    #[test]
    fn test_coordinate_text_has_no_trailing_zeros() {
        let (out, _) = rewrite_locations(PCB, &[26.75], &[-40.0], "Lib:Disk");
        assert!(out.contains("(at 26.75 -40)"));
    }

    #[test]
    fn test_output_path_derivation() {
        assert_eq!(
            derive_output_path(Path::new("/tmp/foo.kicad_pcb"), "_updated"),
            PathBuf::from("/tmp/foo_updated.kicad_pcb")
        );
        assert_eq!(
            derive_output_path(Path::new("foo.kicad_pcb"), "_v2"),
            PathBuf::from("foo_v2.kicad_pcb")
        );
        assert_eq!(
            derive_output_path(Path::new("bare"), "_updated"),
            PathBuf::from("bare_updated")
        );
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let err = update_footprint_locations(
            Path::new("irrelevant.kicad_pcb"),
            &[1.0],
            &[],
            "Lib:Disk",
            &UpdateOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PcbUpdateError::CoordinateMismatch { xs: 1, ys: 0 }
        ));
    }
}
