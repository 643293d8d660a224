//! DXF `CIRCLE` extraction.
//!
//! This is not a general DXF parser. It recognizes exactly the pattern the
//! electrode-layout workflow needs: a line containing `CIRCLE` opens an
//! entity, and group-code marker lines containing ` 10`, ` 20` or ` 40`
//! announce that the next line holds the center x, center y or radius.
//! Group code ` 40` is the terminal attribute and closes the entity.
//!
//! Matching is substring-based rather than column-exact, so a value or
//! comment line that happens to contain a marker can trigger a false
//! positive. The behavior is kept deliberately for compatibility with the
//! CAD exports this tool has always consumed.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::parser::schema::{radius_matches, round1, round2, Circle};

#[derive(Debug, Error)]
pub enum DxfScanError {
    #[error("failed to read DXF file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which value the scanner expects on the next line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    X,
    Y,
    Radius,
}

/// Extract circle records from a DXF file.
///
/// Returns one record per recognized `CIRCLE` entity in file order, with
/// x/y rounded to 2 decimals and r to 1, optionally filtered to a target
/// radius, then deduplicated by (x, y) keeping the first occurrence.
///
/// A value line that fails to parse yields `NaN` for that field rather
/// than an error; callers should treat `NaN` as "unparsed".
pub fn extract_circles(
    path: &Path,
    target_radius: Option<f64>,
) -> Result<Vec<Circle>, DxfScanError> {
    let content = fs::read_to_string(path).map_err(|source| DxfScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_circles_str(&content, target_radius))
}

/// String-level extraction core; see [`extract_circles`].
pub fn extract_circles_str(content: &str, target_radius: Option<f64>) -> Vec<Circle> {
    let (xs, ys, rs) = scan_fields(content);

    // A malformed entity can leave the field sequences ragged; records
    // exist only over the common prefix.
    let count = xs.len().min(ys.len()).min(rs.len());
    let mut circles: Vec<Circle> = (0..count)
        .map(|i| Circle::new(xs[i], ys[i], rs[i]))
        .collect();

    if let Some(target) = target_radius {
        let target = round1(target);
        circles.retain(|c| radius_matches(c.r, target));
    }

    dedup_by_center(circles)
}

fn scan_fields(content: &str) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut rs = Vec::new();

    let mut in_circle = false;
    let mut pending: Option<Pending> = None;

    for line in content.lines() {
        if let Some(field) = pending.take() {
            let value = match line.trim().parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    debug!(line, "unparsable value line, recording NaN");
                    f64::NAN
                }
            };
            match field {
                Pending::X => xs.push(round2(value)),
                Pending::Y => ys.push(round2(value)),
                Pending::Radius => rs.push(round1(value)),
            }
            continue;
        }

        if line.contains("CIRCLE") {
            in_circle = true;
        } else if in_circle {
            if line.contains(" 10") {
                pending = Some(Pending::X);
            } else if line.contains(" 20") {
                pending = Some(Pending::Y);
            } else if line.contains(" 40") {
                pending = Some(Pending::Radius);
                in_circle = false;
            }
        }
    }

    // Marker on the last line of the file: no value line follows.
    if let Some(field) = pending {
        match field {
            Pending::X => xs.push(f64::NAN),
            Pending::Y => ys.push(f64::NAN),
            Pending::Radius => rs.push(f64::NAN),
        }
    }

    (xs, ys, rs)
}

fn dedup_by_center(circles: Vec<Circle>) -> Vec<Circle> {
    let mut seen = std::collections::HashSet::new();
    let mut unique = Vec::with_capacity(circles.len());
    for circle in circles {
        if seen.insert((circle.x.to_bits(), circle.y.to_bits())) {
            unique.push(circle);
        }
    }
    unique
}
