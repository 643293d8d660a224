//! Channel remap files.
//!
//! A remap file reorders extracted channels to match the physical wiring
//! of a connector: one `source: destination` pair per line, 1-based
//! channel numbers, with blank lines and `#` comments ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::parser::schema::Circle;

#[derive(Debug, Error)]
pub enum RemapError {
    #[error("failed to read remap file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid remap entry at line {line}: {content:?}")]
    InvalidEntry { line: usize, content: String },
}

/// Parse a remap file into a source-to-destination channel map.
pub fn parse_remap_file(path: &Path) -> Result<BTreeMap<usize, usize>, RemapError> {
    let content = fs::read_to_string(path).map_err(|source| RemapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_remap_str(&content)
}

/// String-level parsing core; see [`parse_remap_file`].
pub fn parse_remap_str(content: &str) -> Result<BTreeMap<usize, usize>, RemapError> {
    let mut map = BTreeMap::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let invalid = || RemapError::InvalidEntry {
            line: idx + 1,
            content: raw.to_string(),
        };
        let (source, destination) = line.split_once(':').ok_or_else(|| invalid())?;
        let source: usize = source.trim().parse().map_err(|_| invalid())?;
        let destination: usize = destination.trim().parse().map_err(|_| invalid())?;
        map.insert(source, destination);
    }

    Ok(map)
}

/// Apply a channel remap to an ordered coordinate list.
///
/// Channel numbers are 1-based positions in the list. For each
/// `source: destination` pair, the destination channel receives the source
/// channel's coordinates; channels not named as a destination keep their
/// own. Out-of-range channels are ignored.
pub fn apply_remap(circles: &[Circle], map: &BTreeMap<usize, usize>) -> Vec<Circle> {
    let mut remapped = circles.to_vec();

    for (&source, &destination) in map {
        if source == 0
            || destination == 0
            || source > circles.len()
            || destination > circles.len()
        {
            warn!(
                source,
                destination,
                channels = circles.len(),
                "remap entry out of range, ignoring"
            );
            continue;
        }
        remapped[destination - 1] = circles[source - 1];
    }

    remapped
}
