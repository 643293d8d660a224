//! CSV export of extracted coordinate sets.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::parser::schema::{Circle, LabeledCircle};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode CSV row for {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Serialize)]
struct CoordinateRow {
    channel: usize,
    x: f64,
    y: f64,
    r: f64,
}

#[derive(Serialize)]
struct LabeledRow<'a> {
    label: &'a str,
    channel: usize,
    x: f64,
    y: f64,
    r: f64,
}

/// Write one `channel,x,y,r` row per circle, channels numbered 1..N in
/// list order.
pub fn export_coordinates_csv(path: &Path, circles: &[Circle]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    for (idx, circle) in circles.iter().enumerate() {
        writer
            .serialize(CoordinateRow {
                channel: idx + 1,
                x: circle.x,
                y: circle.y,
                r: circle.r,
            })
            .map_err(|source| ExportError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
    }

    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(count = circles.len(), path = %path.display(), "exported coordinates");
    Ok(())
}

/// Write one `<label>_coordinates.csv` per label into `dir`, in first-seen
/// label order. Returns the paths written.
pub fn export_labeled_csv(dir: &Path, labeled: &[LabeledCircle]) -> Result<Vec<PathBuf>, ExportError> {
    let mut order: Vec<&str> = Vec::new();
    for entry in labeled {
        if !order.contains(&entry.label.as_str()) {
            order.push(entry.label.as_str());
        }
    }

    let mut written = Vec::new();
    for label in order {
        let path = dir.join(format!("{}_coordinates.csv", label));
        let mut writer = csv::Writer::from_path(&path).map_err(|source| ExportError::Csv {
            path: path.clone(),
            source,
        })?;

        for entry in labeled.iter().filter(|e| e.label == label) {
            writer
                .serialize(LabeledRow {
                    label,
                    channel: entry.channel,
                    x: entry.circle.x,
                    y: entry.circle.y,
                    r: entry.circle.r,
                })
                .map_err(|source| ExportError::Csv {
                    path: path.clone(),
                    source,
                })?;
        }

        writer.flush().map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(label, path = %path.display(), "exported labeled coordinates");
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coords.csv");
        let circles = vec![Circle::new(10.5, -20.25, 1.5), Circle::new(30.0, 40.0, 1.5)];

        export_coordinates_csv(&path, &circles).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("channel,x,y,r"));
        assert_eq!(lines.next(), Some("1,10.5,-20.25,1.5"));
        assert_eq!(lines.next(), Some("2,30.0,40.0,1.5"));
    }

    #[test]
    fn test_labeled_export_one_file_per_label() {
        let dir = tempfile::tempdir().unwrap();
        let labeled = vec![
            LabeledCircle {
                label: "electrode".to_string(),
                channel: 1,
                circle: Circle::new(0.0, 0.0, 1.5),
            },
            LabeledCircle {
                label: "mount".to_string(),
                channel: 1,
                circle: Circle::new(5.0, 5.0, 3.0),
            },
        ];

        let written = export_labeled_csv(dir.path(), &labeled).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("electrode_coordinates.csv"));
        assert!(written[1].ends_with("mount_coordinates.csv"));

        let content = std::fs::read_to_string(&written[0]).unwrap();
        assert!(content.starts_with("label,channel,x,y,r"));
        assert!(content.contains("electrode,1,0.0,0.0,1.5"));
    }
}
