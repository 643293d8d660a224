pub mod dxf;
pub mod remap;
pub mod schema;

// Re-export for convenience
pub use dxf::{extract_circles, extract_circles_str, DxfScanError};
pub use remap::{apply_remap, parse_remap_file, parse_remap_str, RemapError};
pub use schema::{classify_circles, Circle, LabeledCircle, RadiusClass};
