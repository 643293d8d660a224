pub mod pcb;

// Re-export for convenience
pub use pcb::{
    rewrite_locations, update_footprint_locations, PcbUpdateError, UpdateOptions, UpdateReport,
};
