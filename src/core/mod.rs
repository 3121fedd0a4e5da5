//! Core module containing the fundamental types of the accessor
//!
//! Provides address handling, region snapshots, the located RAM
//! geometry, and the error taxonomy used throughout the crate.

pub mod types;

pub use types::{
    AccessError, AccessResult, Address, ProcessId, Protection, RamGeometry, RegionDescriptor,
    ShareMode,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(not(target_pointer_width = "64"))]
compile_error!("dolphin-memaccess requires a 64-bit host");
