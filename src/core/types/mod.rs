//! Fundamental types shared across the accessor

pub mod address;
pub mod error;
pub mod geometry;
pub mod region;

pub use address::Address;
pub use error::{AccessError, AccessResult, DEBUG_ATTACH_DENIED, HANDLE_DENIED};
pub use geometry::RamGeometry;
pub use region::{Protection, RegionDescriptor, ShareMode};

/// Process identifier in the host's process table
pub type ProcessId = i32;
