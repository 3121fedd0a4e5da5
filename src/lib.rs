//! dolphin-memaccess: access the emulated console's RAM inside a
//! running Dolphin process
//!
//! The flow is process discovery, privilege acquisition, virtual-memory
//! map enumeration, heuristic region classification, then offset-based
//! guarded reads and writes with optional byte-order conversion. One
//! accessor session owns one target process; there is no internal
//! synchronization.

pub mod config;
pub mod core;
pub mod memory;
pub mod platform;
pub mod process;

pub use crate::config::{Config, LayoutConfig, ProcessConfig};
pub use crate::core::types::{
    AccessError, AccessResult, Address, ProcessId, Protection, RamGeometry, RegionDescriptor,
    ShareMode,
};
pub use crate::memory::{MemoryAccessor, RamClassifier, RegionScanner};
pub use crate::platform::ProcessBackend;
pub use crate::process::ProcessInfo;

#[cfg(target_os = "macos")]
pub use crate::platform::MachBackend;
