//! Host-platform seam for process inspection
//!
//! One concrete implementation exists per host platform and is selected
//! at build time; the rest of the crate is written against the
//! [`ProcessBackend`] trait so the pure logic stays host-independent.

use crate::core::types::{AccessResult, ProcessId, RegionDescriptor};
use crate::process::ProcessInfo;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::MachBackend;

/// Backend for the current build target
#[cfg(target_os = "macos")]
pub type HostBackend = MachBackend;

/// Capability to find, attach to, scan, and access a target process.
///
/// Every operation is synchronous and blocks the calling thread for the
/// duration of the underlying platform call. Implementations perform no
/// internal locking; ordering between `attach`, scanning, and reads or
/// writes is caller-enforced.
pub trait ProcessBackend {
    /// Snapshot of the host's process table
    fn processes(&self) -> AccessResult<Vec<ProcessInfo>>;

    /// Acquires inspection rights on the target: a debug-attach probe
    /// followed by memory-access-handle acquisition with a degraded
    /// fallback. The target keeps running throughout. Acquiring rights
    /// twice without detaching must not be attempted.
    fn attach(&mut self, pid: ProcessId) -> AccessResult<()>;

    /// Releases any held inspection rights; idempotent and safe to call
    /// when never attached.
    fn detach(&mut self);

    /// Whether inspection rights are currently held
    fn is_attached(&self) -> bool;

    /// Queries the target's map for the region at or above `address`.
    /// `None` means the query failed, which iteration treats as the end
    /// of the address space.
    fn region_at(&self, address: u64) -> Option<RegionDescriptor>;

    /// Reads exactly `buffer.len()` bytes at an absolute address. A
    /// short transfer is a full failure.
    fn read_at(&self, address: u64, buffer: &mut [u8]) -> AccessResult<()>;

    /// Writes all of `data` at an absolute address
    fn write_at(&self, address: u64, data: &[u8]) -> AccessResult<()>;
}
