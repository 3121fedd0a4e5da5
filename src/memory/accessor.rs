//! Session facade over one target emulator process
//!
//! Owns the inspection-rights handle and the located RAM geometry for
//! exactly one session; no concurrent session may share either. All
//! operations are synchronous and unsynchronized; ordering between
//! attach, classification, and subsequent accesses is caller-enforced.

use crate::config::Config;
use crate::core::types::{AccessError, AccessResult, ProcessId, RamGeometry};
use crate::memory::classifier::RamClassifier;
use crate::memory::scanner::RegionScanner;
use crate::memory::swap;
use crate::memory::translator::translate;
use crate::platform::ProcessBackend;
use crate::process::locator;
use tracing::{debug, warn};

/// Single-consumer accessor for one emulator process
pub struct MemoryAccessor<B: ProcessBackend> {
    backend: B,
    config: Config,
    pid: Option<ProcessId>,
    geometry: RamGeometry,
}

impl<B: ProcessBackend> MemoryAccessor<B> {
    /// Creates an accessor over an explicit backend
    pub fn with_backend(backend: B, config: Config) -> Self {
        MemoryAccessor {
            backend,
            config,
            pid: None,
            geometry: RamGeometry::default(),
        }
    }

    /// Scans the host's process table for the configured emulator
    /// process and remembers its pid
    pub fn find_pid(&mut self) -> AccessResult<ProcessId> {
        let pid = locator::find_pid(&self.backend, &self.config.process)?;
        self.pid = Some(pid);
        Ok(pid)
    }

    /// Attaches to the located process and classifies its RAM mapping.
    ///
    /// Re-attaching invalidates any previously located geometry before
    /// the new scan. Returns `Ok(false)` when the scan completed without
    /// locating the primary pool, a normal "not located yet" outcome
    /// (typically the emulator has not loaded a game); callers may retry
    /// at will.
    pub fn attach_and_locate(&mut self) -> AccessResult<bool> {
        let pid = match self.pid {
            Some(pid) => pid,
            None => self.find_pid()?,
        };

        if self.backend.is_attached() {
            self.backend.detach();
        }
        self.geometry.reset();

        self.backend.attach(pid)?;
        debug!(pid, "attached, scanning address space");

        let geometry = {
            let classifier = RamClassifier::new(&self.config.layout);
            classifier.classify(RegionScanner::new(&self.backend))
        };
        self.geometry = geometry;

        if !geometry.located() {
            warn!(pid, "scan completed without locating emulated RAM");
        }
        Ok(geometry.located())
    }

    /// Releases inspection rights; idempotent and safe to call when
    /// never attached. Invalidates the located geometry.
    pub fn detach(&mut self) {
        self.backend.detach();
        self.geometry.reset();
    }

    /// Whether the primary pool has been located
    pub fn has_ram(&self) -> bool {
        self.geometry.located()
    }

    /// The located geometry of the current session
    pub fn geometry(&self) -> &RamGeometry {
        &self.geometry
    }

    /// The pid found by the last successful `find_pid`
    pub fn pid(&self) -> Option<ProcessId> {
        self.pid
    }

    /// Reads `size` bytes at a logical console-RAM offset. With `swap`
    /// set and a size of 2, 4, or 8 the result is byte-order-reversed
    /// as a single integer of that width.
    pub fn read_ram(&self, offset: u32, size: usize, swap_bytes: bool) -> AccessResult<Vec<u8>> {
        if !self.geometry.located() {
            return Err(AccessError::RamNotLocated);
        }
        let address = translate(offset, &self.geometry, &self.config.layout);
        let mut buffer = vec![0u8; size];
        self.backend.read_at(address, &mut buffer)?;
        if swap_bytes {
            swap::swap_in_place(&mut buffer);
        }
        Ok(buffer)
    }

    /// Writes bytes at a logical console-RAM offset. The caller's buffer
    /// is never mutated; an internal copy is swapped before the write.
    pub fn write_ram(&mut self, offset: u32, data: &[u8], swap_bytes: bool) -> AccessResult<()> {
        if !self.geometry.located() {
            return Err(AccessError::RamNotLocated);
        }
        let address = translate(offset, &self.geometry, &self.config.layout);
        if swap_bytes {
            let copy = swap::swapped(data);
            self.backend.write_at(address, &copy)
        } else {
            self.backend.write_at(address, data)
        }
    }

    /// Reads at an absolute host address with no translation. Diagnostic
    /// path only; never part of ordinary offset-based access.
    pub fn read_at_address(&self, address: u64, size: usize) -> AccessResult<Vec<u8>> {
        let mut buffer = vec![0u8; size];
        self.backend.read_at(address, &mut buffer)?;
        Ok(buffer)
    }

    /// Writes at an absolute host address with no translation
    pub fn write_at_address(&mut self, address: u64, data: &[u8]) -> AccessResult<()> {
        self.backend.write_at(address, data)
    }
}

#[cfg(target_os = "macos")]
impl MemoryAccessor<crate::platform::HostBackend> {
    /// Creates an accessor over the host platform's backend
    pub fn new(config: Config) -> Self {
        MemoryAccessor::with_backend(crate::platform::HostBackend::new(), config)
    }
}
