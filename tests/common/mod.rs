//! Synthetic backend used by the integration tests
//!
//! Models a target process as a region list plus byte pools, so the
//! whole session surface can be exercised without a live emulator.

#![allow(dead_code)]

use dolphin_memaccess::{
    AccessError, AccessResult, Address, ProcessBackend, ProcessId, ProcessInfo, Protection,
    RegionDescriptor, ShareMode,
};
use std::cell::{Cell, RefCell};

/// One contiguous writable byte range in the fake target
pub struct FakePool {
    pub base: u64,
    pub bytes: RefCell<Vec<u8>>,
}

impl FakePool {
    pub fn new(base: u64, size: usize) -> Self {
        FakePool {
            base,
            bytes: RefCell::new(vec![0u8; size]),
        }
    }

    fn contains_range(&self, address: u64, len: usize) -> bool {
        let end = self.base + self.bytes.borrow().len() as u64;
        address >= self.base && address + len as u64 <= end
    }
}

pub struct FakeBackend {
    pub processes: Vec<ProcessInfo>,
    pub regions: Vec<RegionDescriptor>,
    pub pools: Vec<FakePool>,
    /// When set, the debug-attach phase is denied with this reason
    pub deny_attach: Option<&'static str>,
    /// When set, the nth region query (1-based) fails
    pub fail_region_query_at: Option<usize>,
    pub region_queries: Cell<usize>,
    attached: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        FakeBackend {
            processes: vec![ProcessInfo::new(200, "Dolphin")],
            regions: Vec::new(),
            pools: Vec::new(),
            deny_attach: None,
            fail_region_query_at: None,
            region_queries: Cell::new(0),
            attached: false,
        }
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessBackend for FakeBackend {
    fn processes(&self) -> AccessResult<Vec<ProcessInfo>> {
        Ok(self.processes.clone())
    }

    fn attach(&mut self, pid: ProcessId) -> AccessResult<()> {
        if let Some(reason) = self.deny_attach {
            return Err(AccessError::attach_failed(pid, reason));
        }
        if !self.processes.iter().any(|p| p.pid == pid) {
            return Err(AccessError::attach_failed(pid, "no such process"));
        }
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn region_at(&self, address: u64) -> Option<RegionDescriptor> {
        if !self.attached {
            return None;
        }
        let step = self.region_queries.get() + 1;
        self.region_queries.set(step);
        if self.fail_region_query_at == Some(step) {
            return None;
        }
        self.regions
            .iter()
            .find(|r| r.end_address() > address)
            .copied()
    }

    fn read_at(&self, address: u64, buffer: &mut [u8]) -> AccessResult<()> {
        if !self.attached {
            return Err(AccessError::NotAttached);
        }
        for pool in &self.pools {
            if pool.contains_range(address, buffer.len()) {
                let bytes = pool.bytes.borrow();
                let start = (address - pool.base) as usize;
                buffer.copy_from_slice(&bytes[start..start + buffer.len()]);
                return Ok(());
            }
        }
        Err(AccessError::read_failed(
            Address::new(address),
            buffer.len(),
            "unmapped in fake target",
        ))
    }

    fn write_at(&self, address: u64, data: &[u8]) -> AccessResult<()> {
        if !self.attached {
            return Err(AccessError::NotAttached);
        }
        for pool in &self.pools {
            if pool.contains_range(address, data.len()) {
                let mut bytes = pool.bytes.borrow_mut();
                let start = (address - pool.base) as usize;
                bytes[start..start + data.len()].copy_from_slice(data);
                return Ok(());
            }
        }
        Err(AccessError::write_failed(
            Address::new(address),
            data.len(),
            "unmapped in fake target",
        ))
    }
}

/// Region shaped like a mapped RAM pool in a real target
pub fn true_shared_region(
    address: u64,
    size: u64,
    backing_offset: u64,
    object_id: u32,
) -> RegionDescriptor {
    RegionDescriptor {
        address,
        size,
        protection: Protection::READ_WRITE,
        max_protection: Protection::READ_WRITE,
        share_mode: ShareMode::TrueShared,
        object_id,
        backing_offset,
    }
}

/// Same-sized region that must not qualify as a pool
pub fn decoy_region(address: u64, size: u64) -> RegionDescriptor {
    RegionDescriptor {
        share_mode: ShareMode::Private,
        ..true_shared_region(address, size, 0, 7)
    }
}
