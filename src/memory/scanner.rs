//! Lazy enumeration of the target's virtual-memory map

use crate::core::types::RegionDescriptor;
use crate::platform::ProcessBackend;

/// Forward-only iterator over the target's mapped regions in ascending
/// address order.
///
/// Each step queries the map starting at the previous region's end. The
/// first failed query ends iteration for good; a premature platform
/// failure mid-scan is indistinguishable from reaching the end of the
/// address space, and consumers must tolerate an incomplete sequence.
/// Restart only by constructing a new scanner.
pub struct RegionScanner<'a, B: ProcessBackend + ?Sized> {
    backend: &'a B,
    cursor: u64,
    done: bool,
}

impl<'a, B: ProcessBackend + ?Sized> RegionScanner<'a, B> {
    /// Creates a scanner starting at address 0
    pub fn new(backend: &'a B) -> Self {
        RegionScanner {
            backend,
            cursor: 0,
            done: false,
        }
    }
}

impl<'a, B: ProcessBackend + ?Sized> Iterator for RegionScanner<'a, B> {
    type Item = RegionDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.backend.region_at(self.cursor) {
            Some(region) => {
                match region.address.checked_add(region.size) {
                    Some(end) => self.cursor = end,
                    None => self.done = true,
                }
                Some(region)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
