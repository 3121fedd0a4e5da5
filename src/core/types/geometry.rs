//! Located RAM geometry of the target emulator

/// Host addresses of the emulated console's RAM pools, populated by a
/// single run of the classifier.
///
/// `primary_start == 0` is the "not yet located" sentinel; a located
/// primary pool never legitimately sits at address 0 in a sane target
/// address space. `auxiliary_accessible` and `extended_present` are
/// mutually exclusive: the target maps either an auxiliary pool (older
/// console generation) or an extended pool (later generation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RamGeometry {
    /// Host address of the primary pool (MEM1)
    pub primary_start: u64,
    /// Host address of the auxiliary pool (ARAM), 0 when absent
    pub auxiliary_start: u64,
    /// Whether the auxiliary pool was found and is addressable
    pub auxiliary_accessible: bool,
    /// Host address of the extended pool (MEM2), 0 when absent
    pub extended_start: u64,
    /// Whether the extended pool is mapped in the target
    pub extended_present: bool,
}

impl RamGeometry {
    /// True once the primary pool has been located
    pub fn located(&self) -> bool {
        self.primary_start != 0
    }

    /// Distance from the primary pool to the extended pool in host
    /// address space; 0 when no extended pool is mapped.
    pub fn primary_to_extended_distance(&self) -> u64 {
        if !self.extended_present {
            return 0;
        }
        self.extended_start - self.primary_start
    }

    /// Drops the auxiliary pool registration. Extended-pool presence
    /// always overrides auxiliary accessibility.
    pub fn clear_auxiliary(&mut self) {
        self.auxiliary_start = 0;
        self.auxiliary_accessible = false;
    }

    /// Resets to the zero-valued "not located" state
    pub fn reset(&mut self) {
        *self = RamGeometry::default();
    }

    /// Invariant check: auxiliary and extended pools never coexist
    pub fn is_consistent(&self) -> bool {
        !(self.auxiliary_accessible && self.extended_present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unlocated() {
        let geometry = RamGeometry::default();
        assert!(!geometry.located());
        assert!(geometry.is_consistent());
        assert_eq!(geometry.primary_to_extended_distance(), 0);
    }

    #[test]
    fn test_extended_distance() {
        let geometry = RamGeometry {
            primary_start: 0x11E800000,
            extended_start: 0x120800000,
            extended_present: true,
            ..RamGeometry::default()
        };
        assert_eq!(geometry.primary_to_extended_distance(), 0x2000000);
    }

    #[test]
    fn test_clear_auxiliary() {
        let mut geometry = RamGeometry {
            primary_start: 0x11E800000,
            auxiliary_start: 0x120840000,
            auxiliary_accessible: true,
            ..RamGeometry::default()
        };
        geometry.extended_start = 0x130000000;
        geometry.extended_present = true;
        assert!(!geometry.is_consistent());

        geometry.clear_auxiliary();
        assert!(geometry.is_consistent());
        assert_eq!(geometry.auxiliary_start, 0);
        assert!(!geometry.auxiliary_accessible);
    }

    #[test]
    fn test_reset() {
        let mut geometry = RamGeometry {
            primary_start: 0x11E800000,
            ..RamGeometry::default()
        };
        geometry.reset();
        assert_eq!(geometry, RamGeometry::default());
    }
}
