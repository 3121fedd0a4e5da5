//! Heuristic classification of the target's regions into RAM pools

use crate::config::LayoutConfig;
use crate::core::types::{RamGeometry, RegionDescriptor, ShareMode};
use tracing::{debug, info};

/// Classifies a region sequence into the located RAM geometry.
///
/// The emulator maps console RAM as one shared, named backing object, so
/// candidacy hinges on the share classification and the backing-object
/// identity rather than on sizes alone: same-sized decoy regions are
/// common in a large address space. The scan always runs across the full
/// sequence: the true pool may appear after decoys, and a later
/// qualifying region with a matching identity reinforces the candidate.
pub struct RamClassifier<'a> {
    layout: &'a LayoutConfig,
}

impl<'a> RamClassifier<'a> {
    pub fn new(layout: &'a LayoutConfig) -> Self {
        RamClassifier { layout }
    }

    /// Consumes one scan sequence and produces the geometry. Returns a
    /// geometry with `located() == false` when the primary pool was not
    /// found; pool absence alone is not an error, and an incomplete scan
    /// is tolerated.
    pub fn classify(&self, regions: impl IntoIterator<Item = RegionDescriptor>) -> RamGeometry {
        let mut geometry = RamGeometry::default();
        let mut candidate_object: Option<u32> = None;
        let secondary_offset = self.layout.secondary_backing_offset();

        for region in regions {
            if !geometry.extended_present
                && region.size == self.layout.mem2_size
                && region.backing_offset == secondary_offset
            {
                geometry.extended_present = true;
                geometry.extended_start = region.address;
                debug!(address = format_args!("{:#x}", region.address), "extended pool indicator");
            }

            let identity_ok = match candidate_object {
                Some(object_id) => object_id == region.object_id,
                None => true,
            };

            if identity_ok
                && region.size == self.layout.mem1_size
                && region.share_mode == ShareMode::TrueShared
                && region.max_protection.is_exactly_read_write()
            {
                if region.backing_offset == 0 {
                    geometry.primary_start = region.address;
                    debug!(address = format_args!("{:#x}", region.address), "primary pool candidate");
                } else if region.backing_offset == secondary_offset {
                    geometry.auxiliary_start = region.address;
                    geometry.auxiliary_accessible = true;
                    debug!(address = format_args!("{:#x}", region.address), "auxiliary pool candidate");
                }

                candidate_object = Some(region.object_id);
            }
        }

        // Extended-pool presence always overrides auxiliary accessibility
        if geometry.extended_present {
            geometry.clear_auxiliary();
        }

        if geometry.located() {
            info!(
                primary = format_args!("{:#x}", geometry.primary_start),
                auxiliary = geometry.auxiliary_accessible,
                extended = geometry.extended_present,
                "located emulated RAM"
            );
        } else {
            debug!("emulated RAM not located in this scan");
        }

        geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Protection;

    fn layout() -> LayoutConfig {
        LayoutConfig::default()
    }

    fn pool_region(address: u64, size: u64, backing_offset: u64, object_id: u32) -> RegionDescriptor {
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

    #[test]
    fn test_primary_alone() {
        let layout = layout();
        let classifier = RamClassifier::new(&layout);

        let geometry =
            classifier.classify(vec![pool_region(0x11E800000, layout.mem1_size, 0, 42)]);

        assert!(geometry.located());
        assert_eq!(geometry.primary_start, 0x11E800000);
        assert!(!geometry.auxiliary_accessible);
        assert!(!geometry.extended_present);
    }

    #[test]
    fn test_decoy_wrong_share_mode_is_ignored() {
        let layout = layout();
        let classifier = RamClassifier::new(&layout);

        let decoy = RegionDescriptor {
            share_mode: ShareMode::Private,
            ..pool_region(0x100000000, layout.mem1_size, 0, 7)
        };
        let real = pool_region(0x11E800000, layout.mem1_size, 0, 42);

        let geometry = classifier.classify(vec![decoy, real]);
        assert_eq!(geometry.primary_start, 0x11E800000);
    }

    #[test]
    fn test_decoy_wrong_max_protection_is_ignored() {
        let layout = layout();
        let classifier = RamClassifier::new(&layout);

        let decoy = RegionDescriptor {
            max_protection: Protection::from_raw(0x7),
            ..pool_region(0x100000000, layout.mem1_size, 0, 7)
        };
        let real = pool_region(0x11E800000, layout.mem1_size, 0, 42);

        let geometry = classifier.classify(vec![decoy, real]);
        assert_eq!(geometry.primary_start, 0x11E800000);
    }

    #[test]
    fn test_auxiliary_registered_with_matching_identity() {
        let layout = layout();
        let classifier = RamClassifier::new(&layout);

        let primary = pool_region(0x11E800000, layout.mem1_size, 0, 42);
        let auxiliary = pool_region(
            0x120840000,
            layout.mem1_size,
            layout.secondary_backing_offset(),
            42,
        );

        let geometry = classifier.classify(vec![primary, auxiliary]);
        assert_eq!(geometry.primary_start, 0x11E800000);
        assert!(geometry.auxiliary_accessible);
        assert_eq!(geometry.auxiliary_start, 0x120840000);
        assert!(geometry.is_consistent());
    }

    #[test]
    fn test_mismatched_identity_is_rejected() {
        let layout = layout();
        let classifier = RamClassifier::new(&layout);

        let primary = pool_region(0x11E800000, layout.mem1_size, 0, 42);
        // Same size and offset as a plausible auxiliary pool, different object
        let impostor = pool_region(
            0x200000000,
            layout.mem1_size,
            layout.secondary_backing_offset(),
            99,
        );

        let geometry = classifier.classify(vec![primary, impostor]);
        assert_eq!(geometry.primary_start, 0x11E800000);
        assert!(!geometry.auxiliary_accessible);
    }

    #[test]
    fn test_extended_pool_suppresses_auxiliary() {
        let layout = layout();
        let classifier = RamClassifier::new(&layout);

        let primary = pool_region(0x11E800000, layout.mem1_size, 0, 42);
        let auxiliary = pool_region(
            0x120840000,
            layout.mem1_size,
            layout.secondary_backing_offset(),
            42,
        );
        let extended = RegionDescriptor {
            share_mode: ShareMode::TrueShared,
            ..pool_region(
                0x130000000,
                layout.mem2_size,
                layout.secondary_backing_offset(),
                42,
            )
        };

        let geometry = classifier.classify(vec![primary, auxiliary, extended]);
        assert!(geometry.extended_present);
        assert_eq!(geometry.extended_start, 0x130000000);
        assert!(!geometry.auxiliary_accessible);
        assert_eq!(geometry.auxiliary_start, 0);
        assert!(geometry.is_consistent());
    }

    #[test]
    fn test_extended_indicator_before_primary() {
        let layout = layout();
        let classifier = RamClassifier::new(&layout);

        let extended = pool_region(
            0x130000000,
            layout.mem2_size,
            layout.secondary_backing_offset(),
            42,
        );
        let primary = pool_region(0x11E800000, layout.mem1_size, 0, 42);

        let geometry = classifier.classify(vec![extended, primary]);
        assert!(geometry.located());
        assert!(geometry.extended_present);
    }

    #[test]
    fn test_empty_scan_is_tolerated() {
        let layout = layout();
        let classifier = RamClassifier::new(&layout);
        let geometry = classifier.classify(Vec::new());
        assert!(!geometry.located());
        assert!(geometry.is_consistent());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let layout = layout();
        let classifier = RamClassifier::new(&layout);

        let regions = vec![
            pool_region(0x11E800000, layout.mem1_size, 0, 42),
            pool_region(
                0x120840000,
                layout.mem1_size,
                layout.secondary_backing_offset(),
                42,
            ),
        ];

        let first = classifier.classify(regions.clone());
        let second = classifier.classify(regions);
        assert_eq!(first, second);
    }
}
