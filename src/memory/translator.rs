//! Logical console-RAM offset to absolute host address translation

use crate::config::LayoutConfig;
use crate::core::types::RamGeometry;

/// Maps a logical console-RAM offset to an absolute host address.
///
/// Pure function of `(offset, geometry, layout)`; evaluated in this
/// exact order on every call:
/// 1. auxiliary pool accessible: offsets below the auxiliary fake-size
///    boundary land in the auxiliary pool, the rest in the primary pool
///    shifted down by that boundary;
/// 2. extended pool present and the offset reaches the extended console
///    range: lands in the extended pool;
/// 3. otherwise: primary pool.
///
/// Results are never cached per-offset: the geometry only changes via
/// re-classification, and offsets computed under one geometry must not
/// be mixed with accesses issued after a re-attach invalidates it.
pub fn translate(offset: u32, geometry: &RamGeometry, layout: &LayoutConfig) -> u64 {
    if geometry.auxiliary_accessible {
        if offset < layout.aram_fake_size {
            geometry.auxiliary_start + u64::from(offset)
        } else {
            geometry.primary_start + u64::from(offset - layout.aram_fake_size)
        }
    } else if geometry.extended_present && offset >= layout.console_base_distance() {
        geometry.extended_start + u64::from(offset - layout.console_base_distance())
    } else {
        geometry.primary_start + u64::from(offset)
    }
}
