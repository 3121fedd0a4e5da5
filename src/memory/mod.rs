//! Locating and accessing the emulated console's RAM pools
//!
//! The flow is: scan the target's virtual-memory map, classify the
//! regions into the RAM geometry, then translate logical offsets to
//! host addresses for guarded reads and writes.

pub mod accessor;
pub mod classifier;
pub mod diagnostics;
pub mod scanner;
pub mod swap;
pub mod translator;

pub use accessor::MemoryAccessor;
pub use classifier::RamClassifier;
pub use diagnostics::{probe_candidates, ProbeMatch, ProbeReport};
pub use scanner::RegionScanner;
pub use swap::{swap_in_place, swapped};
pub use translator::translate;
