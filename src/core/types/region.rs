//! Virtual-memory region snapshot types

/// Share classification of a mapped region, mirroring the kernel's
/// share-mode values. The emulator maps console RAM as a shared, named
/// backing object, so `TrueShared` is the strong discriminator the
/// classifier keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareMode {
    Cow,
    Private,
    Empty,
    Shared,
    TrueShared,
    PrivateAliased,
    SharedAliased,
    LargePage,
    Unknown(u8),
}

impl ShareMode {
    /// Maps a raw kernel share-mode value to the enum
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => ShareMode::Cow,
            2 => ShareMode::Private,
            3 => ShareMode::Empty,
            4 => ShareMode::Shared,
            5 => ShareMode::TrueShared,
            6 => ShareMode::PrivateAliased,
            7 => ShareMode::SharedAliased,
            8 => ShareMode::LargePage,
            other => ShareMode::Unknown(other),
        }
    }
}

/// Page protection bits for a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Protection(pub i32);

impl Protection {
    pub const NONE: Protection = Protection(0);
    pub const READ: Protection = Protection(0x1);
    pub const WRITE: Protection = Protection(0x2);
    pub const EXECUTE: Protection = Protection(0x4);
    pub const READ_WRITE: Protection = Protection(0x1 | 0x2);

    /// Creates a protection value from raw kernel bits
    pub const fn from_raw(raw: i32) -> Self {
        Protection(raw)
    }

    pub const fn allows_read(&self) -> bool {
        self.0 & Self::READ.0 != 0
    }

    pub const fn allows_write(&self) -> bool {
        self.0 & Self::WRITE.0 != 0
    }

    /// True when the bits are exactly read + write, nothing else. The
    /// classifier requires this of a pool candidate's maximum protection.
    pub const fn is_exactly_read_write(&self) -> bool {
        self.0 == Self::READ_WRITE.0
    }
}

/// Immutable snapshot of one virtual-memory region in the target process.
/// Produced transiently during scanning; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionDescriptor {
    /// Base address of the region
    pub address: u64,
    /// Size of the region in bytes
    pub size: u64,
    /// Current protection of the region
    pub protection: Protection,
    /// Maximum permitted protection of the region
    pub max_protection: Protection,
    /// Share classification
    pub share_mode: ShareMode,
    /// Opaque identity of the backing memory object; shared by all
    /// regions mapping the same object
    pub object_id: u32,
    /// Offset of this region within its backing object
    pub backing_offset: u64,
}

impl RegionDescriptor {
    /// End address of the region (exclusive)
    pub fn end_address(&self) -> u64 {
        self.address.saturating_add(self.size)
    }

    /// Checks whether an address falls within this region
    pub fn contains(&self, address: u64) -> bool {
        address >= self.address && address < self.end_address()
    }
}
