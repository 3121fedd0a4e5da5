//! Error types for emulator memory access

use std::fmt;
use thiserror::Error;

/// Attach failure reason reported when the debug-attach probe is denied.
/// Commonly caused by missing local privilege or a code-signing/SIP
/// restriction on the target; surfaced to callers verbatim, never retried.
pub const DEBUG_ATTACH_DENIED: &str = "debug-attach-denied";

/// Attach failure reason reported when neither a full nor a reduced
/// memory-access handle could be acquired for the target.
pub const HANDLE_DENIED: &str = "handle-denied";

/// Main error type for accessor operations
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("No matching emulator process found (looked for {0})")]
    ProcessNotFound(String),

    #[error("Failed to attach to process {pid}: {reason}")]
    AttachFailed { pid: i32, reason: String },

    #[error("Not attached to an emulator process")]
    NotAttached,

    #[error("Emulated RAM has not been located")]
    RamNotLocated,

    #[error("Failed to read {size} bytes at {address}: {reason}")]
    ReadFailed {
        address: String,
        size: usize,
        reason: String,
    },

    #[error("Failed to write {size} bytes at {address}: {reason}")]
    WriteFailed {
        address: String,
        size: usize,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for accessor operations
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Creates an attach failure for a process
    pub fn attach_failed(pid: i32, reason: impl Into<String>) -> Self {
        AccessError::AttachFailed {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates a read failed error
    pub fn read_failed(address: impl fmt::Display, size: usize, reason: impl Into<String>) -> Self {
        AccessError::ReadFailed {
            address: address.to_string(),
            size,
            reason: reason.into(),
        }
    }

    /// Creates a write failed error
    pub fn write_failed(
        address: impl fmt::Display,
        size: usize,
        reason: impl Into<String>,
    ) -> Self {
        AccessError::WriteFailed {
            address: address.to_string(),
            size,
            reason: reason.into(),
        }
    }

}
