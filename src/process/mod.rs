//! Target process discovery
//!
//! Enumerating the host's process table is a platform concern handled by
//! the backend; the matching rules against configured names live here.

pub mod info;
pub mod locator;

pub use info::ProcessInfo;
pub use locator::{find_pid, match_pid};
