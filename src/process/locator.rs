//! Target process discovery

use crate::config::ProcessConfig;
use crate::core::types::{AccessError, AccessResult, ProcessId};
use crate::platform::ProcessBackend;
use crate::process::ProcessInfo;
use tracing::debug;

/// Picks the target pid out of a process-table snapshot.
///
/// With an override name configured, only the override is compared; the
/// default name set is ignored entirely. Names must match exactly. When
/// the table (incorrectly) holds several matches, the last one wins;
/// callers must not assume first-match semantics.
pub fn match_pid(processes: &[ProcessInfo], config: &ProcessConfig) -> Option<ProcessId> {
    let mut found = None;
    for process in processes {
        let matched = match &config.override_name {
            Some(name) => process.name == *name,
            None => config.names.iter().any(|n| *n == process.name),
        };
        if matched {
            found = Some(process.pid);
        }
    }
    found
}

/// Scans the host's process table for the configured emulator process.
/// No side effects besides the table read.
pub fn find_pid<B: ProcessBackend>(backend: &B, config: &ProcessConfig) -> AccessResult<ProcessId> {
    let processes = backend.processes()?;
    debug!(count = processes.len(), "scanned process table");

    match_pid(&processes, config)
        .ok_or_else(|| AccessError::ProcessNotFound(config.describe_targets()))
}
