//! Process table entry

use crate::core::types::ProcessId;

/// One entry from the host's process table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    /// Process identifier
    pub pid: ProcessId,
    /// Short name as reported by the kernel (truncated command name,
    /// not a path)
    pub name: String,
}

impl ProcessInfo {
    /// Creates a new process info entry
    pub fn new(pid: ProcessId, name: impl Into<String>) -> Self {
        ProcessInfo {
            pid,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_info_new() {
        let info = ProcessInfo::new(1234, "Dolphin");
        assert_eq!(info.pid, 1234);
        assert_eq!(info.name, "Dolphin");
    }
}
