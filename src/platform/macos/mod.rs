//! macOS backend built on mach task ports
//!
//! Inspection rights are acquired in two phases, mirroring what the host
//! security policy checks: a ptrace debug-attach probe (the target keeps
//! running), then a task port with a full grant or a name-only fallback.

pub mod bindings;

use crate::core::types::error::HANDLE_DENIED;
use crate::core::types::{AccessError, AccessResult, ProcessId, RegionDescriptor};
use crate::platform::ProcessBackend;
use crate::process::ProcessInfo;
use bindings::TaskAccess;
use mach2::port::mach_port_t;
use tracing::{info, warn};

struct TaskHandle {
    port: mach_port_t,
    access: TaskAccess,
    pid: ProcessId,
}

/// Process backend for macOS hosts
pub struct MachBackend {
    task: Option<TaskHandle>,
}

impl MachBackend {
    pub fn new() -> Self {
        MachBackend { task: None }
    }

    /// Grant level of the currently held task port, if any
    pub fn access(&self) -> Option<TaskAccess> {
        self.task.as_ref().map(|t| t.access)
    }

    fn release(&mut self) {
        if let Some(task) = self.task.take() {
            bindings::release_task_port(task.port);
            info!(pid = task.pid, "released task port");
        }
    }
}

impl Default for MachBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessBackend for MachBackend {
    fn processes(&self) -> AccessResult<Vec<ProcessInfo>> {
        bindings::process_table()
    }

    fn attach(&mut self, pid: ProcessId) -> AccessResult<()> {
        self.release();

        bindings::debug_attach_probe(pid)?;

        match bindings::acquire_task_port(pid) {
            Ok((port, access)) => {
                if access == TaskAccess::NameOnly {
                    warn!(pid, "only a name-only task port was granted; memory access will be denied");
                }
                info!(pid, ?access, "acquired task port");
                self.task = Some(TaskHandle { port, access, pid });
                Ok(())
            }
            Err(code) => {
                warn!(pid, code, "task port acquisition denied");
                Err(AccessError::attach_failed(pid, HANDLE_DENIED))
            }
        }
    }

    fn detach(&mut self) {
        self.release();
    }

    fn is_attached(&self) -> bool {
        self.task.is_some()
    }

    fn region_at(&self, address: u64) -> Option<RegionDescriptor> {
        let task = self.task.as_ref()?;
        bindings::region_at(task.port, address)
    }

    fn read_at(&self, address: u64, buffer: &mut [u8]) -> AccessResult<()> {
        let task = self.task.as_ref().ok_or(AccessError::NotAttached)?;
        bindings::read_exact(task.port, address, buffer)
    }

    fn write_at(&self, address: u64, data: &[u8]) -> AccessResult<()> {
        let task = self.task.as_ref().ok_or(AccessError::NotAttached)?;
        bindings::write_all(task.port, address, data)
    }
}

impl Drop for MachBackend {
    fn drop(&mut self) {
        self.release();
    }
}
