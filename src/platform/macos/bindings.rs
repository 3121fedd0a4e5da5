//! Safe wrappers over the mach and BSD calls the backend needs
//!
//! Everything `unsafe` in the crate lives here. Wrappers return plain
//! `Result`s or `Option`s; callers never see raw kernel structures.

use crate::core::types::error::DEBUG_ATTACH_DENIED;
use crate::core::types::{
    AccessError, AccessResult, Address, ProcessId, Protection, RegionDescriptor, ShareMode,
};
use crate::process::ProcessInfo;
use mach2::kern_return::{kern_return_t, KERN_SUCCESS};
use mach2::mach_port::mach_port_deallocate;
use mach2::message::mach_msg_type_number_t;
use mach2::port::mach_port_t;
use mach2::traps::{mach_task_self, task_for_pid};
use mach2::vm::{mach_vm_read_overwrite, mach_vm_region, mach_vm_write};
use mach2::vm_region::{
    vm_region_basic_info_data_64_t, vm_region_extended_info_data_t, vm_region_info_t,
    vm_region_top_info_data_t, VM_REGION_BASIC_INFO_64, VM_REGION_EXTENDED_INFO,
    VM_REGION_TOP_INFO,
};
use mach2::vm_types::{mach_vm_address_t, mach_vm_size_t, vm_offset_t};
use std::io;
use std::mem;
use std::ptr;
use tracing::warn;

const PT_ATTACH: libc::c_int = 10;
const PT_DETACH: libc::c_int = 11;

extern "C" {
    // Reduced-access sibling of task_for_pid; not exposed by mach2
    fn task_name_for_pid(
        target_task: mach_port_t,
        pid: libc::c_int,
        task: *mut mach_port_t,
    ) -> kern_return_t;
}

/// Grant level of an acquired task port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAccess {
    /// Full memory-access grant (`task_for_pid`)
    Full,
    /// Name-only reduced grant (`task_name_for_pid`); memory access
    /// through it will be denied by the kernel
    NameOnly,
}

fn info_count<T>() -> mach_msg_type_number_t {
    (mem::size_of::<T>() / mem::size_of::<libc::c_int>()) as mach_msg_type_number_t
}

/// Snapshot of the host's process table via `sysctl(KERN_PROC_ALL)`
pub fn process_table() -> AccessResult<Vec<ProcessInfo>> {
    let mut mib = [libc::CTL_KERN, libc::KERN_PROC, libc::KERN_PROC_ALL, 0];
    let mut len: libc::size_t = 0;

    unsafe {
        if libc::sysctl(
            mib.as_mut_ptr(),
            4,
            ptr::null_mut(),
            &mut len,
            ptr::null_mut(),
            0,
        ) == -1
        {
            return Err(AccessError::Io(io::Error::last_os_error()));
        }

        let entry_size = mem::size_of::<libc::kinfo_proc>();
        // Headroom for processes spawned between the two calls
        let capacity = len as usize / entry_size + 16;
        let mut entries: Vec<libc::kinfo_proc> = Vec::with_capacity(capacity);
        len = (capacity * entry_size) as libc::size_t;

        if libc::sysctl(
            mib.as_mut_ptr(),
            4,
            entries.as_mut_ptr() as *mut libc::c_void,
            &mut len,
            ptr::null_mut(),
            0,
        ) == -1
        {
            return Err(AccessError::Io(io::Error::last_os_error()));
        }
        entries.set_len(len as usize / entry_size);

        Ok(entries
            .iter()
            .map(|entry| {
                let raw = &entry.kp_proc.p_comm;
                let bytes: Vec<u8> = raw
                    .iter()
                    .take_while(|&&c| c != 0)
                    .map(|&c| c as u8)
                    .collect();
                ProcessInfo::new(
                    entry.kp_proc.p_pid,
                    String::from_utf8_lossy(&bytes).into_owned(),
                )
            })
            .collect())
    }
}

/// Debug-attach probe: `PT_ATTACH`, reap the stop, then detach again so
/// the target keeps running. Verifies the host security policy permits
/// inspecting the target before any task port is requested.
pub fn debug_attach_probe(pid: ProcessId) -> AccessResult<()> {
    unsafe {
        if libc::ptrace(PT_ATTACH, pid, ptr::null_mut(), 0) != 0 {
            let errno = io::Error::last_os_error();
            warn!(pid, %errno, "ptrace attach denied; is the target re-signed or SIP relaxed?");
            return Err(AccessError::attach_failed(pid, DEBUG_ATTACH_DENIED));
        }
        let mut status: libc::c_int = 0;
        libc::waitpid(pid, &mut status, 0);
        libc::ptrace(PT_DETACH, pid, ptr::null_mut(), 0);
    }
    Ok(())
}

/// Acquires a task port for the pid: full grant first, name-only
/// fallback. Returns the last kernel return code when both are denied.
pub fn acquire_task_port(pid: ProcessId) -> Result<(mach_port_t, TaskAccess), kern_return_t> {
    let mut task: mach_port_t = 0;
    unsafe {
        let code = task_for_pid(mach_task_self(), pid, &mut task);
        if code == KERN_SUCCESS {
            return Ok((task, TaskAccess::Full));
        }
        warn!(pid, code, "task_for_pid denied, trying task_name_for_pid");

        let code = task_name_for_pid(mach_task_self(), pid, &mut task);
        if code == KERN_SUCCESS {
            return Ok((task, TaskAccess::NameOnly));
        }
        Err(code)
    }
}

/// Releases a previously acquired task port
pub fn release_task_port(task: mach_port_t) {
    unsafe {
        mach_port_deallocate(mach_task_self(), task);
    }
}

/// Queries the region at or above `address` in the target's map.
/// Three flavors are needed for one snapshot: extended info for the
/// share mode, basic info for the backing offset and protections, top
/// info for the backing-object identity. Any failed flavor ends the
/// scan, so `None` covers both end-of-space and mid-scan failure.
pub fn region_at(task: mach_port_t, address: u64) -> Option<RegionDescriptor> {
    unsafe {
        let mut region_addr: mach_vm_address_t = address;
        let mut region_size: mach_vm_size_t = 0;
        let mut object_name: mach_port_t = 0;

        let mut extended: vm_region_extended_info_data_t = mem::zeroed();
        let mut count = info_count::<vm_region_extended_info_data_t>();
        if mach_vm_region(
            task,
            &mut region_addr,
            &mut region_size,
            VM_REGION_EXTENDED_INFO,
            &mut extended as *mut _ as vm_region_info_t,
            &mut count,
            &mut object_name,
        ) != KERN_SUCCESS
        {
            return None;
        }

        let mut basic: vm_region_basic_info_data_64_t = mem::zeroed();
        let mut count = info_count::<vm_region_basic_info_data_64_t>();
        let mut basic_addr = region_addr;
        let mut basic_size = region_size;
        if mach_vm_region(
            task,
            &mut basic_addr,
            &mut basic_size,
            VM_REGION_BASIC_INFO_64,
            &mut basic as *mut _ as vm_region_info_t,
            &mut count,
            &mut object_name,
        ) != KERN_SUCCESS
        {
            return None;
        }

        let mut top: vm_region_top_info_data_t = mem::zeroed();
        let mut count = info_count::<vm_region_top_info_data_t>();
        let mut top_addr = region_addr;
        let mut top_size = region_size;
        if mach_vm_region(
            task,
            &mut top_addr,
            &mut top_size,
            VM_REGION_TOP_INFO,
            &mut top as *mut _ as vm_region_info_t,
            &mut count,
            &mut object_name,
        ) != KERN_SUCCESS
        {
            return None;
        }

        Some(RegionDescriptor {
            address: region_addr,
            size: region_size,
            protection: Protection::from_raw(basic.protection),
            max_protection: Protection::from_raw(basic.max_protection),
            share_mode: ShareMode::from_raw(extended.share_mode as u8),
            object_id: top.obj_id,
            backing_offset: basic.offset,
        })
    }
}

/// Reads exactly `buffer.len()` bytes; a short transfer is a failure
pub fn read_exact(task: mach_port_t, address: u64, buffer: &mut [u8]) -> AccessResult<()> {
    let mut read_len: mach_vm_size_t = 0;
    let code = unsafe {
        mach_vm_read_overwrite(
            task,
            address as mach_vm_address_t,
            buffer.len() as mach_vm_size_t,
            buffer.as_mut_ptr() as mach_vm_address_t,
            &mut read_len,
        )
    };

    if code != KERN_SUCCESS {
        return Err(AccessError::read_failed(
            Address::new(address),
            buffer.len(),
            format!("mach_vm_read_overwrite returned {}", code),
        ));
    }
    if read_len as usize != buffer.len() {
        return Err(AccessError::read_failed(
            Address::new(address),
            buffer.len(),
            format!("short transfer ({} bytes)", read_len),
        ));
    }
    Ok(())
}

/// Writes all of `data` at the given address
pub fn write_all(task: mach_port_t, address: u64, data: &[u8]) -> AccessResult<()> {
    let code = unsafe {
        mach_vm_write(
            task,
            address as mach_vm_address_t,
            data.as_ptr() as vm_offset_t,
            data.len() as mach_msg_type_number_t,
        )
    };

    if code != KERN_SUCCESS {
        return Err(AccessError::write_failed(
            Address::new(address),
            data.len(),
            format!("mach_vm_write returned {}", code),
        ));
    }
    Ok(())
}
