use crate::task::{ProcessManager, TrapContext, WaitOptions};
use crate::KernelError;

//主动退出，或者出错由内核终止
pub fn sys_exit(pm: &ProcessManager, exit_code: i32) -> ! {
    pm.exit(pm.getpid(), exit_code);
    pm.processor().exit_current()
}

//调用 sys_yield 主动交出使用权
pub fn sys_yield(pm: &ProcessManager) -> isize {
    pm.processor().yield_now();
    0
}

pub fn sys_getpid(pm: &ProcessManager) -> isize {
    pm.getpid() as isize
}

/// Parent pid, or 0 once the caller has been orphaned.
pub fn sys_getppid(pm: &ProcessManager) -> isize {
    match pm.parent_of(pm.getpid()) {
        Ok(ppid) => ppid.unwrap_or(0) as isize,
        Err(err) => err.as_syscall_ret(),
    }
}

/// `cx` is the caller's trap context; the child starts from a copy of it.
pub fn sys_fork(pm: &ProcessManager, cx: &TrapContext) -> isize {
    match pm.fork(pm.getpid(), cx) {
        Ok(child) => child as isize,
        Err(err) => err.as_syscall_ret(),
    }
}

/// Wait for child `pid` to exit and store its encoded status at `status_ptr`
/// in the caller's space (skipped when the pointer is null).
///
/// `options` must be 0. Negative pids (any child, process groups) are not
/// supported and report `ESRCH`.
pub fn sys_waitpid(pm: &ProcessManager, pid: isize, status_ptr: usize, options: usize) -> isize {
    let options = match u32::try_from(options).ok().and_then(WaitOptions::from_bits) {
        Some(options) => options,
        None => return KernelError::InvalidArgument.as_syscall_ret(),
    };
    if pid <= 0 {
        return KernelError::NoSuchProcess.as_syscall_ret();
    }
    let caller = pm.getpid();
    let (found, exit_code) = match pm.waitpid(caller, pid as usize, options) {
        Ok(result) => result,
        Err(err) => return err.as_syscall_ret(),
    };
    if status_ptr != 0 {
        let status = pm.processor().encode_exit_status(exit_code);
        let written = pm
            .address_space_of(caller)
            .ok_or(KernelError::BadAddress)
            .and_then(|space| space.write_i32(status_ptr, status));
        if let Err(err) = written {
            return err.as_syscall_ret();
        }
    }
    found as isize
}
