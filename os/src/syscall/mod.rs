//! Syscall dispatch for the process lifecycle calls.

mod process;

use crate::task::{ProcessManager, TrapContext};
use log::{trace, warn};
pub use process::*;

const SYSCALL_EXIT: usize = 93;
const SYSCALL_YIELD: usize = 124;
const SYSCALL_GETPID: usize = 172;
const SYSCALL_GETPPID: usize = 173;
const SYSCALL_FORK: usize = 220;
const SYSCALL_WAITPID: usize = 260;

const ENOSYS: isize = 38;

/// Handle the syscall described by `cx` for the current process.
///
/// The return value goes into `a0` of the caller; `exit` never returns.
pub fn syscall(pm: &ProcessManager, cx: &TrapContext) -> isize {
    let id = cx.syscall_id();
    let args = cx.syscall_args();
    trace!("syscall {} {:x?} from pid {}", id, args, pm.getpid());
    match id {
        SYSCALL_EXIT => sys_exit(pm, args[0] as i32),
        SYSCALL_YIELD => sys_yield(pm),
        SYSCALL_GETPID => sys_getpid(pm),
        SYSCALL_GETPPID => sys_getppid(pm),
        SYSCALL_FORK => sys_fork(pm, cx),
        SYSCALL_WAITPID => sys_waitpid(pm, args[0] as isize, args[1], args[2]),
        _ => {
            warn!("unsupported syscall_id: {}", id);
            -ENOSYS
        }
    }
}
