use super::TrapContext;
use crate::error::KernelResult;

/// The CPU-side collaborator: which process runs here, and how execution
/// contexts are started and stopped.
///
/// The embedding kernel implements this on top of its scheduler.
pub trait Processor: Send + Sync {
    /// Pid of the process whose context is running on this CPU.
    fn current_pid(&self) -> usize;

    /// Start a new execution context for `pid` that resumes from `trap_cx`.
    ///
    /// On failure nothing has been scheduled and the error is
    /// [`KernelError::SpawnFailed`](crate::KernelError::SpawnFailed).
    fn spawn(&self, pid: usize, trap_cx: TrapContext) -> KernelResult<()>;

    /// Detach the running context from its process and never schedule it again.
    fn exit_current(&self) -> !;

    /// Give the CPU to another context. Blocked waiters call this between
    /// checks of their wait condition.
    fn yield_now(&self) {
        core::hint::spin_loop();
    }

    /// Status word reported to a waiter for a process that exited with `exit_code`.
    fn encode_exit_status(&self, exit_code: i32) -> i32 {
        (exit_code & 0xff) << 8
    }
}
