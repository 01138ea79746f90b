use core::fmt::{self, Display, Formatter};

/// Errors a lifecycle call hands back to its caller.
///
/// Internal-consistency failures never show up here; they panic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// The process table is full, no new process can be created.
    ResourceExhausted,
    /// Duplicating the parent's address space ran out of memory.
    OutOfMemory,
    /// The execution context for a forked child could not be started.
    SpawnFailed,
    /// Unsupported waitpid options.
    InvalidArgument,
    /// No process with that pid was ever registered.
    NoSuchProcess,
    /// The target exists but the caller is not its current parent.
    NotAChild,
    /// The status word could not be copied into the caller's space.
    BadAddress,
}

pub type KernelResult<T> = Result<T, KernelError>;

const EAGAIN: isize = 11;
const ENOMEM: isize = 12;
const EINVAL: isize = 22;
const ESRCH: isize = 3;
const ECHILD: isize = 10;
const EFAULT: isize = 14;

impl KernelError {
    /// Linux errno for this error, positive.
    pub fn errno(self) -> isize {
        match self {
            KernelError::ResourceExhausted | KernelError::SpawnFailed => EAGAIN,
            KernelError::OutOfMemory => ENOMEM,
            KernelError::InvalidArgument => EINVAL,
            KernelError::NoSuchProcess => ESRCH,
            KernelError::NotAChild => ECHILD,
            KernelError::BadAddress => EFAULT,
        }
    }

    /// Value a syscall handler returns to user space.
    pub fn as_syscall_ret(self) -> isize {
        -self.errno()
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let msg = match self {
            KernelError::ResourceExhausted => "process table is full",
            KernelError::OutOfMemory => "out of memory",
            KernelError::SpawnFailed => "cannot start execution context",
            KernelError::InvalidArgument => "invalid argument",
            KernelError::NoSuchProcess => "no such process",
            KernelError::NotAChild => "not a child of the caller",
            KernelError::BadAddress => "bad address",
        };
        f.write_str(msg)
    }
}
