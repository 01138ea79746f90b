mod context;
mod manager;
mod pid;
mod processor;
#[allow(clippy::module_inception)]
mod task;

use crate::config::MAX_PROCESSES;
use crate::error::{KernelError, KernelResult};
use crate::memory::AddressSpace;
use crate::sync::{Condvar, Mutex};
use alloc::sync::Arc;
use alloc::vec::Vec;
use bitflags::*;
use log::{debug, warn};

pub use context::TrapContext;
pub use manager::ProcessTable;
pub use pid::PidAllocator;
pub use processor::Processor;
pub use task::{TaskControlBlock, TaskStatus};

bitflags! {
    /// Options of `waitpid`. Only the empty set, block until the target
    /// has exited, is supported.
    pub struct WaitOptions: u32 {
        const WNOHANG = 1;
        const WUNTRACED = 2;
    }
}

/// Process lifecycle coordinator.
///
/// One lock guards the whole process table and one condition variable
/// carries every exit notification. An exit wakes all blocked waiters and
/// each of them re-checks its own target.
pub struct ProcessManager {
    table: Mutex<ProcessTable>,
    wait_cv: Condvar,
    processor: Arc<dyn Processor>,
}

impl ProcessManager {
    pub fn new(processor: Arc<dyn Processor>) -> Self {
        Self::with_capacity(processor, MAX_PROCESSES)
    }

    pub fn with_capacity(processor: Arc<dyn Processor>, capacity: usize) -> Self {
        Self {
            table: Mutex::new(ProcessTable::new(capacity)),
            wait_cv: Condvar::new(),
            processor,
        }
    }

    pub fn processor(&self) -> &Arc<dyn Processor> {
        &self.processor
    }

    /// Register the first process. It has no parent, and its execution
    /// context is started by the platform at boot.
    pub fn spawn_initproc(&self, memory_set: Arc<dyn AddressSpace>) -> KernelResult<usize> {
        let pid = self.table.lock().register(None, Some(memory_set))?;
        debug!("initproc registered as pid {}", pid);
        Ok(pid)
    }

    /// Create a copy of `parent`. The child resumes from `trap_cx` with a
    /// return value of 0; the parent gets the child's pid.
    ///
    /// A failure at any step removes the half-built child again, so the
    /// table never holds a process that cannot run.
    pub fn fork(&self, parent: usize, trap_cx: &TrapContext) -> KernelResult<usize> {
        // ---- access process table exclusively
        let mut table = self.table.lock();
        let parent_space = match table.lookup(parent) {
            Some(task) if task.is_running() => task.memory_set.clone(),
            _ => panic!("fork from pid {} which is not running", parent),
        }
        .unwrap_or_else(|| panic!("pid {} is running without an address space", parent));
        let registered = table.register(Some(parent), None);
        drop(table);
        // ---- release process table
        let child = registered.map_err(|err| {
            warn!("fork from pid {}: cannot allocate a process: {}", parent, err);
            err
        })?;

        // copy user space
        let memory_set = match parent_space.duplicate() {
            Ok(memory_set) => memory_set,
            Err(err) => {
                warn!("fork from pid {}: cannot copy address space: {}", parent, err);
                self.rollback_fork(child);
                return Err(err);
            }
        };
        self.table
            .lock()
            .lookup_mut(child)
            .expect("forked child vanished before it ran")
            .memory_set = Some(memory_set);

        // for child process, fork returns 0
        let mut child_cx = *trap_cx;
        child_cx.set_return_value(0);
        if let Err(err) = self.processor.spawn(child, child_cx) {
            warn!("fork from pid {}: cannot start child context: {}", parent, err);
            self.rollback_fork(child);
            return Err(err);
        }
        debug!("pid {} forked child {}", parent, child);
        Ok(child)
    }

    fn rollback_fork(&self, child: usize) {
        let task = self.table.lock().unregister(child);
        // 子进程的地址空间（若已复制）在锁外销毁
        drop(task);
    }

    /// Terminate `pid` with `exit_code`.
    ///
    /// The process becomes a zombie if it still has a parent, otherwise it is
    /// exited for good. Its children lose their parent, and those that are
    /// already zombies become exited since nobody can collect them now. The
    /// address space is torn down after the table lock is released. Stopping
    /// the execution context is left to the caller, see `sys_exit`.
    pub fn exit(&self, pid: usize, exit_code: i32) {
        // **** access process table exclusively
        let mut table = self.table.lock();
        let task = table
            .lookup_mut(pid)
            .unwrap_or_else(|| panic!("exit from unknown pid {}", pid));
        let memory_set = task
            .memory_set
            .take()
            .unwrap_or_else(|| panic!("pid {} exits without an address space", pid));
        let status = task.mark_exited(exit_code);
        if status == TaskStatus::Zombie {
            self.wait_cv.notify_all();
        }
        // do not move children to initproc: they simply lose their parent
        table.for_each_mut(|child| {
            if child.ppid == Some(pid) {
                child.orphan();
            }
        });
        drop(table);
        // **** release process table

        memory_set.deactivate();
        drop(memory_set);
        debug!("pid {} exited with code {} ({:?})", pid, exit_code, status);
    }

    /// Block until child `pid` of `caller` has exited and return its pid and
    /// exit code.
    ///
    /// The target is not reaped: waiting again for the same child returns
    /// the same result.
    pub fn waitpid(
        &self,
        caller: usize,
        pid: usize,
        options: WaitOptions,
    ) -> KernelResult<(usize, i32)> {
        if !options.is_empty() {
            return Err(KernelError::InvalidArgument);
        }
        let mut table = self.table.lock();
        loop {
            let task = table.lookup(pid).ok_or(KernelError::NoSuchProcess)?;
            if task.ppid != Some(caller) {
                return Err(KernelError::NotAChild);
            }
            if !task.is_running() {
                let exit_code = task
                    .exit_code()
                    .unwrap_or_else(|| panic!("pid {} left Running without an exit code", pid));
                drop(table);
                debug!("pid {} collected child {} (code {})", caller, pid, exit_code);
                return Ok((pid, exit_code));
            }
            // 每次被唤醒都要重新检查自己的目标，广播可能来自任意进程的退出
            table = self
                .wait_cv
                .wait(&self.table, table, || self.processor.yield_now());
        }
    }

    /// Pid of the calling process. A pid never changes, so no lock is taken.
    pub fn getpid(&self) -> usize {
        self.processor.current_pid()
    }

    /// Parent of `pid`: `Ok(None)` once it has been orphaned.
    pub fn parent_of(&self, pid: usize) -> KernelResult<Option<usize>> {
        self.table
            .lock()
            .lookup(pid)
            .map(|task| task.ppid)
            .ok_or(KernelError::NoSuchProcess)
    }

    pub fn status_of(&self, pid: usize) -> Option<TaskStatus> {
        self.table.lock().lookup(pid).map(TaskControlBlock::status)
    }

    pub fn exit_code_of(&self, pid: usize) -> Option<i32> {
        self.table.lock().lookup(pid).and_then(TaskControlBlock::exit_code)
    }

    /// Current children of `pid`, in pid order.
    pub fn children_of(&self, pid: usize) -> Vec<usize> {
        self.table
            .lock()
            .iter()
            .filter(|task| task.ppid == Some(pid))
            .map(|task| task.pid)
            .collect()
    }

    /// Address space of a running process.
    pub fn address_space_of(&self, pid: usize) -> Option<Arc<dyn AddressSpace>> {
        self.table
            .lock()
            .lookup(pid)
            .and_then(|task| task.memory_set.clone())
    }

    /// Number of entries in the process table, exited ones included.
    pub fn process_count(&self) -> usize {
        self.table.lock().len()
    }
}
