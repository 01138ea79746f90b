use super::pid::PidAllocator;
use super::TaskControlBlock;
use crate::error::{KernelError, KernelResult};
use crate::memory::AddressSpace;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;

/// Registry of every process ever created, keyed by pid.
///
/// Entries are never removed once a process has started running: EXITED
/// records stay for the lifetime of the system and `capacity` bounds the
/// total. The only removal is the rollback of a fork that failed before its
/// child ran. Callers hold the process table lock for every access.
pub struct ProcessTable {
    tasks: BTreeMap<usize, TaskControlBlock>,
    pid_allocator: PidAllocator,
    capacity: usize,
}

impl ProcessTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            tasks: BTreeMap::new(),
            pid_allocator: PidAllocator::new(),
            capacity,
        }
    }

    /// Insert a new RUNNING process and return its fresh pid.
    pub fn register(
        &mut self,
        ppid: Option<usize>,
        memory_set: Option<Arc<dyn AddressSpace>>,
    ) -> KernelResult<usize> {
        if self.tasks.len() >= self.capacity {
            return Err(KernelError::ResourceExhausted);
        }
        let pid = self.pid_allocator.alloc();
        let previous = self
            .tasks
            .insert(pid, TaskControlBlock::new(pid, ppid, memory_set));
        assert!(previous.is_none(), "pid {} has been allocated twice!", pid);
        Ok(pid)
    }

    /// Drop the record of a child whose fork failed half way.
    pub(super) fn unregister(&mut self, pid: usize) -> Option<TaskControlBlock> {
        self.tasks.remove(&pid)
    }

    pub fn lookup(&self, pid: usize) -> Option<&TaskControlBlock> {
        self.tasks.get(&pid)
    }

    pub fn lookup_mut(&mut self, pid: usize) -> Option<&mut TaskControlBlock> {
        self.tasks.get_mut(&pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskControlBlock> {
        self.tasks.values()
    }

    pub fn for_each_mut(&mut self, f: impl FnMut(&mut TaskControlBlock)) {
        self.tasks.values_mut().for_each(f);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}
