use crate::memory::AddressSpace;
use alloc::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    /// Exited while a parent was alive; the parent has not collected it.
    Zombie,
    /// Terminal. Nobody can wait for this process any more.
    Exited,
}

/// 进程控制块：进程表中每个进程唯一的一条记录
pub struct TaskControlBlock {
    // immutable
    pub pid: usize,
    // mutable, only under the process table lock
    /// `None` once the parent has exited (or for initproc)
    pub ppid: Option<usize>,
    task_status: TaskStatus,
    //退出码只写一次，离开 Running 之后才有意义
    exit_code: Option<i32>,
    /// 应用地址空间，只在 Running 期间有效，exit 时在锁外销毁
    pub memory_set: Option<Arc<dyn AddressSpace>>,
}

impl TaskControlBlock {
    pub fn new(pid: usize, ppid: Option<usize>, memory_set: Option<Arc<dyn AddressSpace>>) -> Self {
        Self {
            pid,
            ppid,
            task_status: TaskStatus::Running,
            exit_code: None,
            memory_set,
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.task_status
    }

    pub fn is_running(&self) -> bool {
        self.task_status == TaskStatus::Running
    }

    pub fn is_zombie(&self) -> bool {
        self.task_status == TaskStatus::Zombie
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Record the exit of this process and return the state it moved to:
    /// `Zombie` if a parent may still collect it, `Exited` otherwise.
    pub fn mark_exited(&mut self, exit_code: i32) -> TaskStatus {
        assert!(
            self.is_running(),
            "pid {} exits twice (state {:?})",
            self.pid,
            self.task_status
        );
        assert!(self.exit_code.is_none());
        self.exit_code = Some(exit_code);
        self.task_status = if self.ppid.is_some() {
            TaskStatus::Zombie
        } else {
            TaskStatus::Exited
        };
        self.task_status
    }

    /// Cut the link to the parent. A zombie can no longer be collected, so it
    /// becomes `Exited` right away.
    pub fn orphan(&mut self) {
        self.ppid = None;
        if self.is_zombie() {
            self.task_status = TaskStatus::Exited;
        }
    }
}
