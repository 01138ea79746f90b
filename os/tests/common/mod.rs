//! Mock collaborators for driving the lifecycle core from host threads.
#![allow(dead_code)]

use os::memory::AddressSpace;
use os::task::{Processor, TrapContext};
use os::{KernelError, KernelResult, ProcessManager};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Shared bookkeeping of the mock machine.
#[derive(Default)]
pub struct Machine {
    pub live_spaces: AtomicUsize,
    pub deactivated: AtomicUsize,
    pub fail_duplicate: AtomicBool,
    pub fail_spawn: AtomicBool,
    pub spawned: Mutex<Vec<(usize, TrapContext)>>,
}

pub struct MockSpace {
    machine: Arc<Machine>,
    pub words: Mutex<BTreeMap<usize, i32>>,
}

impl MockSpace {
    pub fn new(machine: &Arc<Machine>) -> Arc<Self> {
        machine.live_spaces.fetch_add(1, Ordering::SeqCst);
        Arc::new(Self {
            machine: machine.clone(),
            words: Mutex::new(BTreeMap::new()),
        })
    }
}

/// Valid user addresses of the mock space.
pub const USER_BASE: usize = 0x1000;
pub const USER_END: usize = 0x2000;

impl AddressSpace for MockSpace {
    fn duplicate(&self) -> KernelResult<Arc<dyn AddressSpace>> {
        if self.machine.fail_duplicate.load(Ordering::SeqCst) {
            return Err(KernelError::OutOfMemory);
        }
        let copy = MockSpace::new(&self.machine);
        *copy.words.lock().unwrap() = self.words.lock().unwrap().clone();
        Ok(copy)
    }

    fn deactivate(&self) {
        self.machine.deactivated.fetch_add(1, Ordering::SeqCst);
    }

    fn write_i32(&self, ptr: usize, value: i32) -> KernelResult<()> {
        if !(USER_BASE..USER_END).contains(&ptr) {
            return Err(KernelError::BadAddress);
        }
        self.words.lock().unwrap().insert(ptr, value);
        Ok(())
    }
}

impl Drop for MockSpace {
    fn drop(&mut self) {
        self.machine.live_spaces.fetch_sub(1, Ordering::SeqCst);
    }
}

thread_local! {
    static CURRENT: Cell<usize> = Cell::new(0);
}

/// Make the calling host thread run as process `pid`.
pub fn run_as(pid: usize) {
    CURRENT.with(|current| current.set(pid));
}

pub struct MockProcessor {
    machine: Arc<Machine>,
}

impl Processor for MockProcessor {
    fn current_pid(&self) -> usize {
        CURRENT.with(Cell::get)
    }

    fn spawn(&self, pid: usize, trap_cx: TrapContext) -> KernelResult<()> {
        if self.machine.fail_spawn.load(Ordering::SeqCst) {
            return Err(KernelError::SpawnFailed);
        }
        self.machine.spawned.lock().unwrap().push((pid, trap_cx));
        Ok(())
    }

    fn exit_current(&self) -> ! {
        loop {
            thread::park();
        }
    }

    fn yield_now(&self) {
        thread::yield_now();
    }
}

fn stdout_sink(s: &str) {
    print!("{}", s);
}

/// A process manager with a running initproc.
pub struct Fixture {
    pub machine: Arc<Machine>,
    pub pm: Arc<ProcessManager>,
    pub init: usize,
    pub init_space: Arc<MockSpace>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_capacity(os::config::MAX_PROCESSES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        os::console::set_sink(stdout_sink);
        os::logging::init();
        let machine = Arc::new(Machine::default());
        let processor = Arc::new(MockProcessor {
            machine: machine.clone(),
        });
        let pm = Arc::new(ProcessManager::with_capacity(processor, capacity));
        let init_space = MockSpace::new(&machine);
        let init = pm.spawn_initproc(init_space.clone()).unwrap();
        Self {
            machine,
            pm,
            init,
            init_space,
        }
    }

    pub fn fork(&self, parent: usize) -> KernelResult<usize> {
        self.pm.fork(parent, &TrapContext::zero_init())
    }

    pub fn live_spaces(&self) -> usize {
        self.machine.live_spaces.load(Ordering::SeqCst)
    }
}
