//! Synchronization primitives used by the process table.

mod condvar;

pub use condvar::Condvar;
pub use spin::{Mutex, MutexGuard};
