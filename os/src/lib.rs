//! Process lifecycle core of the teaching kernel: fork, exit and waitpid over
//! one shared process table.
//!
//! Address spaces and execution contexts are supplied by the embedding kernel
//! through [`memory::AddressSpace`] and [`task::Processor`].

#![no_std]

//引入alloc库的依赖
extern crate alloc;
#[cfg(test)]
extern crate std;

#[macro_use]
pub mod console;
pub mod config;
pub mod error;
pub mod logging;
pub mod memory;
pub mod sync;
pub mod syscall;
pub mod task;

pub use error::{KernelError, KernelResult};
pub use task::{ProcessManager, TaskStatus, WaitOptions};
