//! Address-space collaborator.
//!
//! Paging, ELF loading and copy-on-write live in the embedding kernel; the
//! lifecycle core only needs to duplicate a space on fork, switch away from it
//! on exit and write the wait status into a waiter's space. Dropping the last
//! reference destroys the space and returns its frames.

use crate::error::KernelResult;
use alloc::sync::Arc;

pub trait AddressSpace: Send + Sync {
    /// Make an independent copy for a forked child.
    ///
    /// Fails with [`KernelError::OutOfMemory`](crate::KernelError::OutOfMemory)
    /// when frames run out; nothing of the copy survives the failure.
    fn duplicate(&self) -> KernelResult<Arc<dyn AddressSpace>>;
    /// Switch the current CPU away from this space before it is destroyed.
    fn deactivate(&self);
    /// Copy `value` to user address `ptr` of this space.
    fn write_i32(&self, ptr: usize, value: i32) -> KernelResult<()>;
}
