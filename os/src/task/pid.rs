use crate::config::INIT_PID;

/// Hands out process identifiers.
///
/// Identifiers are never recycled. A pid whose fork was rolled back is burned
/// as well, so nobody can ever observe two owners of the same pid.
pub struct PidAllocator {
    current: usize,
}

impl PidAllocator {
    pub fn new() -> Self {
        PidAllocator { current: INIT_PID }
    }

    pub fn alloc(&mut self) -> usize {
        self.current += 1;
        self.current - 1
    }
}

impl Default for PidAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pids_are_dense_and_start_at_init() {
        let mut allocator = PidAllocator::new();
        assert_eq!(allocator.alloc(), INIT_PID);
        assert_eq!(allocator.alloc(), INIT_PID + 1);
        assert_eq!(allocator.alloc(), INIT_PID + 2);
    }

    #[test]
    fn pids_never_repeat() {
        let mut allocator = PidAllocator::new();
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(allocator.alloc()));
        }
    }
}
