use core::sync::atomic::{AtomicUsize, Ordering};
use spin::{Mutex, MutexGuard};

/// Broadcast-only condition variable over a [`spin::Mutex`].
///
/// A waiter samples the notification sequence while it still holds the lock,
/// so a `notify_all` issued under the same lock can never be lost between the
/// waiter's predicate check and its sleep. Every notification wakes every
/// waiter; callers re-check their own predicate.
pub struct Condvar {
    seq: AtomicUsize,
}

impl Condvar {
    pub const fn new() -> Self {
        Self {
            seq: AtomicUsize::new(0),
        }
    }

    /// Release `guard`, sleep until the next `notify_all`, then re-acquire `mutex`.
    ///
    /// `relax` is called while sleeping; a kernel passes its yield so the CPU
    /// goes to another task instead of spinning.
    pub fn wait<'a, T>(
        &self,
        mutex: &'a Mutex<T>,
        guard: MutexGuard<'a, T>,
        relax: impl Fn(),
    ) -> MutexGuard<'a, T> {
        let key = self.seq.load(Ordering::Acquire);
        drop(guard);
        while self.seq.load(Ordering::Acquire) == key {
            relax();
        }
        mutex.lock()
    }

    /// Wake all waiters. Must be called with the associated lock held.
    pub fn notify_all(&self) {
        self.seq.fetch_add(1, Ordering::Release);
    }
}

impl Default for Condvar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn waiter_wakes_after_predicate_flips() {
        let pair = Arc::new((Mutex::new(false), Condvar::new()));
        let done = Arc::new(AtomicBool::new(false));
        let waiter = {
            let pair = pair.clone();
            let done = done.clone();
            thread::spawn(move || {
                let (lock, cv) = &*pair;
                let mut guard = lock.lock();
                while !*guard {
                    guard = cv.wait(lock, guard, thread::yield_now);
                }
                done.store(true, Ordering::SeqCst);
            })
        };
        thread::sleep(Duration::from_millis(20));
        assert!(!done.load(Ordering::SeqCst));

        // 一次与谓词无关的广播不应让等待者返回
        {
            let _g = pair.0.lock();
            pair.1.notify_all();
        }
        thread::sleep(Duration::from_millis(20));
        assert!(!done.load(Ordering::SeqCst));

        {
            let mut g = pair.0.lock();
            *g = true;
            pair.1.notify_all();
        }
        waiter.join().unwrap();
        assert!(done.load(Ordering::SeqCst));
    }

    #[test]
    fn broadcast_wakes_every_waiter() {
        let pair = Arc::new((Mutex::new(0usize), Condvar::new()));
        let waiters: std::vec::Vec<_> = (0..4)
            .map(|_| {
                let pair = pair.clone();
                thread::spawn(move || {
                    let (lock, cv) = &*pair;
                    let mut guard = lock.lock();
                    while *guard == 0 {
                        guard = cv.wait(lock, guard, thread::yield_now);
                    }
                    *guard
                })
            })
            .collect();
        thread::sleep(Duration::from_millis(20));
        {
            let mut g = pair.0.lock();
            *g = 7;
            pair.1.notify_all();
        }
        for w in waiters {
            assert_eq!(w.join().unwrap(), 7);
        }
    }
}
