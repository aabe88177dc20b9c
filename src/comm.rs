//! Communicator collaborator.
//!
//! Loggers never call into a communicator on their own; they only copy its
//! rank and size to label diagnostics. Code that gathers timings across
//! ranks owns the collective calls.

use std::sync::{Arc, Barrier};

/// Rank and size of the process group a logger reports for.
pub trait Communicator {
    /// Zero-based index of this process.
    fn rank(&self) -> usize;

    /// Number of processes, at least 1.
    fn size(&self) -> usize;

    /// Block until every rank has arrived.
    fn barrier(&self);
}

/// The communicator of a process running alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleProcess;

impl Communicator for SingleProcess {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn barrier(&self) {}
}

/// Ranks emulated by threads of one process.
///
/// `LocalGroup::new(n)` hands out `n` members sharing a barrier; move one
/// into each thread.
#[derive(Debug, Clone)]
pub struct LocalGroup {
    rank: usize,
    size: usize,
    barrier: Arc<Barrier>,
}

impl LocalGroup {
    /// One member per rank; a `size` of 0 is treated as 1.
    pub fn new(size: usize) -> Vec<LocalGroup> {
        let size = size.max(1);
        let barrier = Arc::new(Barrier::new(size));
        (0..size)
            .map(|rank| LocalGroup {
                rank,
                size,
                barrier: barrier.clone(),
            })
            .collect()
    }
}

impl Communicator for LocalGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) {
        self.barrier.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_single_process() {
        let comm = SingleProcess;
        assert_eq!(comm.rank(), 0);
        assert_eq!(comm.size(), 1);
        comm.barrier();
    }

    #[test]
    fn test_local_group_ranks() {
        let group = LocalGroup::new(4);
        let ranks: Vec<_> = group.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(group.iter().all(|c| c.size() == 4));
    }

    #[test]
    fn test_zero_size_is_clamped() {
        let group = LocalGroup::new(0);
        assert_eq!(group.len(), 1);
        group[0].barrier();
    }

    #[test]
    fn test_barrier_synchronizes() {
        let arrived = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = LocalGroup::new(3)
            .into_iter()
            .map(|comm| {
                let arrived = arrived.clone();
                thread::spawn(move || {
                    arrived.fetch_add(1, Ordering::SeqCst);
                    comm.barrier();
                    arrived.load(Ordering::SeqCst)
                })
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), 3);
        }
    }
}
