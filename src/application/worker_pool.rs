//! Bounded worker pool for the fan-out phases
//!
//! Each item gets its own result slot; results come back in input order
//! once every worker has finished.

use rayon::prelude::*;

use crate::error::{FleetError, FleetResult};

pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Pool with `workers` threads (at least one)
    pub fn new(name: &'static str, workers: usize) -> FleetResult<Self> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(move |i| format!("fleetup-{}-{}", name, i))
            .build()
            .map_err(|e| FleetError::Io(std::io::Error::other(e.to_string())))?;
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Apply `f` to every item with at most `workers` running at once.
    pub fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        self.pool.install(|| items.par_iter().map(&f).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn preserves_input_order() {
        let pool = WorkerPool::new("test", 4).unwrap();
        let items: Vec<u64> = (0..32).collect();
        let out = pool.map(&items, |n| {
            std::thread::sleep(Duration::from_millis(32 - *n));
            n * 10
        });
        assert_eq!(out, items.iter().map(|n| n * 10).collect::<Vec<_>>());
    }

    #[test]
    fn never_exceeds_worker_count() {
        let pool = WorkerPool::new("test", 3).unwrap();
        let running = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let items: Vec<usize> = (0..12).collect();

        pool.map(&items, |_| {
            let now = running.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            running.fetch_sub(1, Ordering::SeqCst);
        });

        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn zero_workers_means_one() {
        assert_eq!(WorkerPool::new("test", 0).unwrap().workers(), 1);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let pool = WorkerPool::new("test", 2).unwrap();
        let out: Vec<u8> = pool.map(&Vec::<u8>::new(), |b| *b);
        assert!(out.is_empty());
    }
}
