//! Order-preserving execution of independent jobs across workers.
//!
//! One worker runs jobs in the calling thread. More workers run them on a
//! dedicated rayon pool of that size, capped at the number of jobs, so the
//! caller's worker count is honored instead of rayon's global default.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;

/// Apply `f` to every item using `workers` threads.
///
/// Output index `i` always holds `f(&items[i])`, independent of the worker
/// count and of completion order. The first error aborts the run and is
/// returned; no partial output is produced.
pub fn map_ordered<T, U, F>(workers: usize, items: &[T], f: F) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U> + Sync + Send,
{
    if workers <= 1 || items.len() <= 1 {
        return items.iter().map(f).collect();
    }
    run_pool(workers, items, f)
}

#[cfg(feature = "parallel")]
fn run_pool<T, U, F>(workers: usize, items: &[T], f: F) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U> + Sync + Send,
{
    // No point spawning threads that would never receive a job.
    let threads = workers.min(items.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("ff-worker-{i}"))
        .build()?;

    tracing::trace!(threads, jobs = items.len(), "dispatching to worker pool");
    pool.install(|| items.par_iter().map(&f).collect())
}

#[cfg(not(feature = "parallel"))]
fn run_pool<T, U, F>(workers: usize, items: &[T], f: F) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U> + Sync + Send,
{
    tracing::warn!(
        workers,
        "built without the `parallel` feature; running sequentially"
    );
    items.iter().map(f).collect()
}
