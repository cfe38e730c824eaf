//! Concurrency management for sol_callgraph.
//! Configures the rayon pool used by parallel call graph construction.

use anyhow::Result;

/// Worker count: explicit `jobs`, otherwise half the cores, minimum 1.
pub fn worker_count(jobs: Option<usize>) -> usize {
    match jobs {
        Some(n) => n.max(1),
        None => std::cmp::max(1, num_cpus::get() / 2),
    }
}

/// Initialize the global rayon thread pool with a controlled worker count.
pub fn init_thread_pool(jobs: Option<usize>) -> Result<()> {
    let workers = worker_count(jobs);

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()?;

    tracing::info!(
        workers,
        cores = num_cpus::get(),
        "initialized thread pool"
    );

    Ok(())
}
