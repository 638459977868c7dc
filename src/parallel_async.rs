use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Builder;
use tokio::sync::mpsc;
use tokio::task;
use tracing::debug;

use crate::error::{Error, Result};
use crate::estimate::Estimate;
use crate::parallel::{count_partition, worker_jobs, ParallelRun};

/// Estimates pi with blocking tasks on a runtime sized to `parallelism`.
///
/// Each call builds its own runtime, so the thread budget of one run never
/// leaks into the next.
pub fn estimate(
    total_samples: u64,
    num_tasks: usize,
    parallelism: usize,
    base_seed: u64,
) -> Result<ParallelRun> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(parallelism)
        .max_blocking_threads(parallelism)
        .thread_name("pi-runtime")
        .build()
        .map_err(Error::Runtime)?;
    debug!(num_tasks, parallelism, "tokio runtime ready");

    let start = Instant::now();

    let jobs = worker_jobs(total_samples, num_tasks, base_seed);
    let inside = runtime.block_on(fan_out(jobs, count_partition))?;

    let elapsed = start.elapsed();
    Ok(ParallelRun {
        estimate: Estimate {
            samples: total_samples,
            inside,
        },
        elapsed,
    })
}

/// Spawns one blocking task per job and sums the results after every task
/// has been awaited.
pub async fn fan_out<J, F>(jobs: Vec<J>, work: F) -> Result<u64>
where
    J: Send + 'static,
    F: Fn(usize, J) -> u64 + Send + Sync + 'static,
{
    let work = Arc::new(work);
    let (tx, mut rx) = mpsc::channel(jobs.len().max(1));

    let mut handles = vec![];
    for (task_id, job) in jobs.into_iter().enumerate() {
        let tx = tx.clone();
        let work = Arc::clone(&work);

        let handle = task::spawn_blocking(move || {
            let inside = work(task_id, job);
            let _ = tx.blocking_send(inside);
        });

        handles.push(handle);
    }
    drop(tx);

    let mut panicked = None;
    for (task_id, handle) in handles.into_iter().enumerate() {
        if handle.await.is_err() && panicked.is_none() {
            panicked = Some(task_id);
        }
    }
    if let Some(worker) = panicked {
        return Err(Error::WorkerPanicked { worker });
    }

    let mut total_inside = 0;
    while let Some(inside) = rx.recv().await {
        total_inside += inside;
    }
    Ok(total_inside)
}
