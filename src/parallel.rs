use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Error, Result};
use crate::estimate::Estimate;
use crate::partition::partition;
use crate::sampler::{GeneratorPool, SampleGenerator};

#[derive(Debug, Clone, Copy)]
pub struct ParallelRun {
    pub estimate: Estimate,
    pub elapsed: Duration,
}

/// Pairs every partition with the generator that will draw it.
pub fn worker_jobs(
    total_samples: u64,
    num_workers: usize,
    base_seed: u64,
) -> Vec<(u64, SampleGenerator)> {
    partition(total_samples, num_workers)
        .into_iter()
        .zip(GeneratorPool::new(base_seed, num_workers))
        .collect()
}

pub fn count_partition(worker_id: usize, job: (u64, SampleGenerator)) -> u64 {
    let (samples, mut generator) = job;
    debug!(worker_id, samples, "worker started");
    generator.count_inside(samples)
}

/// Estimates pi with at most `parallelism` OS threads running at once.
pub fn estimate(
    total_samples: u64,
    num_workers: usize,
    parallelism: usize,
    base_seed: u64,
) -> Result<ParallelRun> {
    let start = Instant::now();

    let jobs = worker_jobs(total_samples, num_workers, base_seed);
    let inside = fan_out(jobs, parallelism, count_partition)?;

    let elapsed = start.elapsed();
    Ok(ParallelRun {
        estimate: Estimate {
            samples: total_samples,
            inside,
        },
        elapsed,
    })
}

/// Deals the jobs round-robin over at most `parallelism` scoped threads and
/// sums the results once every thread has been joined.
pub fn fan_out<J, F>(jobs: Vec<J>, parallelism: usize, work: F) -> Result<u64>
where
    J: Send,
    F: Fn(usize, J) -> u64 + Sync,
{
    let num_threads = parallelism.max(1).min(jobs.len());

    // One slot per job, so no send blocks before the drain.
    let (tx, rx) = mpsc::sync_channel(jobs.len());

    let mut groups: Vec<Vec<(usize, J)>> = (0..num_threads).map(|_| Vec::new()).collect();
    for (worker_id, job) in jobs.into_iter().enumerate() {
        groups[worker_id % num_threads].push((worker_id, job));
    }
    let group_ids: Vec<Vec<usize>> = groups
        .iter()
        .map(|group| group.iter().map(|(worker_id, _)| *worker_id).collect())
        .collect();

    let failed_thread = thread::scope(|scope| -> Result<Option<usize>> {
        let mut handles = vec![];

        for (thread_id, group) in groups.into_iter().enumerate() {
            let tx = tx.clone();
            let work = &work;

            let handle = thread::Builder::new()
                .name(format!("pi-worker-{thread_id}"))
                .spawn_scoped(scope, move || {
                    for (worker_id, job) in group {
                        let inside = work(worker_id, job);
                        // The receiver outlives the scope.
                        let _ = tx.send((worker_id, inside));
                    }
                })
                .map_err(Error::Spawn)?;

            handles.push(handle);
        }

        let mut failed = None;
        for (thread_id, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && failed.is_none() {
                failed = Some(thread_id);
            }
        }
        Ok(failed)
    })?;

    drop(tx);
    let results: Vec<(usize, u64)> = rx.iter().collect();

    if let Some(thread_id) = failed_thread {
        // Jobs run in order, so the first unreported one is the one that panicked.
        let worker = group_ids[thread_id]
            .iter()
            .copied()
            .find(|id| results.iter().all(|(done, _)| done != id))
            .unwrap_or(thread_id);
        return Err(Error::WorkerPanicked { worker });
    }

    Ok(results.iter().map(|(_, inside)| inside).sum())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::sequential;

    #[test]
    fn sums_stub_worker_counts() {
        let total = fan_out(vec![100u64, 200, 300], 3, |_, count| count).unwrap();
        assert_eq!(total, 600);
    }

    #[test]
    fn four_workers_over_a_million_points() {
        let counts = [196_300u64, 196_400, 196_200, 196_100];
        let jobs: Vec<(u64, u64)> = partition(1_000_000, 4).into_iter().zip(counts).collect();
        assert!(jobs.iter().all(|(size, _)| *size == 250_000));

        let inside = fan_out(jobs, 4, |_, (size, count)| {
            assert!(count <= size);
            count
        })
        .unwrap();
        assert_eq!(inside, 785_000);

        let estimate = Estimate {
            samples: 1_000_000,
            inside,
        };
        assert!((estimate.pi() - 3.14).abs() < 1e-12);
    }

    #[test]
    fn workers_see_their_own_ids() {
        let total = fan_out(vec![(); 8], 8, |worker_id, ()| worker_id as u64).unwrap();
        assert_eq!(total, (0..8).sum::<u64>());
    }

    #[test]
    fn panicking_worker_is_reported() {
        let result = fan_out(vec![1u64, 2, 3], 3, |worker_id, count| {
            if worker_id == 1 {
                panic!("boom");
            }
            count
        });
        assert!(matches!(result, Err(Error::WorkerPanicked { worker: 1 })));
    }

    #[test]
    fn more_workers_than_samples() {
        let run = estimate(3, 8, 8, 5).unwrap();
        assert_eq!(run.estimate.samples, 3);
        assert!(run.estimate.inside <= 3);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = estimate(200_000, 4, 4, 99).unwrap();
        let b = estimate(200_000, 4, 4, 99).unwrap();
        assert_eq!(a.estimate, b.estimate);
    }

    #[test]
    fn single_worker_agrees_with_sequential() {
        let parallel = estimate(1_000_000, 1, 1, 17).unwrap();
        let sequential = sequential::estimate(1_000_000, &mut SampleGenerator::from_seed(17));

        assert!(parallel.estimate.error() < 0.01);
        assert!(sequential.error() < 0.01);
        assert!((parallel.estimate.pi() - sequential.pi()).abs() < 0.02);
    }

    #[test]
    fn thread_cap_limits_concurrent_jobs() {
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let total = fan_out(vec![(); 8], 2, |worker_id, ()| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            active.fetch_sub(1, Ordering::SeqCst);
            worker_id as u64
        })
        .unwrap();

        assert_eq!(total, (0..8).sum::<u64>());
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn cap_larger_than_jobs_is_fine() {
        let total = fan_out(vec![5u64, 6], 64, |_, count| count).unwrap();
        assert_eq!(total, 11);
    }

    #[test]
    fn panic_under_cap_names_the_failing_job() {
        // Thread 1 runs jobs 1 and 3; job 1 reports before job 3 panics.
        let result = fan_out(vec![1u64, 2, 3, 4], 2, |worker_id, count| {
            if worker_id == 3 {
                panic!("boom");
            }
            count
        });
        assert!(matches!(result, Err(Error::WorkerPanicked { worker: 3 })));
    }

    #[test]
    fn capped_run_matches_uncapped_run() {
        let capped = estimate(300_000, 8, 2, 42).unwrap();
        let uncapped = estimate(300_000, 8, 8, 42).unwrap();
        assert_eq!(capped.estimate, uncapped.estimate);
    }
}
