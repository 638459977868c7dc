/// Splits `total` samples across `workers` partitions. The first
/// `total % workers` partitions get one extra sample each.
pub fn partition(total: u64, workers: usize) -> Vec<u64> {
    debug_assert!(workers > 0, "partition needs at least one worker");
    let per_worker = total / workers as u64;
    let remainder = (total % workers as u64) as usize;

    (0..workers)
        .map(|worker_id| {
            if worker_id < remainder {
                per_worker + 1
            } else {
                per_worker
            }
        })
        .collect()
}
