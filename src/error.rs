use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("sample count must be at least 1")]
    InvalidSamples,

    #[error("worker count must be at least 1, got {0}")]
    InvalidWorkers(usize),

    #[error("parallelism must be at least 1")]
    InvalidParallelism,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("failed to build tokio runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}
