use thiserror::Error;

/// Failures raised by workers and the lookup helper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("resource not found")]
    NotFound,

    #[error("worker {0} is inactive")]
    Inactive(u64),

    #[error("operation cancelled")]
    Cancelled,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("too many workers: {requested} > {max}")]
    TooManyWorkers { requested: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, WorkerError>;
