pub mod app;
pub mod config;
pub mod error;
pub mod manager;
pub mod models;
pub mod worker;

pub use config::{Config, Validate};
pub use error::{ConfigError, WorkerError};
pub use manager::{lookup::fetch_data, worker_manager::WorkerManager};
pub use models::{
    cancel::CancelToken,
    worker::{Worker, WorkerStatus},
};
pub use worker::pool::{run_workers, DEFAULT_WORK_DELAY};
