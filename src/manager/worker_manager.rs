use std::sync::{Mutex, MutexGuard};

use log::info;

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::manager::lookup::fetch_data;
use crate::models::{
    cancel::CancelToken,
    worker::{Worker, WorkerStatus},
};
use crate::worker::pool::run_workers;

/// Ties the session's cancel token, the long-lived processing worker and
/// the fan-out runner together for the CLI.
pub struct WorkerManager {
    config: Config,
    worker: Worker,
    cancel: Mutex<CancelToken>,
}

impl WorkerManager {
    pub fn new(config: Config) -> Self {
        let worker = Worker::new(0, config.name.clone());
        WorkerManager {
            config,
            worker,
            cancel: Mutex::new(CancelToken::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.lock_cancel().clone()
    }

    /// Runs `count` workers and collects their messages in arrival order.
    pub fn run(&self, count: usize) -> std::result::Result<Vec<String>, ConfigError> {
        self.config.check_count(count)?;

        let cancel = self.cancel_token();
        let results = run_workers(&cancel, count, self.config.work_delay());
        let messages: Vec<String> = results.iter().collect();

        info!("Run finished: {} of {} workers reported.", messages.len(), count);
        Ok(messages)
    }

    pub fn process(&self, text: &str) -> Result<()> {
        let cancel = self.cancel_token();
        self.worker.process(text.as_bytes(), &cancel)
    }

    pub fn status(&self) -> WorkerStatus {
        self.worker.status()
    }

    pub fn set_active(&self, active: bool) {
        self.worker.set_active(active);
    }

    pub fn lookup(&self, id: &str) -> Result<Vec<u8>> {
        fetch_data(id)
    }

    pub fn cancel(&self) {
        self.lock_cancel().cancel();
        info!("Cancellation requested.");
    }

    /// Swaps in a fresh token; runs already in flight keep the old one.
    pub fn reset(&self) {
        *self.lock_cancel() = CancelToken::new();
        info!("Cancellation token reset.");
    }

    fn lock_cancel(&self) -> MutexGuard<'_, CancelToken> {
        match self.cancel.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkerError;

    fn manager() -> WorkerManager {
        let mut config = Config::new("tester");
        config.delay_ms = 5;
        config.max_workers = 10;
        WorkerManager::new(config)
    }

    #[test]
    fn run_collects_every_message() {
        let manager = manager();
        assert_eq!(manager.run(3).unwrap().len(), 3);
    }

    #[test]
    fn run_rejects_counts_above_limit() {
        let manager = manager();
        assert_eq!(
            manager.run(11),
            Err(ConfigError::TooManyWorkers { requested: 11, max: 10 })
        );
    }

    #[test]
    fn cancel_then_reset() {
        let manager = manager();
        manager.cancel();
        assert_eq!(manager.process("abc"), Err(WorkerError::Cancelled));
        assert!(manager.run(3).unwrap().is_empty());

        manager.reset();
        assert!(!manager.cancel_token().is_cancelled());
        assert_eq!(manager.process("abc"), Ok(()));
        assert_eq!(manager.run(3).unwrap().len(), 3);
    }

    #[test]
    fn deactivation_is_reported() {
        let manager = manager();
        manager.set_active(false);
        assert_eq!(manager.status(), WorkerStatus::Inactive);
        assert_eq!(manager.process("abc"), Err(WorkerError::Inactive(0)));
    }
}
