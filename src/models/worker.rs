use std::{
    fmt,
    sync::{Mutex, MutexGuard},
};

use log::{debug, info};

use crate::error::{Result, WorkerError};
use crate::models::cancel::CancelToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStatus {
    Active,
    Inactive,
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerStatus::Active => write!(f, "active"),
            WorkerStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// A single processing unit. The activity flag is only reachable through
/// the lock, and `process` holds it for the whole call.
#[derive(Debug)]
pub struct Worker {
    id: u64,
    name: String,
    active: Mutex<bool>,
}

impl Worker {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            active: Mutex::new(true),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn process(&self, data: &[u8], cancel: &CancelToken) -> Result<()> {
        let active = self.lock_active();

        if !*active {
            return Err(WorkerError::Inactive(self.id));
        }
        if cancel.is_cancelled() {
            return Err(WorkerError::Cancelled);
        }

        info!("Worker {} processing {} bytes", self.name, data.len());
        Ok(())
    }

    pub fn status(&self) -> WorkerStatus {
        if *self.lock_active() {
            WorkerStatus::Active
        } else {
            WorkerStatus::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        *self.lock_active()
    }

    pub fn set_active(&self, active: bool) {
        *self.lock_active() = active;
        debug!("Worker {} set {}", self.id, if active { "active" } else { "inactive" });
    }

    // The flag is a plain bool, so a panic elsewhere cannot leave it torn.
    fn lock_active(&self) -> MutexGuard<'_, bool> {
        match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
