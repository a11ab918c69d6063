use std::{fmt, time::Duration};

use clap::Parser;

use crate::error::ConfigError;
use crate::worker::pool::DEFAULT_WORK_DELAY;

/// Runtime settings, parsed from the command line.
#[derive(Parser, Debug, Clone)]
#[command(name = "worker_fanout", about = "Fan-out worker demo with cooperative cancellation")]
pub struct Config {
    /// Name of the long-lived processing worker.
    #[arg(long, default_value = "main-worker")]
    pub name: String,

    /// Workers spawned by `run` when no count is given.
    #[arg(long, default_value_t = 5)]
    pub workers: usize,

    /// Simulated work per worker, in milliseconds.
    #[arg(long = "delay-ms", default_value_t = DEFAULT_WORK_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    /// Upper bound on workers per run.
    #[arg(long = "max-workers", default_value_t = 100)]
    pub max_workers: usize,

    /// Run N workers once, print their messages and exit.
    #[arg(long)]
    pub run: Option<usize>,
}

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Config {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            workers: 5,
            delay_ms: DEFAULT_WORK_DELAY.as_millis() as u64,
            max_workers: 100,
            run: None,
        }
    }

    pub fn work_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn check_count(&self, count: usize) -> Result<(), ConfigError> {
        if count > self.max_workers {
            return Err(ConfigError::TooManyWorkers {
                requested: count,
                max: self.max_workers,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("main-worker")
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        self.check_count(self.workers)?;
        if let Some(count) = self.run {
            self.check_count(count)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config({}, {} workers)", self.name, self.workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.is_valid());
        assert_eq!(config.work_delay(), DEFAULT_WORK_DELAY);
        assert_eq!(config.to_string(), "Config(main-worker, 5 workers)");
    }

    #[test]
    fn empty_name_is_rejected() {
        let config = Config::new("  ");
        assert_eq!(config.validate(), Err(ConfigError::EmptyName));
    }

    #[test]
    fn too_many_workers_is_rejected() {
        let mut config = Config::default();
        config.workers = 101;
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyWorkers { requested: 101, max: 100 })
        );
    }

    #[test]
    fn parses_flags() {
        let config = Config::parse_from([
            "worker_fanout",
            "--name",
            "alpha",
            "--workers",
            "3",
            "--delay-ms",
            "10",
            "--run",
            "2",
        ]);
        assert_eq!(config.name, "alpha");
        assert_eq!(config.workers, 3);
        assert_eq!(config.work_delay(), Duration::from_millis(10));
        assert_eq!(config.run, Some(2));
        assert!(config.is_valid());
    }
}
