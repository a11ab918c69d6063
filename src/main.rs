use clap::Parser;
use log::info;

use worker_fanout::app::{cli, logger};
use worker_fanout::{Config, Validate, WorkerManager};

fn main() -> anyhow::Result<()> {
    logger::init()?;

    let config = Config::parse();
    config.validate()?;
    info!("Loaded {}", config);

    let run = config.run;
    let manager = WorkerManager::new(config);

    match run {
        Some(count) => cli::run_once(&manager, count)?,
        None => cli::run_cli(&manager)?,
    }
    Ok(())
}
