use std::{thread, time::Duration};

use crossbeam_channel::{bounded, select, Receiver, Sender};
use log::{debug, error, info};

use crate::models::{cancel::CancelToken, worker::Worker};

pub const DEFAULT_WORK_DELAY: Duration = Duration::from_millis(100);

/// Spawns `count` workers and returns the channel their completion messages
/// arrive on. The channel closes once every worker has either delivered its
/// message or given up because `cancel` fired.
pub fn run_workers(cancel: &CancelToken, count: usize, work_delay: Duration) -> Receiver<String> {
    let (sender, receiver) = bounded(count);
    let cancel = cancel.clone();

    thread::spawn(move || {
        info!("Starting {} workers.", count);
        let mut handles = Vec::with_capacity(count);

        for id in 0..count as u64 {
            let sender = sender.clone();
            let cancel = cancel.clone();
            let spawned = thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || run_worker(id, work_delay, &sender, &cancel));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => error!("Failed to spawn worker {}: {}", id, e),
            }
        }
        // Only the workers' clones keep the channel open from here on.
        drop(sender);

        for handle in handles {
            if handle.join().is_err() {
                error!("Worker thread panicked");
            }
        }
        info!("All workers finished.");
    });

    receiver
}

fn run_worker(id: u64, work_delay: Duration, results: &Sender<String>, cancel: &CancelToken) {
    let worker = Worker::new(id, format!("worker-{}", id));
    thread::sleep(work_delay);

    if cancel.is_cancelled() {
        debug!("Worker '{}' cancelled before reporting.", worker.name());
        return;
    }

    let message = format!("Worker {} completed", worker.id());
    match hand_off(message, results, cancel) {
        Handoff::Delivered => {}
        Handoff::Disconnected => {
            debug!("Worker '{}' result dropped, receiver gone.", worker.name())
        }
        Handoff::Cancelled => debug!("Worker '{}' cancelled during hand-off.", worker.name()),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Handoff {
    Delivered,
    Disconnected,
    Cancelled,
}

/// Blocks until `message` is sent or `cancel` fires, whichever comes first.
fn hand_off(message: String, results: &Sender<String>, cancel: &CancelToken) -> Handoff {
    select! {
        send(results, message) -> res => match res {
            Ok(()) => Handoff::Delivered,
            Err(_) => Handoff::Disconnected,
        },
        recv(cancel.done()) -> _ => Handoff::Cancelled,
    }
}
