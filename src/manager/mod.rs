pub mod lookup;
pub mod worker_manager;
