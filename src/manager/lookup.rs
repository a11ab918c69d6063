use crate::error::{Result, WorkerError};

/// Returns the payload stored under `id`.
pub fn fetch_data(id: &str) -> Result<Vec<u8>> {
    if id.is_empty() {
        return Err(WorkerError::NotFound);
    }

    Ok(format!("data for {}", id).into_bytes())
}
