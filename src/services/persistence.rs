use std::time::{Duration, SystemTime};

use tokio::{task, time::sleep};
use tracing::{debug, info, warn};

use crate::{
    dto::{format_system_time, stats::SaveResponse},
    error::ServiceError,
    state::SharedState,
};

/// Write the current stats to disk without blocking the async runtime.
pub async fn save_now(state: &SharedState) -> Result<SaveResponse, ServiceError> {
    let storage = state.local_storage();
    let path = storage.save_path().display().to_string();

    task::spawn_blocking(move || storage.save_stats())
        .await
        .map_err(|err| ServiceError::Internal(format!("save task failed: {err}")))??;

    let saved_at = SystemTime::now();
    state.record_save(saved_at).await;

    Ok(SaveResponse {
        path,
        saved_at: format_system_time(saved_at),
    })
}

/// Periodically persist stats until the task is aborted.
///
/// Failed saves are logged and retried on the next tick; in-memory data is never dropped.
pub async fn run_autosave(state: SharedState, interval: Duration) {
    info!(interval_secs = interval.as_secs(), "autosave enabled");

    loop {
        sleep(interval).await;

        match save_now(&state).await {
            Ok(saved) => debug!(path = %saved.path, "autosave complete"),
            Err(err) => warn!(error = %err, "autosave failed; keeping data in memory"),
        }
    }
}
