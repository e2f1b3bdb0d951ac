use std::sync::Arc;

use chrono::Duration;

use crate::api::RideAPI;

const FALLBACK_INTERVAL: std::time::Duration = std::time::Duration::from_secs(30);

/// Periodically cancels rides that have been `PENDING` for longer than `timeout`.
/// Runs until the task is dropped.
#[tracing::instrument(name = "sweeper", skip(api))]
pub async fn run<T>(api: Arc<T>, timeout: Duration, every: Duration)
where
    T: RideAPI + Send + Sync + ?Sized,
{
    let mut ticker = tokio::time::interval(every.to_std().unwrap_or(FALLBACK_INTERVAL));

    loop {
        ticker.tick().await;

        match api.cancel_stale_rides(timeout).await {
            Ok(cancelled) if cancelled.is_empty() => tracing::debug!("no stale rides"),
            Ok(cancelled) => tracing::info!(count = cancelled.len(), "swept stale rides"),
            Err(err) => tracing::error!(%err, "failed to sweep stale rides"),
        }
    }
}
