//! Periodic removal of expired state blobs.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::domain::service::StateService;

/// Spawns the sweep loop. The first pass runs immediately; the loop exits
/// when `cancel` fires.
#[must_use]
pub fn spawn_state_sweeper(
    service: Arc<StateService>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval.max(Duration::from_secs(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = interval.as_secs(), "State sweeper started");
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = service.sweep(Utc::now()).await {
                        warn!(error = %e, "State sweep failed");
                    }
                }
            }
        }
        info!("State sweeper stopped");
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::DateTime;
    use uuid::Uuid;

    use crate::config::StateConfig;
    use crate::domain::model::StateBlob;
    use crate::domain::repos::StateRepository;

    #[derive(Default)]
    struct CountingRepo {
        sweeps: AtomicUsize,
    }

    #[async_trait]
    impl StateRepository for CountingRepo {
        async fn insert(&self, _blob: &StateBlob) -> anyhow::Result<()> {
            Ok(())
        }

        async fn find(&self, _id: Uuid) -> anyhow::Result<Option<StateBlob>> {
            Ok(None)
        }

        async fn delete_expired_before(&self, _cutoff: DateTime<Utc>) -> anyhow::Result<u64> {
            self.sweeps.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("database unavailable")
        }
    }

    #[tokio::test]
    async fn sweeper_survives_errors_and_stops_on_cancel() {
        let repo = Arc::new(CountingRepo::default());
        let service = Arc::new(StateService::new(repo.clone(), StateConfig::default()));
        let cancel = CancellationToken::new();

        let handle = spawn_state_sweeper(service, Duration::from_secs(3600), cancel.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();

        assert_eq!(repo.sweeps.load(Ordering::SeqCst), 1);
    }
}
