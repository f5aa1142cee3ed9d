//! Periodic trigger for the rebooking workflow.
//!
//! The scheduler fires on a fixed period. Each tick spawns one run guarded by
//! a [`RunGuard`], so a slow run makes later ticks skip instead of starting a
//! second run against the same account.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::rebooking::RebookingService;
use crate::domain::Outcome;

/// Mutual exclusion around one workflow execution.
#[derive(Debug, Clone, Default)]
pub struct RunGuard {
    lock: Arc<Mutex<()>>,
}

/// Held for the duration of one run.
#[derive(Debug)]
pub struct RunPermit {
    _guard: OwnedMutexGuard<()>,
}

impl RunGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the guard, or `None` when a run is already in flight.
    #[must_use]
    pub fn try_acquire(&self) -> Option<RunPermit> {
        Arc::clone(&self.lock)
            .try_lock_owned()
            .ok()
            .map(|guard| RunPermit { _guard: guard })
    }

    /// Wait until no run is in flight.
    pub async fn wait_idle(&self) {
        drop(self.lock.lock().await);
    }
}

/// Fixed-period trigger for [`RebookingService`].
pub struct Scheduler {
    service: Arc<RebookingService>,
    period: Duration,
    guard: RunGuard,
}

impl Scheduler {
    pub fn new(service: Arc<RebookingService>, period: Duration) -> Self {
        Self {
            service,
            period,
            guard: RunGuard::new(),
        }
    }

    #[must_use]
    pub fn guard(&self) -> &RunGuard {
        &self.guard
    }

    /// Run until `shutdown` resolves, handing every outcome to `on_outcome`.
    ///
    /// The first run starts immediately. On shutdown, waits for an in-flight
    /// run to finish before returning.
    pub async fn run_until<S, F>(&self, shutdown: S, on_outcome: F)
    where
        S: Future<Output = ()>,
        F: Fn(&Outcome) + Send + Sync + 'static,
    {
        let on_outcome = Arc::new(on_outcome);
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(interval_secs = self.period.as_secs(), "Scheduler started");

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    let Some(permit) = self.guard.try_acquire() else {
                        warn!("Previous run still in progress, skipping tick");
                        continue;
                    };
                    let service = Arc::clone(&self.service);
                    let on_outcome = Arc::clone(&on_outcome);
                    tokio::spawn(async move {
                        let outcome = service.run().await;
                        on_outcome(&outcome);
                        drop(permit);
                    });
                }
            }
        }

        self.guard.wait_idle().await;
        debug!("Scheduler stopped");
    }
}
