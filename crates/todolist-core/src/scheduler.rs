//! Periodic overdue-task closure.
//!
//! Two entry points over the same repository operations: a one-shot pass
//! gated on an operator confirmation, and a daemon loop on a fixed period.
//! The daemon runs its first pass immediately, never overlaps passes, and
//! treats a storage error in one pass as "zero tasks closed this cycle" —
//! the next tick still fires on schedule. Only the injected shutdown
//! future stops the loop.
//!
//! Single-instance only: running two daemon loops against the same store
//! is unsupported and may double-count closures.

use crate::error::CoreError;
use crate::models::Task;
use crate::repository::TaskRepository;
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Default closure period: every 15 minutes.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(15 * 60);

/// Outcome of a confirmed one-shot run.
#[derive(Debug, PartialEq, Eq)]
pub enum OnceOutcome {
    /// Nothing was overdue; no confirmation was requested.
    NoOverdue,
    /// The operator declined; no state changed.
    Declined,
    /// The operator confirmed and this many tasks were closed.
    Closed(u64),
}

pub struct Scheduler<R> {
    repo: Arc<R>,
    period: Duration,
}

impl<R: TaskRepository + Send + Sync> Scheduler<R> {
    pub fn new(repo: Arc<R>, period: Duration) -> Self {
        Self { repo, period }
    }

    pub fn with_default_period(repo: Arc<R>) -> Self {
        Self::new(repo, DEFAULT_PERIOD)
    }

    /// Synchronous single pass: report the overdue set to `confirm` and
    /// close it only on a `true` answer. Storage errors propagate here —
    /// this is the interactive path.
    pub async fn run_once<F>(&self, confirm: F) -> Result<OnceOutcome, CoreError>
    where
        F: FnOnce(&[Task]) -> bool,
    {
        let overdue = self.repo.find_overdue(Utc::now()).await?;
        if overdue.is_empty() {
            return Ok(OnceOutcome::NoOverdue);
        }
        if !confirm(&overdue) {
            return Ok(OnceOutcome::Declined);
        }
        let closed = self.repo.close_overdue(Utc::now()).await?;
        Ok(OnceOutcome::Closed(closed))
    }

    /// One unattended closure pass. Errors are logged and mapped to a
    /// count of zero so the daemon loop is fatal-error-free.
    pub async fn run_pass(&self) -> u64 {
        match self.repo.close_overdue(Utc::now()).await {
            Ok(0) => {
                info!("no overdue tasks to close");
                0
            }
            Ok(closed) => {
                info!(closed, "closed overdue tasks");
                closed
            }
            Err(err) => {
                error!(error = %err, "overdue closure pass failed");
                0
            }
        }
    }

    /// Daemon loop: an immediate pass, then one pass per period until
    /// `shutdown` resolves. The sleep between passes is the only
    /// suspension point, so cancellation takes effect within the current
    /// interval.
    pub async fn run_until<S>(&self, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        info!(period_secs = self.period.as_secs(), "scheduler started");

        let mut ticker = tokio::time::interval(self.period);
        // A pass that outlives its period must not cause a burst of
        // catch-up passes; the next tick waits a full period.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("scheduler stopped");
                    return;
                }
                _ = ticker.tick() => {
                    self.run_pass().await;
                }
            }
        }
    }
}
