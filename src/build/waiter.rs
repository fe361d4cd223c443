//! Build waiter - polls a build job until it is terminal or the deadline passes
//!
//! One status query per iteration, one sleep between queries. A failed query
//! ends the wait immediately; it is never retried. A query that is still
//! pending when the deadline passes is abandoned and the wait times out.

use std::sync::Arc;
use std::time::Duration;

use crate::build::source::BuildStatusSource;
use crate::clock::Clock;
use crate::domain::WaitOutcome;

/// Default overall deadline (the hosting platform kills the process at 15 minutes)
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(14 * 60);

/// Default interval between status queries
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Timing configuration for the waiter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaiterConfig {
    /// Overall wall-clock budget
    pub max_wait: Duration,
    /// Sleep between status queries
    pub poll_interval: Duration,
}

impl Default for WaiterConfig {
    fn default() -> Self {
        Self {
            max_wait: DEFAULT_MAX_WAIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaiterConfig {
    pub fn new(max_wait: Duration, poll_interval: Duration) -> Self {
        Self {
            max_wait,
            poll_interval,
        }
    }
}

/// Polls a build status source until a terminal outcome
pub struct BuildWaiter {
    source: Arc<dyn BuildStatusSource>,
    clock: Arc<dyn Clock>,
    config: WaiterConfig,
}

impl BuildWaiter {
    pub fn new(source: Arc<dyn BuildStatusSource>, clock: Arc<dyn Clock>, config: WaiterConfig) -> Self {
        Self { source, clock, config }
    }

    pub fn config(&self) -> &WaiterConfig {
        &self.config
    }

    /// Wait for `build_id` to reach a terminal status
    pub async fn wait(&self, build_id: &str) -> WaitOutcome {
        log::info!("Waiting for build: {}", build_id);

        let started = self.clock.now();
        let mut polls: u32 = 0;

        while self.clock.now().duration_since(started) < self.config.max_wait {
            polls += 1;

            // A query in flight still counts against the deadline
            let remaining = self
                .config
                .max_wait
                .saturating_sub(self.clock.now().duration_since(started));
            let Ok(result) = tokio::time::timeout(remaining, self.source.status(build_id)).await else {
                tracing::warn!(build_id, poll = polls, "Build status query still pending at deadline");
                break;
            };

            match result {
                Ok(status) => {
                    tracing::info!(build_id, status = %status, poll = polls, "Build status");

                    if status.is_success() {
                        return WaitOutcome::Success;
                    }
                    if status.is_failure() {
                        return WaitOutcome::Failure(format!("Build failed with status: {}", status));
                    }
                }
                Err(e) => {
                    tracing::error!(build_id, poll = polls, error = %e, "Build status query failed");
                    return WaitOutcome::Failure(e.detail());
                }
            }

            self.clock.sleep(self.config.poll_interval).await;
        }

        let reason = format!("Build timeout after {}", describe_duration(self.config.max_wait));
        tracing::warn!(build_id, polls, "{}", reason);
        WaitOutcome::Timeout(reason)
    }
}

/// "14 minutes" for whole minutes, "90 seconds" otherwise
fn describe_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{} seconds", secs)
    }
}
