//! Build service seams
//!
//! The waiter only needs a status lookup; the trigger only needs to start a
//! build. Both are traits so tests can script the service.

use async_trait::async_trait;

use crate::domain::{BuildJob, BuildStatus};
use crate::error::Result;

/// Read-only status lookup for a build job
#[async_trait]
pub trait BuildStatusSource: Send + Sync {
    /// Query the current status of `build_id` once
    async fn status(&self, build_id: &str) -> Result<BuildStatus>;
}

/// Starts asynchronous build jobs
#[async_trait]
pub trait BuildStarter: Send + Sync {
    /// Start a build for `project` and return the new job
    async fn start(&self, project: &str) -> Result<BuildJob>;
}
