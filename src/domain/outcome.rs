//! Build wait outcome types.
//!
//! This module defines the single terminal result of one wait cycle.

use serde::{Deserialize, Serialize};

/// Outcome of waiting on a build job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "lowercase")]
pub enum WaitOutcome {
    /// Build succeeded, or teardown needed no verification
    Success,
    /// Build reached a failed terminal status or the status query errored
    Failure(String),
    /// Deadline passed before any terminal status was observed
    Timeout(String),
}

impl WaitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WaitOutcome::Success)
    }

    /// Reason text for non-success outcomes
    pub fn reason(&self) -> Option<&str> {
        match self {
            WaitOutcome::Success => None,
            WaitOutcome::Failure(reason) | WaitOutcome::Timeout(reason) => Some(reason),
        }
    }
}
