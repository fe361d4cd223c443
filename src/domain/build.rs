//! Build job record and status
//!
//! A build job belongs to the external build service. We only ever observe it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a build job as reported by the build service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildStatus {
    /// Still running
    InProgress,
    /// Image built and pushed
    Succeeded,
    /// Build commands failed
    Failed,
    /// Build service fault
    Fault,
    /// Build exceeded its own timeout
    TimedOut,
    /// Stopped by a user or the service
    Stopped,
    /// Any value this crate does not recognize (treated as non-terminal)
    Unknown(String),
}

impl BuildStatus {
    /// Parse the service's status string
    pub fn parse(value: &str) -> Self {
        match value {
            "IN_PROGRESS" => BuildStatus::InProgress,
            "SUCCEEDED" => BuildStatus::Succeeded,
            "FAILED" => BuildStatus::Failed,
            "FAULT" => BuildStatus::Fault,
            "TIMED_OUT" => BuildStatus::TimedOut,
            "STOPPED" => BuildStatus::Stopped,
            other => BuildStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BuildStatus::InProgress => "IN_PROGRESS",
            BuildStatus::Succeeded => "SUCCEEDED",
            BuildStatus::Failed => "FAILED",
            BuildStatus::Fault => "FAULT",
            BuildStatus::TimedOut => "TIMED_OUT",
            BuildStatus::Stopped => "STOPPED",
            BuildStatus::Unknown(other) => other,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Succeeded)
    }

    /// Returns true for the terminal-failure set
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            BuildStatus::Failed | BuildStatus::Fault | BuildStatus::TimedOut | BuildStatus::Stopped
        )
    }

    /// Returns true if no further transition can happen
    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for BuildStatus {
    fn from(value: String) -> Self {
        BuildStatus::parse(&value)
    }
}

impl From<BuildStatus> for String {
    fn from(status: BuildStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Handle to one external build job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildJob {
    pub id: String,
    pub status: BuildStatus,
}

impl BuildJob {
    pub fn new(id: impl Into<String>, status: BuildStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}
