//! Domain types for agentcore-relay
//!
//! - BuildJob / BuildStatus: handle into the external build service
//! - WaitOutcome: terminal result of one build wait

pub mod build;
pub mod outcome;

pub use build::{BuildJob, BuildStatus};
pub use outcome::WaitOutcome;
