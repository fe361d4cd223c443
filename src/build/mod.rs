//! Build layer - start container image builds and wait for them to finish
//!
//! This module provides:
//! - BuildStatusSource / BuildStarter traits for the build service
//! - CodeBuildClient implementation
//! - BuildWaiter polling loop

pub mod codebuild;
pub mod source;
pub mod waiter;

pub use codebuild::CodeBuildClient;
pub use source::{BuildStarter, BuildStatusSource};
pub use waiter::{BuildWaiter, DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL, WaiterConfig};
