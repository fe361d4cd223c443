//! agentcore-relay - wiring around a managed agent runtime
//!
//! Two pieces live here:
//! - a build waiter that polls a container image build until it is terminal
//!   and reports the outcome to the orchestrator's callback URL
//! - an invocation gateway that forwards `{prompt}` requests to the deployed
//!   agent and relays its answer

pub mod aws;
pub mod build;
pub mod clock;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod id;
pub mod resource;

pub use error::{RelayError, Result};
