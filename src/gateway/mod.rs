//! Agent invocation gateway
//!
//! This module provides:
//! - PayloadShape for the two agent payload conventions
//! - AgentRuntime trait and AgentCoreRuntime implementation
//! - Gateway request handling
//! - axum router with CORS headers on every response

pub mod handler;
pub mod http;
pub mod payload;
pub mod runtime;

pub use handler::{DEFAULT_QUALIFIER, Gateway, GatewaySettings, INVOKE_FAILED, InvocationResult, PROMPT_REQUIRED};
pub use http::{router, serve};
pub use payload::PayloadShape;
pub use runtime::{AgentCoreRuntime, AgentRuntime, InvocationRequest};
