//! Agent runtime seam and its AgentCore implementation

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockagentcore::Client;
use aws_sdk_bedrockagentcore::primitives::Blob;

use crate::aws::describe_sdk_error;
use crate::error::{RelayError, Result};

/// One session-scoped call against the agent runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// User prompt (validated non-empty)
    pub prompt: String,

    /// Fresh per call, correlates the agent's conversational context
    pub session_id: String,

    /// Target runtime ARN
    pub runtime_arn: String,

    /// Endpoint qualifier, e.g. "DEFAULT"
    pub qualifier: String,

    /// Encoded JSON payload embedding the prompt
    pub payload: Vec<u8>,
}

/// Stateless agent runtime client - each call is independent
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Invoke the agent once and return the raw response bytes
    async fn invoke(&self, request: &InvocationRequest) -> Result<Vec<u8>>;
}

/// Bedrock AgentCore runtime client
#[derive(Debug, Clone)]
pub struct AgentCoreRuntime {
    client: Client,
}

impl AgentCoreRuntime {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl AgentRuntime for AgentCoreRuntime {
    async fn invoke(&self, request: &InvocationRequest) -> Result<Vec<u8>> {
        log::debug!(
            "Invoking agent runtime {} ({}) session {}",
            request.runtime_arn,
            request.qualifier,
            request.session_id
        );

        let output = self
            .client
            .invoke_agent_runtime()
            .agent_runtime_arn(&request.runtime_arn)
            .qualifier(&request.qualifier)
            .runtime_session_id(&request.session_id)
            .payload(Blob::new(request.payload.clone()))
            .send()
            .await
            .map_err(|e| RelayError::AgentRuntime(describe_sdk_error(&e)))?;

        let body = output
            .response
            .collect()
            .await
            .map_err(|e| RelayError::AgentRuntime(format!("Failed to read agent response: {}", e)))?;

        Ok(body.into_bytes().to_vec())
    }
}
