//! Invocation gateway - one inbound request, one agent call, one response
//!
//! No state survives a call and nothing is retried: re-running a
//! conversational agent can have side effects.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::error::{RelayError, Result};
use crate::gateway::payload::PayloadShape;
use crate::gateway::runtime::{AgentRuntime, InvocationRequest};
use crate::id::generate_session_id;

/// Error body for a missing or empty prompt
pub const PROMPT_REQUIRED: &str = "Prompt is required";

/// Error label for every downstream failure
pub const INVOKE_FAILED: &str = "Failed to invoke agent";

/// Default endpoint qualifier
pub const DEFAULT_QUALIFIER: &str = "DEFAULT";

/// Per-deployment gateway settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    pub runtime_arn: String,
    pub qualifier: String,
    pub payload_shape: PayloadShape,
    /// Echo the generated session ID in successful responses
    pub include_session_id: bool,
}

impl GatewaySettings {
    pub fn new(runtime_arn: impl Into<String>) -> Self {
        Self {
            runtime_arn: runtime_arn.into(),
            qualifier: DEFAULT_QUALIFIER.to_string(),
            payload_shape: PayloadShape::default(),
            include_session_id: true,
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = qualifier.into();
        self
    }

    pub fn with_payload_shape(mut self, shape: PayloadShape) -> Self {
        self.payload_shape = shape;
        self
    }

    pub fn with_session_id_echo(mut self, include: bool) -> Self {
        self.include_session_id = include;
        self
    }
}

/// Status code and JSON body produced for one request
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationResult {
    pub status: StatusCode,
    pub body: Value,
}

impl InvocationResult {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn prompt_required() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": PROMPT_REQUIRED }),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "error": INVOKE_FAILED, "message": message.into() }),
        }
    }
}

/// Forwards prompts to the agent runtime
#[derive(Clone)]
pub struct Gateway {
    runtime: Arc<dyn AgentRuntime>,
    settings: GatewaySettings,
}

impl Gateway {
    pub fn new(runtime: Arc<dyn AgentRuntime>, settings: GatewaySettings) -> Self {
        Self { runtime, settings }
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Handle a raw HTTP request body
    ///
    /// An empty body counts as `{}`. A body that is not JSON fails the call
    /// as a whole (500), the same as any other unexpected error.
    /// A `prompt` that is not a JSON string is treated as missing (400).
    pub async fn handle(&self, body: &[u8]) -> InvocationResult {
        let parsed: Value = if body.iter().all(u8::is_ascii_whitespace) {
            json!({})
        } else {
            match serde_json::from_slice(body) {
                Ok(value) => value,
                Err(e) => {
                    log::error!("Error parsing request body: {}", e);
                    return InvocationResult::failure(e.to_string());
                }
            }
        };

        self.handle_prompt(parsed.get("prompt").and_then(Value::as_str)).await
    }

    /// Validate the prompt, then invoke the agent
    pub async fn handle_prompt(&self, prompt: Option<&str>) -> InvocationResult {
        match prompt {
            Some(prompt) if !prompt.is_empty() => self.invoke(prompt).await,
            _ => InvocationResult::prompt_required(),
        }
    }

    /// Build the session-scoped request for `prompt`
    pub fn build_request(&self, prompt: &str) -> InvocationRequest {
        InvocationRequest {
            prompt: prompt.to_string(),
            session_id: generate_session_id(),
            runtime_arn: self.settings.runtime_arn.clone(),
            qualifier: self.settings.qualifier.clone(),
            payload: self.settings.payload_shape.encode(prompt),
        }
    }

    async fn invoke(&self, prompt: &str) -> InvocationResult {
        let request = self.build_request(prompt);
        log::info!("Generated session ID: {}", request.session_id);
        log::debug!("Payload being sent: {}", String::from_utf8_lossy(&request.payload));

        match self.call(&request).await {
            Ok(text) => {
                log::info!("Agent response received for session {}", request.session_id);
                let mut body = json!({ "response": text });
                if self.settings.include_session_id {
                    body["sessionId"] = json!(request.session_id);
                }
                InvocationResult::ok(body)
            }
            Err(e) => {
                log::error!("Error invoking agent (session {}): {}", request.session_id, e);
                InvocationResult::failure(e.detail())
            }
        }
    }

    async fn call(&self, request: &InvocationRequest) -> Result<String> {
        let bytes = self.runtime.invoke(request).await?;
        String::from_utf8(bytes)
            .map_err(|e| RelayError::AgentRuntime(format!("Agent response is not valid UTF-8: {}", e)))
    }
}
