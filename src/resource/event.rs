//! Custom resource wire types
//!
//! Field names follow the orchestrator's PascalCase contract.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::WaitOutcome;
use crate::error::{RelayError, Result};

/// Lifecycle action requested by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// Properties declared on the waiter resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProperties {
    #[serde(rename = "BuildId", default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<String>,
}

/// Inbound trigger event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TriggerEvent {
    pub request_type: RequestType,

    #[serde(default)]
    pub resource_properties: ResourceProperties,

    /// Pre-signed URL that receives the outcome
    #[serde(rename = "ResponseURL")]
    pub response_url: String,

    #[serde(default)]
    pub stack_id: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub logical_resource_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,

    #[serde(default)]
    pub log_stream_name: String,
}

impl TriggerEvent {
    /// Parse an event from raw JSON
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| RelayError::InvalidEvent(e.to_string()))
    }

    /// Build ID to wait on, if present and non-empty
    pub fn build_id(&self) -> Option<&str> {
        self.resource_properties
            .build_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    pub fn is_delete(&self) -> bool {
        self.request_type == RequestType::Delete
    }
}

/// Status reported back to the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Outgoing completion signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceResponse {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub data: Value,
}

impl ResourceResponse {
    /// Build the response for `event` from a computed outcome
    ///
    /// `data` is attached verbatim; pass `json!({})` when there is nothing to report.
    pub fn from_outcome(event: &TriggerEvent, outcome: &WaitOutcome, data: Value) -> Self {
        let status = if outcome.is_success() {
            ResponseStatus::Success
        } else {
            ResponseStatus::Failed
        };

        let reason = match outcome.reason() {
            Some(reason) => reason.to_string(),
            None => format!("See CloudWatch Log Stream: {}", event.log_stream_name),
        };

        Self {
            status,
            reason,
            physical_resource_id: event
                .physical_resource_id
                .clone()
                .unwrap_or_else(|| event.request_id.clone()),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            data,
        }
    }

    /// Empty data payload
    pub fn no_data() -> Value {
        json!({})
    }

    /// FAILED response for an event that could not be handled at all
    ///
    /// Built from whatever fields `raw` carries. Returns the callback URL with
    /// the response, or `None` when `raw` has no usable `ResponseURL`.
    pub fn rejection(raw: &str, reason: &str) -> Option<(String, Self)> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

        let response_url = field("ResponseURL").filter(|url| !url.trim().is_empty())?;
        let request_id = field("RequestId").unwrap_or_default();

        let response = Self {
            status: ResponseStatus::Failed,
            reason: reason.to_string(),
            physical_resource_id: field("PhysicalResourceId").unwrap_or_else(|| request_id.clone()),
            stack_id: field("StackId").unwrap_or_default(),
            request_id,
            logical_resource_id: field("LogicalResourceId").unwrap_or_default(),
            data: Self::no_data(),
        };
        Some((response_url, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event_json(request_type: &str) -> String {
        format!(
            r#"{{
                "RequestType": "{}",
                "ServiceToken": "arn:aws:lambda:us-east-1:123:function:waiter",
                "ResponseURL": "https://example.com/callback?sig=abc",
                "StackId": "arn:aws:cloudformation:us-east-1:123:stack/agent/1",
                "RequestId": "req-1",
                "LogicalResourceId": "BuildWaiter",
                "LogStreamName": "2026/10/17/[$LATEST]abc",
                "ResourceType": "AWS::CloudFormation::CustomResource",
                "ResourceProperties": {{
                    "ServiceToken": "arn:aws:lambda:us-east-1:123:function:waiter",
                    "BuildId": "agent-build:42"
                }}
            }}"#,
            request_type
        )
    }

    #[test]
    fn test_parse_create_event() {
        let event = TriggerEvent::from_json(&sample_event_json("Create")).unwrap();
        assert_eq!(event.request_type, RequestType::Create);
        assert_eq!(event.build_id(), Some("agent-build:42"));
        assert_eq!(event.response_url, "https://example.com/callback?sig=abc");
        assert!(event.physical_resource_id.is_none());
        assert!(!event.is_delete());
    }

    #[test]
    fn test_parse_delete_event() {
        let event = TriggerEvent::from_json(&sample_event_json("Delete")).unwrap();
        assert!(event.is_delete());
    }

    #[test]
    fn test_parse_rejects_unknown_request_type() {
        let err = TriggerEvent::from_json(&sample_event_json("Destroy")).unwrap_err();
        assert!(matches!(err, RelayError::InvalidEvent(_)));
    }

    #[test]
    fn test_parse_tolerates_missing_ids() {
        let raw = r#"{"RequestType":"Create","ResponseURL":"http://x/cb","RequestId":"r","LogicalResourceId":"L","ResourceProperties":{"BuildId":"b"}}"#;
        let event = TriggerEvent::from_json(raw).unwrap();
        assert_eq!(event.stack_id, "");
        assert_eq!(event.request_id, "r");
        assert_eq!(event.build_id(), Some("b"));
    }

    #[test]
    fn test_rejection_uses_present_fields() {
        let (url, response) =
            ResourceResponse::rejection(&sample_event_json("Destroy"), "Invalid event: unknown variant").unwrap();

        assert_eq!(url, "https://example.com/callback?sig=abc");
        assert_eq!(response.status, ResponseStatus::Failed);
        assert_eq!(response.reason, "Invalid event: unknown variant");
        assert_eq!(response.physical_resource_id, "req-1");
        assert_eq!(response.stack_id, "arn:aws:cloudformation:us-east-1:123:stack/agent/1");
        assert_eq!(response.logical_resource_id, "BuildWaiter");
        assert_eq!(response.data, json!({}));
    }

    #[test]
    fn test_rejection_needs_callback_url() {
        assert!(ResourceResponse::rejection(r#"{"RequestType":"Create"}"#, "x").is_none());
        assert!(ResourceResponse::rejection(r#"{"ResponseURL":"  "}"#, "x").is_none());
        assert!(ResourceResponse::rejection("not json", "x").is_none());
    }

    #[test]
    fn test_blank_build_id_is_absent() {
        let mut event = TriggerEvent::from_json(&sample_event_json("Update")).unwrap();
        event.resource_properties.build_id = Some("  ".to_string());
        assert_eq!(event.build_id(), None);
    }

    #[test]
    fn test_success_response_uses_log_stream_reason() {
        let event = TriggerEvent::from_json(&sample_event_json("Create")).unwrap();
        let response =
            ResourceResponse::from_outcome(&event, &WaitOutcome::Success, json!({ "Status": "SUCCEEDED" }));

        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.reason, "See CloudWatch Log Stream: 2026/10/17/[$LATEST]abc");
        assert_eq!(response.physical_resource_id, "req-1");

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["Status"], "SUCCESS");
        assert_eq!(body["Data"]["Status"], "SUCCEEDED");
        assert_eq!(body["LogicalResourceId"], "BuildWaiter");
    }

    #[test]
    fn test_failure_response_keeps_physical_id() {
        let mut event = TriggerEvent::from_json(&sample_event_json("Update")).unwrap();
        event.physical_resource_id = Some("existing-id".to_string());

        let outcome = WaitOutcome::Failure("Build failed with status: FAULT".to_string());
        let response = ResourceResponse::from_outcome(&event, &outcome, ResourceResponse::no_data());

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["Status"], "FAILED");
        assert_eq!(body["Reason"], "Build failed with status: FAULT");
        assert_eq!(body["PhysicalResourceId"], "existing-id");
        assert_eq!(body["Data"], json!({}));
    }
}
