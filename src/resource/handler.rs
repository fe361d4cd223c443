//! Custom resource handler
//!
//! Turns one trigger event into one outcome and delivers it exactly once.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::build::BuildWaiter;
use crate::domain::WaitOutcome;
use crate::resource::event::{ResourceResponse, TriggerEvent};
use crate::resource::sink::ResultSink;

/// Handles build-waiter trigger events
pub struct CustomResourceHandler {
    waiter: BuildWaiter,
    sink: Arc<dyn ResultSink>,
}

impl CustomResourceHandler {
    pub fn new(waiter: BuildWaiter, sink: Arc<dyn ResultSink>) -> Self {
        Self { waiter, sink }
    }

    /// Compute the outcome for `event`, deliver it, and return it
    ///
    /// Delivery failures are logged; the returned outcome is unaffected.
    pub async fn handle(&self, event: &TriggerEvent) -> WaitOutcome {
        log::info!(
            "Event: {:?} {} (request {})",
            event.request_type,
            event.logical_resource_id,
            event.request_id
        );

        let (outcome, data) = self.evaluate(event).await;

        match &outcome {
            WaitOutcome::Success => log::info!("Build waiter succeeded for {}", event.logical_resource_id),
            WaitOutcome::Failure(reason) => log::error!("Build waiter failed: {}", reason),
            WaitOutcome::Timeout(reason) => log::error!("Build waiter timed out: {}", reason),
        }

        let response = ResourceResponse::from_outcome(event, &outcome, data);
        if let Err(e) = self.sink.deliver(&event.response_url, &response).await {
            log::error!("Failed to deliver outcome for request {}: {}", event.request_id, e);
        }

        outcome
    }

    async fn evaluate(&self, event: &TriggerEvent) -> (WaitOutcome, Value) {
        if event.is_delete() {
            // Teardown never needs a finished build
            return (WaitOutcome::Success, json!({ "Status": "DELETED" }));
        }

        let Some(build_id) = event.build_id() else {
            return (
                WaitOutcome::Failure("BuildId is required".to_string()),
                ResourceResponse::no_data(),
            );
        };

        let outcome = self.waiter.wait(build_id).await;
        let data = if outcome.is_success() {
            json!({ "Status": "SUCCEEDED" })
        } else {
            ResourceResponse::no_data()
        };
        (outcome, data)
    }
}

/// Deliver FAILED for an event that never reached a handler
///
/// Used when the raw event does not parse or the waiter cannot be set up.
/// Returns false when there is no callback URL to deliver to.
pub async fn reject_event(sink: &dyn ResultSink, raw: &str, reason: &str) -> bool {
    let Some((response_url, response)) = ResourceResponse::rejection(raw, reason) else {
        log::error!("Cannot report rejected event, no ResponseURL: {}", reason);
        return false;
    };

    log::error!("Rejecting event (request {}): {}", response.request_id, reason);
    if let Err(e) = sink.deliver(&response_url, &response).await {
        log::error!("Failed to deliver rejection for request {}: {}", response.request_id, e);
    }
    true
}
