//! Build waiter integration tests
//!
//! Runs trigger events through the handler with a scripted build service and
//! delivers the outcome over real HTTP to a local callback server.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use agentcore_relay::build::{BuildStatusSource, BuildWaiter, WaiterConfig};
use agentcore_relay::clock::FakeClock;
use agentcore_relay::domain::{BuildStatus, WaitOutcome};
use agentcore_relay::error::Result;
use agentcore_relay::resource::{CustomResourceHandler, HttpResultSink, TriggerEvent, reject_event};
use async_trait::async_trait;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::put;
use serde_json::Value;

struct ScriptedBuild {
    statuses: Mutex<VecDeque<BuildStatus>>,
    queries: AtomicUsize,
}

impl ScriptedBuild {
    fn new(statuses: Vec<BuildStatus>) -> Arc<Self> {
        Arc::new(Self {
            statuses: Mutex::new(statuses.into()),
            queries: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl BuildStatusSource for ScriptedBuild {
    async fn status(&self, _build_id: &str) -> Result<BuildStatus> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(BuildStatus::InProgress))
    }
}

#[derive(Clone, Default)]
struct Callbacks {
    received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    reply: Option<StatusCode>,
}

async fn record_callback(State(callbacks): State<Callbacks>, headers: HeaderMap, body: String) -> StatusCode {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    callbacks.received.lock().unwrap().push((content_type, json));
    callbacks.reply.unwrap_or(StatusCode::OK)
}

async fn start_callback_server(callbacks: Callbacks) -> SocketAddr {
    let app = Router::new()
        .route("/callback", put(record_callback))
        .with_state(callbacks);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn trigger(request_type: &str, addr: SocketAddr) -> TriggerEvent {
    let raw = format!(
        r#"{{
            "RequestType": "{}",
            "ResponseURL": "http://{}/callback?X-Amz-Signature=abc",
            "StackId": "arn:aws:cloudformation:us-east-1:123:stack/AgentCoreStack/1",
            "RequestId": "8f1c-req",
            "LogicalResourceId": "BuildWaiter",
            "LogStreamName": "2026/10/18/[$LATEST]f00",
            "ResourceProperties": {{ "BuildId": "agent-image-build:7c1e" }}
        }}"#,
        request_type, addr
    );
    TriggerEvent::from_json(&raw).unwrap()
}

fn handler(build: Arc<ScriptedBuild>, clock: FakeClock) -> CustomResourceHandler {
    let waiter = BuildWaiter::new(build, Arc::new(clock), WaiterConfig::default());
    let sink = Arc::new(HttpResultSink::with_timeout(Duration::from_secs(5)).unwrap());
    CustomResourceHandler::new(waiter, sink)
}

#[tokio::test]
async fn test_create_waits_then_signals_success() {
    let callbacks = Callbacks::default();
    let addr = start_callback_server(callbacks.clone()).await;
    let build = ScriptedBuild::new(vec![
        BuildStatus::InProgress,
        BuildStatus::InProgress,
        BuildStatus::InProgress,
        BuildStatus::Succeeded,
    ]);
    let clock = FakeClock::new();

    let outcome = handler(build.clone(), clock.clone()).handle(&trigger("Create", addr)).await;

    assert_eq!(outcome, WaitOutcome::Success);
    assert_eq!(build.queries.load(Ordering::SeqCst), 4);
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(30); 3]);

    let received = callbacks.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (content_type, body) = &received[0];
    assert_eq!(content_type.as_deref(), Some(""));
    assert_eq!(body["Status"], "SUCCESS");
    assert_eq!(body["Reason"], "See CloudWatch Log Stream: 2026/10/18/[$LATEST]f00");
    assert_eq!(body["PhysicalResourceId"], "8f1c-req");
    assert_eq!(body["RequestId"], "8f1c-req");
    assert_eq!(body["LogicalResourceId"], "BuildWaiter");
    assert_eq!(body["Data"]["Status"], "SUCCEEDED");
}

#[tokio::test]
async fn test_failed_build_signals_failure() {
    let callbacks = Callbacks::default();
    let addr = start_callback_server(callbacks.clone()).await;
    let build = ScriptedBuild::new(vec![BuildStatus::InProgress, BuildStatus::Fault]);

    let outcome = handler(build.clone(), FakeClock::new())
        .handle(&trigger("Update", addr))
        .await;

    assert_eq!(outcome, WaitOutcome::Failure("Build failed with status: FAULT".to_string()));
    assert_eq!(build.queries.load(Ordering::SeqCst), 2);

    let received = callbacks.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].1["Status"], "FAILED");
    assert_eq!(received[0].1["Reason"], "Build failed with status: FAULT");
}

#[tokio::test]
async fn test_deadline_signals_timeout() {
    let callbacks = Callbacks::default();
    let addr = start_callback_server(callbacks.clone()).await;
    let build = ScriptedBuild::new(vec![]);

    let outcome = handler(build, FakeClock::new()).handle(&trigger("Create", addr)).await;

    assert_eq!(outcome, WaitOutcome::Timeout("Build timeout after 14 minutes".to_string()));
    let received = callbacks.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].1["Status"], "FAILED");
    assert_eq!(received[0].1["Reason"], "Build timeout after 14 minutes");
}

#[tokio::test]
async fn test_delete_signals_without_polling() {
    let callbacks = Callbacks::default();
    let addr = start_callback_server(callbacks.clone()).await;
    let build = ScriptedBuild::new(vec![BuildStatus::Failed]);

    let outcome = handler(build.clone(), FakeClock::new())
        .handle(&trigger("Delete", addr))
        .await;

    assert_eq!(outcome, WaitOutcome::Success);
    assert_eq!(build.queries.load(Ordering::SeqCst), 0);

    let received = callbacks.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].1["Status"], "SUCCESS");
    assert_eq!(received[0].1["Data"]["Status"], "DELETED");
}

#[tokio::test]
async fn test_rejected_callback_does_not_change_outcome() {
    let callbacks = Callbacks {
        reply: Some(StatusCode::FORBIDDEN),
        ..Default::default()
    };
    let addr = start_callback_server(callbacks.clone()).await;
    let build = ScriptedBuild::new(vec![BuildStatus::Succeeded]);

    let outcome = handler(build, FakeClock::new()).handle(&trigger("Create", addr)).await;

    assert_eq!(outcome, WaitOutcome::Success);
    assert_eq!(callbacks.received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_callback_does_not_change_outcome() {
    // Bind then drop so nothing listens on the port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let build = ScriptedBuild::new(vec![BuildStatus::Stopped]);
    let outcome = handler(build, FakeClock::new()).handle(&trigger("Create", addr)).await;

    assert_eq!(outcome, WaitOutcome::Failure("Build failed with status: STOPPED".to_string()));
}

#[tokio::test]
async fn test_unparseable_event_still_signals_failure() {
    let callbacks = Callbacks::default();
    let addr = start_callback_server(callbacks.clone()).await;
    let raw = format!(
        r#"{{"RequestType":42,"ResponseURL":"http://{}/callback","RequestId":"r-2","LogicalResourceId":"BuildWaiter"}}"#,
        addr
    );
    let reason = TriggerEvent::from_json(&raw).unwrap_err().to_string();

    let sink = HttpResultSink::with_timeout(Duration::from_secs(5)).unwrap();
    assert!(reject_event(&sink, &raw, &reason).await);

    let received = callbacks.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (content_type, body) = &received[0];
    assert_eq!(content_type.as_deref(), Some(""));
    assert_eq!(body["Status"], "FAILED");
    assert_eq!(body["Reason"], reason);
    assert_eq!(body["PhysicalResourceId"], "r-2");
    assert_eq!(body["LogicalResourceId"], "BuildWaiter");
}
