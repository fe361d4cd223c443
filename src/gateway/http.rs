//! HTTP surface for the invocation gateway
//!
//! Every response carries `Access-Control-Allow-Origin: *` so browser callers
//! can read errors as well as answers. Gateway-level errors (unknown route,
//! wrong method, unreadable body) also carry the allowed request headers.

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::error::Result;
use crate::gateway::handler::{Gateway, InvocationResult};

const ALLOWED_ORIGIN: &str = "*";
const ALLOWED_HEADERS: &str = "Content-Type,Authorization";
const ALLOWED_METHODS: &str = "OPTIONS,GET,PUT,POST,DELETE,PATCH,HEAD";

/// Build the gateway router
pub fn router(gateway: Gateway) -> Router {
    Router::new()
        .route(
            "/invoke",
            post(invoke).options(preflight).fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .fallback(not_found)
        .with_state(gateway)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(gateway: Gateway, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Gateway listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

// -- Handlers --

async fn invoke(State(gateway): State<Gateway>, body: std::result::Result<Bytes, BytesRejection>) -> Response {
    match body {
        Ok(body) => gateway_response(gateway.handle(&body).await),
        Err(rejection) => {
            log::warn!("Rejected request body: {}", rejection.body_text());
            gateway_error(rejection.status(), json!({ "message": rejection.body_text() }))
        }
    }
}

async fn preflight() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOWED_ORIGIN));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS));
    response
}

async fn health_check() -> Response {
    with_origin((StatusCode::OK, Json(json!({ "status": "ok" }))).into_response())
}

async fn not_found() -> Response {
    gateway_error(StatusCode::NOT_FOUND, json!({ "message": "Missing Authentication Token" }))
}

async fn method_not_allowed() -> Response {
    gateway_error(StatusCode::METHOD_NOT_ALLOWED, json!({ "message": "Method Not Allowed" }))
}

// -- Response helpers --

fn gateway_response(result: InvocationResult) -> Response {
    with_origin((result.status, Json(result.body)).into_response())
}

fn gateway_error(status: StatusCode, body: Value) -> Response {
    let mut response = with_origin((status, Json(body)).into_response());
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS));
    response
}

fn with_origin(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOWED_ORIGIN));
    response
}
