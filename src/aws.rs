//! Shared AWS SDK plumbing
//!
//! SDK configuration is loaded once at startup and every client built from it
//! is reused for the life of the process.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_codebuild::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

/// Load the default credential/region chain, pinned to `region` when given
pub async fn load_sdk_config(region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region.filter(|r| !r.is_empty()) {
        loader = loader.region(Region::new(region.to_string()));
    }
    let config = loader.load().await;
    log::debug!("Loaded AWS config for region {:?}", config.region());
    config
}

/// Best human-readable message for an SDK failure
///
/// Service errors carry their own message (e.g. "Rate exceeded"); transport
/// and dispatch failures fall back to the full error chain.
pub fn describe_sdk_error<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.as_service_error().and_then(|e| e.message()) {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(err).to_string(),
    }
}
