//! CodeBuild-backed implementation of the build seams

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_codebuild::Client;

use crate::aws::describe_sdk_error;
use crate::build::source::{BuildStarter, BuildStatusSource};
use crate::domain::{BuildJob, BuildStatus};
use crate::error::{RelayError, Result};

/// CodeBuild client wrapper
#[derive(Debug, Clone)]
pub struct CodeBuildClient {
    client: Client,
}

impl CodeBuildClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl BuildStatusSource for CodeBuildClient {
    async fn status(&self, build_id: &str) -> Result<BuildStatus> {
        let output = self
            .client
            .batch_get_builds()
            .ids(build_id)
            .send()
            .await
            .map_err(|e| RelayError::BuildService(describe_sdk_error(&e)))?;

        let build = output
            .builds()
            .first()
            .ok_or_else(|| RelayError::BuildService(format!("Build not found: {}", build_id)))?;

        Ok(build
            .build_status()
            .map(|s| BuildStatus::parse(s.as_str()))
            .unwrap_or(BuildStatus::InProgress))
    }
}

#[async_trait]
impl BuildStarter for CodeBuildClient {
    async fn start(&self, project: &str) -> Result<BuildJob> {
        let output = self
            .client
            .start_build()
            .project_name(project)
            .send()
            .await
            .map_err(|e| RelayError::BuildService(describe_sdk_error(&e)))?;

        let build = output
            .build_value()
            .ok_or_else(|| RelayError::BuildService(format!("StartBuild for {} returned no build", project)))?;
        let id = build
            .id()
            .ok_or_else(|| RelayError::BuildService(format!("StartBuild for {} returned no build id", project)))?;
        let status = build
            .build_status()
            .map(|s| BuildStatus::parse(s.as_str()))
            .unwrap_or(BuildStatus::InProgress);

        Ok(BuildJob::new(id, status))
    }
}
