use agentcore_relay::build::WaiterConfig;
use agentcore_relay::gateway::{DEFAULT_QUALIFIER, GatewaySettings, PayloadShape};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub log_level: Option<String>,
    pub aws: AwsConfig,
    pub gateway: GatewayConfig,
    pub waiter: WaiterSettings,
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AwsConfig {
    /// Region override; the SDK's default chain applies when unset
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GatewayConfig {
    pub bind_addr: String,
    pub runtime_arn: String,
    pub qualifier: String,
    pub payload_shape: PayloadShape,
    pub include_session_id: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            runtime_arn: String::new(),
            qualifier: DEFAULT_QUALIFIER.to_string(),
            payload_shape: PayloadShape::Prompt,
            include_session_id: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WaiterSettings {
    pub max_wait_secs: u64,
    pub poll_interval_secs: u64,
    pub callback_timeout_secs: u64,
}

impl Default for WaiterSettings {
    fn default() -> Self {
        Self {
            max_wait_secs: 840,
            poll_interval_secs: 30,
            callback_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Build project started by `start-build` when none is given
    pub project: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            aws: AwsConfig::default(),
            gateway: GatewayConfig::default(),
            waiter: WaiterSettings::default(),
            build: BuildConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file(config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn load_file(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let project_config = PathBuf::from(format!("{}.yml", project_name));
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", project_config.display(), e);
                }
            }
        }

        // Try user location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Override file values with deployment environment variables
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(arn) = lookup("AGENT_RUNTIME_ARN") {
            self.gateway.runtime_arn = arn;
        }
        if let Some(qualifier) = lookup("AGENT_ENDPOINT_NAME") {
            self.gateway.qualifier = qualifier;
        }
        if let Some(region) = lookup("AWS_REGION") {
            self.aws.region = Some(region);
        }
        if let Some(addr) = lookup("RELAY_BIND_ADDR") {
            self.gateway.bind_addr = addr;
        }
        if let Some(shape) = lookup("RELAY_PAYLOAD_SHAPE") {
            self.gateway.payload_shape = shape.parse::<PayloadShape>().context("Invalid RELAY_PAYLOAD_SHAPE")?;
        }
        if let Some(include) = lookup("RELAY_INCLUDE_SESSION_ID") {
            self.gateway.include_session_id = matches!(include.trim(), "1" | "true" | "yes");
        }
        if let Some(project) = lookup("BUILD_PROJECT_NAME") {
            self.build.project = Some(project);
        }
        Ok(())
    }

    /// Validate waiter timing
    pub fn validate_waiter(&self) -> Result<()> {
        if self.waiter.max_wait_secs == 0 {
            eyre::bail!("waiter.max-wait-secs must be > 0");
        }
        if self.waiter.poll_interval_secs == 0 {
            eyre::bail!("waiter.poll-interval-secs must be > 0");
        }
        if self.waiter.callback_timeout_secs == 0 {
            eyre::bail!("waiter.callback-timeout-secs must be > 0");
        }
        if self.waiter.poll_interval_secs > self.waiter.max_wait_secs {
            eyre::bail!("waiter.poll-interval-secs must not exceed waiter.max-wait-secs");
        }
        Ok(())
    }

    /// Validate gateway settings
    pub fn validate_gateway(&self) -> Result<()> {
        if self.gateway.runtime_arn.trim().is_empty() {
            eyre::bail!("gateway.runtime-arn is not set (config file or AGENT_RUNTIME_ARN)");
        }
        if self.gateway.qualifier.trim().is_empty() {
            eyre::bail!("gateway.qualifier must not be empty");
        }
        Ok(())
    }

    pub fn waiter_config(&self) -> WaiterConfig {
        WaiterConfig::new(
            Duration::from_secs(self.waiter.max_wait_secs),
            Duration::from_secs(self.waiter.poll_interval_secs),
        )
    }

    pub fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.waiter.callback_timeout_secs)
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings::new(self.gateway.runtime_arn.clone())
            .with_qualifier(self.gateway.qualifier.clone())
            .with_payload_shape(self.gateway.payload_shape)
            .with_session_id_echo(self.gateway.include_session_id)
    }
}
