//! Configuration types for autodns.

use serde::{Deserialize, Serialize};

use crate::error::MapperError;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mapper configuration.
    pub mapper: MapperConfig,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Keys are the flat variable names the deployment sets:
    /// `DOMAIN_NAME`, `ROUTE53_ZONE_ID`, `AWS_PRIMARY_REGION`, plus the
    /// optional `RECORD_TTL`, `RECORD_PREFIX`, `LOG_LEVEL` and `LOG_JSON`.
    pub fn from_env() -> Result<Self, MapperError> {
        let source = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .map_err(|e| MapperError::Config(e.to_string()))?;

        Ok(Self {
            mapper: source
                .clone()
                .try_deserialize()
                .map_err(|e| MapperError::Config(e.to_string()))?,
            telemetry: source
                .try_deserialize()
                .map_err(|e| MapperError::Config(e.to_string()))?,
        })
    }
}

/// Mapper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Domain suffix for managed records (e.g., "example.com").
    pub domain_name: String,

    /// Route 53 hosted zone that owns the records.
    pub route53_zone_id: String,

    /// Region the instance metadata lookups run against.
    pub aws_primary_region: String,

    /// TTL for upserted records in seconds.
    #[serde(default = "default_record_ttl")]
    pub record_ttl: i64,

    /// Prefix prepended to the tag value when deriving the record name.
    #[serde(default)]
    pub record_prefix: String,
}

impl MapperConfig {
    /// Fully qualified record name for a dns tag value:
    /// `<record_prefix><tag>.<domain_name>`.
    pub fn record_name(&self, tag: &str) -> String {
        format!("{}{}.{}", self.record_prefix, tag, self.domain_name)
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "debug", "autodns=debug,warn").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines (CloudWatch-friendly).
    #[serde(default = "default_log_json")]
    pub log_json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: default_log_json(),
        }
    }
}

fn default_record_ttl() -> i64 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_json() -> bool {
    true
}
