//! Error types for autodns.

use thiserror::Error;

/// Boxed error source carried by [`MapperError`] variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced to the invoking runtime.
#[derive(Debug, Error)]
pub enum MapperError {
    /// Instance metadata could not be retrieved
    #[error("instance lookup failed for {instance_id}: {source}")]
    Lookup {
        /// Instance the lookup was for.
        instance_id: String,
        /// Underlying failure.
        #[source]
        source: BoxError,
    },

    /// Running instance has no public IPv4 address to publish
    #[error("instance {instance_id} is running but has no public IPv4 address")]
    MissingAddress {
        /// Instance missing an address.
        instance_id: String,
    },

    /// Record listing or mutation against Route 53 failed
    #[error("Route 53 {operation} failed for {name}: {source}")]
    DnsApi {
        /// Operation that failed ("list", "upsert" or "delete").
        operation: &'static str,
        /// Record name the operation addressed.
        name: String,
        /// Underlying failure.
        #[source]
        source: BoxError,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MapperError {
    /// Build a lookup error for an instance.
    pub fn lookup(instance_id: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Lookup {
            instance_id: instance_id.into(),
            source: source.into(),
        }
    }

    /// Build a DNS API error for a record operation.
    pub fn dns_api(
        operation: &'static str,
        name: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::DnsApi {
            operation,
            name: name.into(),
            source: source.into(),
        }
    }

    /// Stable error class used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lookup { .. } => "lookup",
            Self::MissingAddress { .. } => "missing_address",
            Self::DnsApi { .. } => "dns_api",
            Self::Config(_) => "config",
        }
    }
}
