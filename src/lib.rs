//! autodns - EC2 lifecycle to Route 53 A-record synchronization.
//!
//! This crate keeps one DNS A record per EC2 instance in sync with the
//! instance's reachability. It consumes EventBridge instance state-change
//! notifications, reads the instance's `dns` tag, and issues an idempotent
//! upsert or delete against a Route 53 hosted zone.
//!
//! ## Mapping rule
//!
//! ```text
//! running    -> UPSERT(<dns tag>.<domain>, public IPv4)
//! stopped    -> UPSERT(<dns tag>.<domain>, 127.0.0.1)
//! terminated -> DELETE(<dns tag>.<domain>)
//! other      -> no-op
//! ```
//!
//! Instances without a `dns` tag are left alone.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         autodns                            │
//! │                                                            │
//! │  EventBridge ──▶ LifecycleMapper ──▶ RecordStore           │
//! │  (state-change     │                 (Route 53 upsert/     │
//! │   notification)    │                  delete)              │
//! │                    ▼                                       │
//! │              InstanceLookup                                │
//! │              (EC2 DescribeInstances:                       │
//! │               public IP + dns tag)                         │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each invocation is stateless and independent; retry policy is the
//! invoking runtime's concern.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use autodns::instance::Ec2InstanceLookup;
//! use autodns::records::Route53RecordStore;
//! use autodns::{Config, LifecycleMapper};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env().unwrap();
//!     let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//!
//!     let mapper = LifecycleMapper::new(
//!         config.mapper.clone(),
//!         Ec2InstanceLookup::new(aws_sdk_ec2::Client::new(&aws)),
//!         Route53RecordStore::new(aws_sdk_route53::Client::new(&aws), config.mapper.record_ttl),
//!     );
//!
//!     // mapper.handle(&event).await ...
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod event;
pub mod instance;
pub mod mapper;
pub mod metrics;
pub mod records;
pub mod telemetry;

// Re-export main types
pub use config::{Config, MapperConfig, TelemetryConfig};
pub use error::MapperError;
pub use event::{LifecycleEvent, LifecycleState};
pub use mapper::{LifecycleMapper, SyncOutcome};
