//! Instance metadata lookup against EC2.

use async_trait::async_trait;
use aws_sdk_ec2::types::Tag;
use std::net::Ipv4Addr;
use tracing::debug;

use crate::error::MapperError;

/// Tag key that opts an instance into DNS management.
const DNS_TAG_KEY: &str = "dns";

/// Metadata consumed for one instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceInfo {
    /// Public IPv4 address, if one is allocated.
    pub public_ip: Option<Ipv4Addr>,

    /// Normalized value of the `dns` tag, if the tag is present.
    pub dns_tag: Option<String>,
}

/// Query-by-identifier collaborator for instance metadata.
#[async_trait]
pub trait InstanceLookup {
    /// Resolve metadata for the given instance.
    async fn lookup(&self, instance_id: &str) -> Result<InstanceInfo, MapperError>;
}

/// Production lookup over the EC2 DescribeInstances API.
#[derive(Debug, Clone)]
pub struct Ec2InstanceLookup {
    client: aws_sdk_ec2::Client,
}

impl Ec2InstanceLookup {
    /// Create a lookup over the given EC2 client.
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InstanceLookup for Ec2InstanceLookup {
    async fn lookup(&self, instance_id: &str) -> Result<InstanceInfo, MapperError> {
        let described = self
            .client
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| MapperError::lookup(instance_id, e))?;

        let instance = described
            .reservations()
            .first()
            .and_then(|reservation| reservation.instances().first())
            .ok_or_else(|| MapperError::lookup(instance_id, "instance not found"))?;

        let public_ip = instance
            .public_ip_address()
            .map(|raw| raw.parse::<Ipv4Addr>())
            .transpose()
            .map_err(|e| MapperError::lookup(instance_id, e))?;

        let dns_tag = dns_tag_value(instance.tags());

        debug!(
            instance_id,
            public_ip = ?public_ip,
            dns_tag = ?dns_tag,
            "resolved instance metadata"
        );

        Ok(InstanceInfo { public_ip, dns_tag })
    }
}

/// Extract and normalize the `dns` tag value.
///
/// The key match is case-insensitive; the value is trimmed and lowercased
/// before being used as a DNS label.
fn dns_tag_value(tags: &[Tag]) -> Option<String> {
    tags.iter().find_map(|tag| {
        let key = tag.key()?;
        if key.trim().eq_ignore_ascii_case(DNS_TAG_KEY) {
            tag.value().map(|v| v.trim().to_ascii_lowercase())
        } else {
            None
        }
    })
}
