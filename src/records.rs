//! DNS record management against Route 53.

use async_trait::async_trait;
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet, RrType,
};
use std::net::Ipv4Addr;
use tracing::{debug, info};

use crate::error::MapperError;
use crate::metrics;

/// One A record as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordData {
    /// Fully qualified record name, without the trailing dot.
    pub name: String,

    /// Record value (an IPv4 address in dotted form).
    pub value: String,

    /// Record TTL in seconds.
    pub ttl: i64,
}

/// Record-management collaborator, scoped per call to one hosted zone.
#[async_trait]
pub trait RecordStore {
    /// List A records matching `name` in the zone.
    async fn list_records(&self, zone: &str, name: &str) -> Result<Vec<RecordData>, MapperError>;

    /// Create or update the A record `name` with the given address.
    async fn upsert_record(
        &self,
        zone: &str,
        name: &str,
        value: Ipv4Addr,
    ) -> Result<(), MapperError>;

    /// Remove the A record `name`. Succeeds if the record is already absent.
    async fn delete_record(&self, zone: &str, name: &str) -> Result<(), MapperError>;
}

/// Production record store over the Route 53 API.
#[derive(Debug, Clone)]
pub struct Route53RecordStore {
    client: aws_sdk_route53::Client,
    ttl: i64,
}

impl Route53RecordStore {
    /// Create a store over the given client, writing records with `ttl`.
    pub fn new(client: aws_sdk_route53::Client, ttl: i64) -> Self {
        Self { client, ttl }
    }

    async fn apply_change(
        &self,
        zone: &str,
        name: &str,
        change: Change,
        operation: &'static str,
    ) -> Result<(), MapperError> {
        let batch = ChangeBatch::builder()
            .comment("autodns lifecycle sync")
            .changes(change)
            .build()
            .map_err(|e| MapperError::dns_api(operation, name, e))?;

        self.client
            .change_resource_record_sets()
            .hosted_zone_id(zone)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| MapperError::dns_api(operation, name, e))?;

        metrics::record_change(operation);
        Ok(())
    }
}

/// Route 53 reports record names with a trailing dot.
fn normalize_name(name: &str) -> &str {
    name.trim_end_matches('.')
}

#[async_trait]
impl RecordStore for Route53RecordStore {
    async fn list_records(&self, zone: &str, name: &str) -> Result<Vec<RecordData>, MapperError> {
        let listed = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(zone)
            .start_record_name(name)
            .start_record_type(RrType::A)
            .max_items(1)
            .send()
            .await
            .map_err(|e| MapperError::dns_api("list", name, e))?;

        let records = listed
            .resource_record_sets()
            .iter()
            .filter(|set| *set.r#type() == RrType::A && normalize_name(set.name()) == name)
            .flat_map(|set| {
                set.resource_records().iter().map(move |record| RecordData {
                    name: normalize_name(set.name()).to_string(),
                    value: record.value().to_string(),
                    ttl: set.ttl().unwrap_or(0),
                })
            })
            .collect();

        Ok(records)
    }

    async fn upsert_record(
        &self,
        zone: &str,
        name: &str,
        value: Ipv4Addr,
    ) -> Result<(), MapperError> {
        let record_set = ResourceRecordSet::builder()
            .name(name)
            .r#type(RrType::A)
            .ttl(self.ttl)
            .resource_records(
                ResourceRecord::builder()
                    .value(value.to_string())
                    .build()
                    .map_err(|e| MapperError::dns_api("upsert", name, e))?,
            )
            .build()
            .map_err(|e| MapperError::dns_api("upsert", name, e))?;

        let change = Change::builder()
            .action(ChangeAction::Upsert)
            .resource_record_set(record_set)
            .build()
            .map_err(|e| MapperError::dns_api("upsert", name, e))?;

        info!(zone, name, %value, "upserting A record");
        self.apply_change(zone, name, change, "upsert").await
    }

    async fn delete_record(&self, zone: &str, name: &str) -> Result<(), MapperError> {
        // A DELETE change must carry the record's current value and TTL.
        let existing = self.list_records(zone, name).await?;
        let Some(record) = existing.into_iter().next() else {
            debug!(zone, name, "record already absent, nothing to delete");
            return Ok(());
        };

        let record_set = ResourceRecordSet::builder()
            .name(name)
            .r#type(RrType::A)
            .ttl(record.ttl)
            .resource_records(
                ResourceRecord::builder()
                    .value(record.value)
                    .build()
                    .map_err(|e| MapperError::dns_api("delete", name, e))?,
            )
            .build()
            .map_err(|e| MapperError::dns_api("delete", name, e))?;

        let change = Change::builder()
            .action(ChangeAction::Delete)
            .resource_record_set(record_set)
            .build()
            .map_err(|e| MapperError::dns_api("delete", name, e))?;

        info!(zone, name, "deleting A record");
        self.apply_change(zone, name, change, "delete").await
    }
}
