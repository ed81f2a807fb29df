//! Shared test infrastructure for lifecycle sync integration tests.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use autodns::config::MapperConfig;
use autodns::error::MapperError;
use autodns::event::{LifecycleEvent, LifecycleState};
use autodns::instance::{InstanceInfo, InstanceLookup};
use autodns::mapper::LifecycleMapper;
use autodns::records::{RecordData, RecordStore};

// --- Constants ---

pub const ZONE_ID: &str = "Z0ABCDEF123456789";
pub const DOMAIN: &str = "example.com";

// --- Config builder ---

pub fn test_mapper_config() -> MapperConfig {
    MapperConfig {
        domain_name: DOMAIN.to_string(),
        route53_zone_id: ZONE_ID.to_string(),
        aws_primary_region: "us-east-1".to_string(),
        record_ttl: 300,
        record_prefix: String::new(),
    }
}

// --- Event builder ---

pub fn make_event(instance_id: &str, state: LifecycleState) -> LifecycleEvent {
    LifecycleEvent {
        instance_id: instance_id.to_string(),
        state,
    }
}

// --- Fake instance lookup ---

/// Serves canned `InstanceInfo` per instance id; unknown ids fail with a
/// lookup error like the real collaborator.
#[derive(Clone, Default)]
pub struct FakeInstanceLookup {
    instances: Arc<Mutex<HashMap<String, InstanceInfo>>>,
}

impl FakeInstanceLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, instance_id: &str, public_ip: Option<&str>, dns_tag: Option<&str>) {
        let info = InstanceInfo {
            public_ip: public_ip.map(|ip| ip.parse().expect("bad test ip")),
            dns_tag: dns_tag.map(String::from),
        };
        self.instances
            .lock()
            .unwrap()
            .insert(instance_id.to_string(), info);
    }
}

#[async_trait]
impl InstanceLookup for FakeInstanceLookup {
    async fn lookup(&self, instance_id: &str) -> Result<InstanceInfo, MapperError> {
        self.instances
            .lock()
            .unwrap()
            .get(instance_id)
            .cloned()
            .ok_or_else(|| MapperError::lookup(instance_id, "instance not found"))
    }
}

// --- Fake record store ---

/// Mutations observed by the fake store, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Upsert { name: String, value: Ipv4Addr },
    Delete { name: String },
}

/// In-memory record store keyed by record name, with an operation log.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    records: HashMap<String, RecordData>,
    ops: Vec<StoreOp>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a record, if present.
    pub fn value_of(&self, name: &str) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .records
            .get(name)
            .map(|r| r.value.clone())
    }

    pub fn has_record(&self, name: &str) -> bool {
        self.inner.lock().unwrap().records.contains_key(name)
    }

    /// Number of mutations (upserts + deletes) issued so far.
    pub fn mutation_count(&self) -> usize {
        self.inner.lock().unwrap().ops.len()
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.inner.lock().unwrap().ops.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_records(&self, zone: &str, name: &str) -> Result<Vec<RecordData>, MapperError> {
        assert_eq!(zone, ZONE_ID, "unexpected zone id");
        Ok(self
            .inner
            .lock()
            .unwrap()
            .records
            .get(name)
            .cloned()
            .into_iter()
            .collect())
    }

    async fn upsert_record(
        &self,
        zone: &str,
        name: &str,
        value: Ipv4Addr,
    ) -> Result<(), MapperError> {
        assert_eq!(zone, ZONE_ID, "unexpected zone id");
        let mut inner = self.inner.lock().unwrap();
        inner.records.insert(
            name.to_string(),
            RecordData {
                name: name.to_string(),
                value: value.to_string(),
                ttl: 300,
            },
        );
        inner.ops.push(StoreOp::Upsert {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    async fn delete_record(&self, zone: &str, name: &str) -> Result<(), MapperError> {
        assert_eq!(zone, ZONE_ID, "unexpected zone id");
        let mut inner = self.inner.lock().unwrap();
        // Removing an absent record is a no-op, like the real store.
        inner.records.remove(name);
        inner.ops.push(StoreOp::Delete {
            name: name.to_string(),
        });
        Ok(())
    }
}

// --- Mapper builder ---

pub struct TestMapper {
    pub mapper: LifecycleMapper<FakeInstanceLookup, InMemoryRecordStore>,
    pub lookup: FakeInstanceLookup,
    pub store: InMemoryRecordStore,
}

pub fn build_mapper() -> TestMapper {
    build_mapper_with_config(test_mapper_config())
}

pub fn build_mapper_with_config(config: MapperConfig) -> TestMapper {
    let lookup = FakeInstanceLookup::new();
    let store = InMemoryRecordStore::new();
    let mapper = LifecycleMapper::new(config, lookup.clone(), store.clone());
    TestMapper {
        mapper,
        lookup,
        store,
    }
}
