//! Lifecycle-to-DNS mapping.
//!
//! The decision rule, per lifecycle state:
//!
//! ```text
//! running    -> UPSERT(public ip)
//! stopped    -> UPSERT(127.0.0.1)
//! terminated -> DELETE
//! other      -> skip
//! ```
//!
//! Each invocation is independent: at most one record mutation, no memory
//! of prior state. Concurrent invocations for different instances operate
//! on distinct record names; same-instance races are last-write-wins at
//! the provider.

use std::net::Ipv4Addr;
use tracing::{debug, info};

use crate::config::MapperConfig;
use crate::error::MapperError;
use crate::event::{LifecycleEvent, LifecycleState};
use crate::instance::InstanceLookup;
use crate::metrics::{self, SyncResult, Timer};
use crate::records::RecordStore;

/// Address published for stopped instances.
const STOPPED_ADDR: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// Planned mutation against the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    /// Create or update the A record with the given address.
    Upsert(Ipv4Addr),
    /// Remove the A record.
    Delete,
}

/// What one [`LifecycleMapper::handle`] invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Record upserted with the given value.
    Upserted {
        /// Fully qualified record name.
        name: String,
        /// Address written.
        value: Ipv4Addr,
    },
    /// Record deleted (or already absent).
    Deleted {
        /// Fully qualified record name.
        name: String,
    },
    /// Instance carries no usable dns tag; nothing mutated.
    SkippedUntagged,
    /// Event state is outside the handled set; nothing mutated.
    SkippedState(LifecycleState),
}

impl From<&SyncOutcome> for SyncResult {
    fn from(outcome: &SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Upserted { .. } => SyncResult::Upserted,
            SyncOutcome::Deleted { .. } => SyncResult::Deleted,
            SyncOutcome::SkippedUntagged => SyncResult::SkippedUntagged,
            SyncOutcome::SkippedState(_) => SyncResult::SkippedState,
        }
    }
}

/// Decide the record mutation for a lifecycle state.
///
/// Returns `None` when the state is outside the handled set.
fn plan(
    state: LifecycleState,
    public_ip: Option<Ipv4Addr>,
    instance_id: &str,
) -> Result<Option<RecordAction>, MapperError> {
    match state {
        LifecycleState::Running => {
            let ip = public_ip.ok_or_else(|| MapperError::MissingAddress {
                instance_id: instance_id.to_string(),
            })?;
            Ok(Some(RecordAction::Upsert(ip)))
        }
        LifecycleState::Stopped => Ok(Some(RecordAction::Upsert(STOPPED_ADDR))),
        LifecycleState::Terminated => Ok(Some(RecordAction::Delete)),
        LifecycleState::Other => Ok(None),
    }
}

/// Maps instance lifecycle notifications onto Route 53 record mutations.
pub struct LifecycleMapper<L, R> {
    config: MapperConfig,
    lookup: L,
    records: R,
}

impl<L, R> LifecycleMapper<L, R>
where
    L: InstanceLookup,
    R: RecordStore,
{
    /// Create a mapper over the given collaborators.
    pub fn new(config: MapperConfig, lookup: L, records: R) -> Self {
        Self {
            config,
            lookup,
            records,
        }
    }

    /// Handle one lifecycle notification.
    ///
    /// Performs at most one record mutation. Skips (missing tag,
    /// unrecognized state) complete successfully without touching DNS;
    /// lookup and mutation failures surface to the caller.
    pub async fn handle(&self, event: &LifecycleEvent) -> Result<SyncOutcome, MapperError> {
        let timer = Timer::start();
        let result = self.sync(event).await;

        match &result {
            Ok(outcome) => metrics::record_sync(outcome.into(), timer.elapsed()),
            Err(e) => {
                metrics::record_sync(SyncResult::Failed, timer.elapsed());
                metrics::record_failure(e.kind());
            }
        }

        result
    }

    async fn sync(&self, event: &LifecycleEvent) -> Result<SyncOutcome, MapperError> {
        let info = self.lookup.lookup(&event.instance_id).await?;

        let Some(tag) = info.dns_tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            debug!(instance_id = %event.instance_id, "no dns tag, skipping");
            return Ok(SyncOutcome::SkippedUntagged);
        };

        let Some(action) = plan(event.state, info.public_ip, &event.instance_id)? else {
            debug!(
                instance_id = %event.instance_id,
                state = %event.state,
                "unrecognized state, skipping"
            );
            return Ok(SyncOutcome::SkippedState(event.state));
        };

        let name = self.config.record_name(tag);
        let zone = &self.config.route53_zone_id;

        match action {
            RecordAction::Upsert(value) => {
                self.records.upsert_record(zone, &name, value).await?;
                info!(instance_id = %event.instance_id, name = %name, %value, "record upserted");
                Ok(SyncOutcome::Upserted { name, value })
            }
            RecordAction::Delete => {
                self.records.delete_record(zone, &name).await?;
                info!(instance_id = %event.instance_id, name = %name, "record deleted");
                Ok(SyncOutcome::Deleted { name })
            }
        }
    }
}
