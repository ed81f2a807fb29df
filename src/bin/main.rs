//! autodns Lambda entry point.

use aws_config::{BehaviorVersion, Region};
use aws_lambda_events::event::eventbridge::EventBridgeEvent;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::{error, info};

use autodns::instance::Ec2InstanceLookup;
use autodns::records::Route53RecordStore;
use autodns::{telemetry, Config, LifecycleEvent, LifecycleMapper};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    telemetry::init(&config.telemetry)?;

    info!(
        domain = %config.mapper.domain_name,
        zone_id = %config.mapper.route53_zone_id,
        region = %config.mapper.aws_primary_region,
        "Starting autodns"
    );

    let aws = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.mapper.aws_primary_region.clone()))
        .load()
        .await;

    let lookup = Ec2InstanceLookup::new(aws_sdk_ec2::Client::new(&aws));
    let records =
        Route53RecordStore::new(aws_sdk_route53::Client::new(&aws), config.mapper.record_ttl);
    let mapper = LifecycleMapper::new(config.mapper, lookup, records);

    run(service_fn(
        |event: LambdaEvent<EventBridgeEvent<LifecycleEvent>>| handle(&mapper, event),
    ))
    .await
}

/// Handle one EventBridge invocation.
async fn handle(
    mapper: &LifecycleMapper<Ec2InstanceLookup, Route53RecordStore>,
    event: LambdaEvent<EventBridgeEvent<LifecycleEvent>>,
) -> Result<(), Error> {
    let lifecycle = event.payload.detail;

    info!(
        instance_id = %lifecycle.instance_id,
        state = %lifecycle.state,
        "received state-change notification"
    );

    match mapper.handle(&lifecycle).await {
        Ok(outcome) => {
            info!(instance_id = %lifecycle.instance_id, ?outcome, "sync complete");
            Ok(())
        }
        Err(e) => {
            error!(instance_id = %lifecycle.instance_id, error = %e, "sync failed");
            Err(e.into())
        }
    }
}
