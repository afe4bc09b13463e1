#![deny(missing_docs)]
//! <fullname>Auto-stop cleanup</fullname>
//!
//! Lambda function invoked when an auto-stop rule fires.
//! It stops the ECS tasks started for the identifier in the event,
//! and removes the CloudWatch Events rule, its targets and the permission
//! statements that allowed the rule to invoke the function.
use aws_sdk_cloudwatchevents::Client as EventsClient;
use aws_sdk_ecs::Client as EcsClient;
use aws_sdk_lambda::Client as LambdaClient;
use aws_sdk_sts::Client as StsClient;
use aws_types::SdkConfig;
use lambda_runtime::LambdaEvent;

pub mod config;
pub use config::Settings;

mod ecs;

mod error;
pub use error::RuntimeError;

mod event;
pub use event::{CleanupEvent, CleanupRequest, RequestKind};

mod events;

mod lambda;

mod report;
pub use report::CleanupReport;

/// `sts` includes helpers to work with AWS STS
pub mod sts;

#[cfg(test)]
mod test_util;

/// `CleanupClients` bundles the SDK clients the cleanup talks to
#[derive(Clone)]
pub struct CleanupClients {
    /// ECS client, stops tasks
    pub ecs: EcsClient,
    /// CloudWatch Events client, removes rules, targets and bus permissions
    pub events: EventsClient,
    /// Lambda client, removes function permissions and event source mappings
    pub lambda: LambdaClient,
}

impl CleanupClients {
    /// Initialize every client from the same configuration.
    pub fn new(config: &SdkConfig) -> CleanupClients {
        CleanupClients {
            ecs: EcsClient::new(config),
            events: EventsClient::new(config),
            lambda: LambdaClient::new(config),
        }
    }

    /// Initialize the clients from the function settings,
    /// assuming the cleanup role first when one is configured.
    #[tracing::instrument(skip(settings))]
    pub async fn from_settings(settings: &Settings) -> Result<CleanupClients, RuntimeError> {
        let config = settings.sdk_config().await;

        let config = match &settings.assume_role_arn {
            Some(role_arn) => {
                let sts_client = StsClient::new(&config);
                sts::assume_role(&sts_client, &config, &sts::session_name(), role_arn).await?
            }
            None => config,
        };

        Ok(CleanupClients::new(&config))
    }
}

/// `handle_cleanup` is the Lambda function entry point
/// that receives the events from the auto-stop rules
#[tracing::instrument(skip(clients, settings, event))]
pub async fn handle_cleanup(
    clients: &CleanupClients,
    settings: &Settings,
    event: LambdaEvent<CleanupEvent>,
) -> Result<CleanupReport, RuntimeError> {
    tracing::info!(request_id = %event.context.request_id, "received cleanup event");

    let request = match event.payload.request() {
        Ok(request) => request,
        Err(err) => {
            tracing::error!("missing identifier in the event object");
            return Err(err);
        }
    };

    run_cleanup(clients, settings, &request)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "error occurred during cleanup operations");
            err
        })
}

/// Run every cleanup step for a validated request.
///
/// Steps run in order and the first unexpected error aborts the run.
/// Resources that are already gone don't count as errors.
#[tracing::instrument(skip(clients, settings))]
pub async fn run_cleanup(
    clients: &CleanupClients,
    settings: &Settings,
    request: &CleanupRequest,
) -> Result<CleanupReport, RuntimeError> {
    let id = request.id.as_str();

    let stopped_tasks = if request.kind.stops_tasks() {
        ecs::stop_tasks_started_by(&clients.ecs, settings.cluster.as_deref(), id).await?
    } else {
        Vec::new()
    };

    // the rule and its permission statements are all named after the identifier
    let target_ids = events::list_rule_target_ids(&clients.events, id).await?;
    let removed_targets = events::remove_rule_targets(&clients.events, id, &target_ids).await?;
    let rule_deleted = events::delete_rule(&clients.events, id).await?;

    let event_bus_permission_removed =
        events::remove_event_bus_permission(&clients.events, id).await?;
    let lambda_permission_removed =
        lambda::remove_function_permission(&clients.lambda, &settings.lambda_arn, id).await?;
    let trigger_removed = events::remove_trigger(&clients.events, id, id).await?;

    let event_source_mapping_deleted = match &request.event_source_mapping_id {
        Some(mapping_id) => {
            Some(lambda::delete_event_source_mapping(&clients.lambda, mapping_id).await?)
        }
        None => None,
    };

    tracing::info!(identifier = id, "successfully cleaned up resources and trigger");

    Ok(CleanupReport {
        identifier: request.id.clone(),
        kind: request.kind,
        stopped_tasks,
        removed_targets,
        rule_deleted,
        event_bus_permission_removed,
        lambda_permission_removed,
        trigger_removed,
        event_source_mapping_deleted,
    })
}
