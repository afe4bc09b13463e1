use aws_sdk_ecs::{Client, Error};
use futures::future::join_all;

use crate::error::RuntimeError;

/// Reason recorded on every task stopped by the cleanup.
pub const STOP_REASON: &str = "Auto-stop rule triggered";

/// Find every task in the cluster that was started by `started_by`.
#[tracing::instrument(skip(client))]
async fn list_tasks_started_by(
    client: &Client,
    cluster: Option<&str>,
    started_by: &str,
) -> Result<Vec<String>, RuntimeError> {
    let mut task_arns = Vec::new();
    let mut next_token = None;

    loop {
        let output = client
            .list_tasks()
            .set_cluster(cluster.map(String::from))
            .started_by(started_by)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(Error::from)?;

        task_arns.extend(output.task_arns.unwrap_or_default());

        next_token = output.next_token;
        if next_token.is_none() {
            break;
        }
    }

    Ok(task_arns)
}

/// Stop all the tasks started by `started_by`.
/// The stop requests are sent in parallel and every one of them completes
/// before the first failure, if any, is returned.
#[tracing::instrument(skip(client))]
pub async fn stop_tasks_started_by(
    client: &Client,
    cluster: Option<&str>,
    started_by: &str,
) -> Result<Vec<String>, RuntimeError> {
    let task_arns = list_tasks_started_by(client, cluster, started_by).await?;

    if task_arns.is_empty() {
        tracing::warn!(started_by, "no tasks found");
        return Ok(task_arns);
    }

    tracing::info!(count = task_arns.len(), "stopping tasks");
    let results = join_all(task_arns.iter().map(|task_arn| {
        client
            .stop_task()
            .set_cluster(cluster.map(String::from))
            .task(task_arn)
            .reason(STOP_REASON)
            .send()
    }))
    .await;

    results
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)?;

    Ok(task_arns)
}
