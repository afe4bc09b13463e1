use aws_sdk_cloudwatchevents::{Client, Error};

use crate::error::RuntimeError;

/// Maximum number of target ids accepted by a single RemoveTargets call.
pub const MAX_TARGETS_PER_REQUEST: usize = 10;

/// Turn a `ResourceNotFoundException` into `None`.
fn tolerate_not_found<T>(res: Result<T, Error>) -> Result<Option<T>, RuntimeError> {
    match res {
        Ok(output) => Ok(Some(output)),
        Err(Error::ResourceNotFoundException(_)) => Ok(None),
        Err(err) => Err(RuntimeError::CloudWatchEvents(err)),
    }
}

/// Find the ids of all the targets attached to a rule.
/// A rule that doesn't exist has no targets.
#[tracing::instrument(skip(client))]
pub async fn list_rule_target_ids(client: &Client, rule: &str) -> Result<Vec<String>, RuntimeError> {
    let mut ids = Vec::new();
    let mut next_token = None;

    loop {
        let res = client
            .list_targets_by_rule()
            .rule(rule)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(Error::from);

        let output = match tolerate_not_found(res)? {
            Some(output) => output,
            None => {
                tracing::warn!(rule, "rule does not exist");
                return Ok(ids);
            }
        };

        ids.extend(
            output
                .targets
                .unwrap_or_default()
                .into_iter()
                .filter_map(|t| t.id)
                .filter(|id| !id.is_empty()),
        );

        next_token = output.next_token;
        if next_token.is_none() {
            break;
        }
    }

    Ok(ids)
}

/// Detach targets from a rule, in batches the API accepts.
/// Returns the ids that were removed. Entries the API fails to remove are logged.
#[tracing::instrument(skip(client))]
pub async fn remove_rule_targets(
    client: &Client,
    rule: &str,
    ids: &[String],
) -> Result<Vec<String>, RuntimeError> {
    let mut removed = Vec::with_capacity(ids.len());

    for batch in ids.chunks(MAX_TARGETS_PER_REQUEST) {
        let output = client
            .remove_targets()
            .rule(rule)
            .set_ids(Some(batch.to_vec()))
            .send()
            .await
            .map_err(Error::from)?;

        let failed: Vec<String> = output
            .failed_entries
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| {
                tracing::warn!(
                    target_id = entry.target_id.as_deref().unwrap_or_default(),
                    error_code = entry.error_code.as_deref().unwrap_or_default(),
                    error_message = entry.error_message.as_deref().unwrap_or_default(),
                    "failed to remove target"
                );
                entry.target_id
            })
            .collect();

        removed.extend(batch.iter().filter(|id| !failed.contains(id)).cloned());
    }

    Ok(removed)
}

/// Delete a rule. Returns false when the rule was already gone.
#[tracing::instrument(skip(client))]
pub async fn delete_rule(client: &Client, rule: &str) -> Result<bool, RuntimeError> {
    let res = client
        .delete_rule()
        .name(rule)
        .send()
        .await
        .map_err(Error::from);

    let deleted = tolerate_not_found(res)?.is_some();
    if !deleted {
        tracing::warn!(rule, "rule was already deleted");
    }
    Ok(deleted)
}

/// Remove a statement from the default event bus policy, if it's still there.
#[tracing::instrument(skip(client))]
pub async fn remove_event_bus_permission(
    client: &Client,
    statement_id: &str,
) -> Result<bool, RuntimeError> {
    let res = client
        .remove_permission()
        .statement_id(statement_id)
        .send()
        .await
        .map_err(Error::from);

    let removed = tolerate_not_found(res)?.is_some();
    if !removed {
        tracing::warn!(statement_id, "event bus does not have a policy for statement id");
    }
    Ok(removed)
}

/// Remove the trigger target named after the rule, if it's still there.
#[tracing::instrument(skip(client))]
pub async fn remove_trigger(
    client: &Client,
    rule: &str,
    target_id: &str,
) -> Result<bool, RuntimeError> {
    let res = client
        .remove_targets()
        .rule(rule)
        .ids(target_id)
        .send()
        .await
        .map_err(Error::from);

    let removed = tolerate_not_found(res)?.is_some();
    if !removed {
        tracing::warn!(rule, "failed to remove trigger for rule");
    }
    Ok(removed)
}
