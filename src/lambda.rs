use aws_sdk_lambda::{Client, Error};

use crate::error::RuntimeError;

fn tolerate_not_found<T>(res: Result<T, Error>) -> Result<Option<T>, RuntimeError> {
    match res {
        Ok(output) => Ok(Some(output)),
        Err(Error::ResourceNotFoundException(_)) => Ok(None),
        Err(err) => Err(RuntimeError::Lambda(err)),
    }
}

/// Remove a statement from the function's resource policy, if it's still there.
#[tracing::instrument(skip(client))]
pub async fn remove_function_permission(
    client: &Client,
    function: &str,
    statement_id: &str,
) -> Result<bool, RuntimeError> {
    let res = client
        .remove_permission()
        .function_name(function)
        .statement_id(statement_id)
        .send()
        .await
        .map_err(Error::from);

    let removed = tolerate_not_found(res)?.is_some();
    if !removed {
        tracing::warn!(statement_id, "lambda does not have a policy for statement id");
    }
    Ok(removed)
}

/// Delete an event source mapping, if it's still there.
#[tracing::instrument(skip(client))]
pub async fn delete_event_source_mapping(
    client: &Client,
    mapping_id: &str,
) -> Result<bool, RuntimeError> {
    let res = client
        .delete_event_source_mapping()
        .uuid(mapping_id)
        .send()
        .await
        .map_err(Error::from);

    let deleted = tolerate_not_found(res)?.is_some();
    if !deleted {
        tracing::warn!(mapping_id, "event source mapping does not exist");
    }
    Ok(deleted)
}
