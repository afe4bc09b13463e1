use crate::error::RuntimeError;
use aws_sdk_sts::{Client, Error};
use aws_types::{Credentials, SdkConfig};

/// Build the STS session name for a cold start.
pub fn session_name() -> String {
    format!("auto_stop_cleanup_session_{}", uuid::Uuid::new_v4())
}

/// Assume a new role to clean up resources in a different account.
///
/// The returned configuration keeps the region of `base`.
#[tracing::instrument(skip(client, base))]
pub async fn assume_role(
    client: &Client,
    base: &SdkConfig,
    session_id: &str,
    assume_role_arn: &str,
) -> Result<SdkConfig, RuntimeError> {
    tracing::info!("assuming cleanup role");

    let assumed_role = client
        .assume_role()
        .role_arn(assume_role_arn)
        .role_session_name(session_id)
        .send()
        .await
        .map_err(Error::from)?;

    let credentials = match assumed_role.credentials {
        Some(creds) => creds,
        None => return Err(RuntimeError::MissingAssumedCredentials),
    };

    let (access_key_id, secret_access_key) =
        match (credentials.access_key_id(), credentials.secret_access_key()) {
            (Some(id), Some(key)) => (id, key),
            _ => return Err(RuntimeError::MissingAssumedCredentials),
        };

    let assumed_credentials = Credentials::from_keys(
        access_key_id,
        secret_access_key,
        credentials.session_token.clone(),
    );

    let mut loader = aws_config::from_env().credentials_provider(assumed_credentials);
    if let Some(region) = base.region() {
        loader = loader.region(region.clone());
    }

    Ok(loader.load().await)
}
