//! Function settings.
//!
//! Settings are loaded once per cold start from environment variables.
//! The secret key is redacted in Debug output.
use crate::error::RuntimeError;
use aws_types::{region::Region, Credentials, SdkConfig};
use std::{collections::HashMap, env, fmt};

/// Environment variable holding the AWS access key id.
pub const ACCESS_KEY_VAR: &str = "ACCESS_KEY";
/// Environment variable holding the AWS secret access key.
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";
/// Environment variable holding the region of every client.
pub const REGION_VAR: &str = "AWS_REGION";
/// Environment variable holding the ECS cluster name or ARN.
pub const CLUSTER_VAR: &str = "FARGATE_CLUSTER";
/// Environment variable holding the function whose policy gets cleaned.
pub const LAMBDA_ARN_VAR: &str = "LAMBDA_ARN";
/// Environment variable holding an optional role to assume before cleanup.
pub const ASSUME_ROLE_VAR: &str = "ASSUME_ROLE_ARN";

/// `Settings` holds everything the handler needs besides the event itself.
#[derive(Clone, PartialEq)]
pub struct Settings {
    /// Static access key id.
    pub access_key_id: String,
    /// Static secret access key.
    pub secret_access_key: String,
    /// Region override, the SDK provider chain decides when unset.
    pub region: Option<String>,
    /// ECS cluster, the account's default cluster when unset.
    pub cluster: Option<String>,
    /// Function name or ARN carrying the permission statements.
    pub lambda_arn: String,
    /// Role assumed with the static keys before building the clients.
    pub assume_role_arn: Option<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("region", &self.region)
            .field("cluster", &self.cluster)
            .field("lambda_arn", &self.lambda_arn)
            .field("assume_role_arn", &self.assume_role_arn)
            .finish()
    }
}

impl Settings {
    /// Load the settings from the process environment.
    pub fn from_env() -> Result<Self, RuntimeError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load the settings from a map of variables.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, RuntimeError> {
        let (access_key_id, secret_access_key) =
            match (non_empty(vars, ACCESS_KEY_VAR), non_empty(vars, SECRET_KEY_VAR)) {
                (Some(id), Some(key)) => (id, key),
                _ => return Err(RuntimeError::MissingCredentials),
            };

        let lambda_arn = non_empty(vars, LAMBDA_ARN_VAR)
            .ok_or_else(|| RuntimeError::MissingSetting(LAMBDA_ARN_VAR.into()))?;

        Ok(Settings {
            access_key_id,
            secret_access_key,
            region: non_empty(vars, REGION_VAR),
            cluster: non_empty(vars, CLUSTER_VAR),
            lambda_arn,
            assume_role_arn: non_empty(vars, ASSUME_ROLE_VAR),
        })
    }

    /// Build the AWS configuration from the static keys.
    pub async fn sdk_config(&self) -> SdkConfig {
        let credentials = Credentials::from_keys(
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
            None,
        );

        let mut loader = aws_config::from_env().credentials_provider(credentials);
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }
}

fn non_empty(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod test {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_vars_with_all_settings() {
        let settings = Settings::from_vars(&vars(&[
            ("ACCESS_KEY", "AKIDEXAMPLE"),
            ("SECRET_KEY", "secret"),
            ("AWS_REGION", "us-west-1"),
            ("FARGATE_CLUSTER", "auto-stop"),
            ("LAMBDA_ARN", "auto-stop-handler"),
            ("ASSUME_ROLE_ARN", "arn:aws:iam::123456789012:role/cleanup"),
        ]))
        .expect("settings should load");

        assert_eq!("AKIDEXAMPLE", settings.access_key_id);
        assert_eq!("secret", settings.secret_access_key);
        assert_eq!(Some("us-west-1".into()), settings.region);
        assert_eq!(Some("auto-stop".into()), settings.cluster);
        assert_eq!("auto-stop-handler", settings.lambda_arn);
        assert_eq!(
            Some("arn:aws:iam::123456789012:role/cleanup".into()),
            settings.assume_role_arn
        );
    }

    #[test]
    fn test_from_vars_treats_empty_optionals_as_unset() {
        let settings = Settings::from_vars(&vars(&[
            ("ACCESS_KEY", "AKIDEXAMPLE"),
            ("SECRET_KEY", "secret"),
            ("FARGATE_CLUSTER", "  "),
            ("LAMBDA_ARN", "auto-stop-handler"),
            ("ASSUME_ROLE_ARN", ""),
        ]))
        .expect("settings should load");

        assert_eq!(None, settings.region);
        assert_eq!(None, settings.cluster);
        assert_eq!(None, settings.assume_role_arn);
    }

    #[test]
    fn test_from_vars_without_secret_key() {
        let err = Settings::from_vars(&vars(&[
            ("ACCESS_KEY", "AKIDEXAMPLE"),
            ("LAMBDA_ARN", "auto-stop-handler"),
        ]))
        .unwrap_err();

        assert!(matches!(err, RuntimeError::MissingCredentials));
        assert_eq!("AWS credentials are not defined", err.to_string());
    }

    #[test]
    fn test_from_vars_without_lambda_arn() {
        let err = Settings::from_vars(&vars(&[
            ("ACCESS_KEY", "AKIDEXAMPLE"),
            ("SECRET_KEY", "secret"),
        ]))
        .unwrap_err();

        assert!(matches!(err, RuntimeError::MissingSetting(ref v) if v == "LAMBDA_ARN"));
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let settings = Settings::from_vars(&vars(&[
            ("ACCESS_KEY", "AKIDEXAMPLE"),
            ("SECRET_KEY", "super-secret"),
            ("LAMBDA_ARN", "auto-stop-handler"),
        ]))
        .expect("settings should load");

        let output = format!("{settings:?}");
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("super-secret"));
    }

    #[tokio::test]
    async fn test_sdk_config_uses_configured_region() {
        let settings = Settings::from_vars(&vars(&[
            ("ACCESS_KEY", "AKIDEXAMPLE"),
            ("SECRET_KEY", "secret"),
            ("AWS_REGION", "eu-central-1"),
            ("LAMBDA_ARN", "auto-stop-handler"),
        ]))
        .expect("settings should load");

        let config = settings.sdk_config().await;
        assert_eq!(Some(&Region::new("eu-central-1")), config.region());
        assert!(config.credentials_provider().is_some());
    }
}
