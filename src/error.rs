use thiserror::Error as ThisError;

/// Different errors that the application can raise
#[derive(Debug, ThisError)]
pub enum RuntimeError {
    /// Error returned when the event carries none of the supported identifiers
    #[error("taskID, clientId or ruleName is required in the event object")]
    MissingIdentifier,
    /// Error returned when the static AWS keys are not configured
    #[error("AWS credentials are not defined")]
    MissingCredentials,
    /// Error returned when a required environment variable is missing
    #[error("missing environment variable {0}")]
    MissingSetting(String),
    /// Error returned if we cannot assume a specific role
    #[error("failed to assume role")]
    AssumeRoleFailure(#[from] aws_sdk_sts::Error),
    /// Error returned if the credentials are missing after assuming a new role
    #[error("missing credentials for the assumed role")]
    MissingAssumedCredentials,
    /// Error returned by the ECS API
    #[error("unexpected ecs error: {0}")]
    Ecs(#[from] aws_sdk_ecs::Error),
    /// Error returned by the CloudWatch Events API
    #[error("unexpected cloudwatch events error: {0}")]
    CloudWatchEvents(#[from] aws_sdk_cloudwatchevents::Error),
    /// Error retuned by the Lambda API
    #[error("unexpected lambda error: {0}")]
    Lambda(#[from] aws_sdk_lambda::Error),
}
