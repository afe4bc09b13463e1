use crate::error::RuntimeError;
use serde::{Deserialize, Serialize};

/// `CleanupEvent` is the payload sent by the auto-stop rule
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CleanupEvent {
    /// Identifier of an auto-stop for ECS tasks
    #[serde(rename = "taskID", default)]
    pub task_id: Option<String>,
    /// Client scoped alias of `task_id`
    #[serde(default)]
    pub client_id: Option<String>,
    /// Rule to clean up without touching ECS
    #[serde(default)]
    pub rule_name: Option<String>,
    /// Event source mapping to delete along with the rule
    #[serde(default)]
    pub event_source_mapping_id: Option<String>,
}

/// `RequestKind` tells which resources are tied to the identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestKind {
    /// ECS tasks started by the identifier plus its rule
    Task,
    /// Same resources as `Task`, keyed by a client id
    Client,
    /// Only the rule and its permissions
    Rule,
}

impl RequestKind {
    /// Whether ECS tasks must be stopped for this kind of request.
    pub fn stops_tasks(self) -> bool {
        !matches!(self, RequestKind::Rule)
    }
}

/// `CleanupRequest` is a validated `CleanupEvent`
#[derive(Clone, Debug, PartialEq)]
pub struct CleanupRequest {
    /// Which resources the identifier owns
    pub kind: RequestKind,
    /// Rule name, `startedBy` tag and permission statement id
    pub id: String,
    /// Event source mapping UUID, if any
    pub event_source_mapping_id: Option<String>,
}

impl CleanupEvent {
    /// Resolve the identifier carried by the event.
    /// `taskID` wins over `clientId`, which wins over `ruleName`.
    pub fn request(&self) -> Result<CleanupRequest, RuntimeError> {
        let candidates = [
            (RequestKind::Task, &self.task_id),
            (RequestKind::Client, &self.client_id),
            (RequestKind::Rule, &self.rule_name),
        ];

        let (kind, id) = candidates
            .into_iter()
            .find_map(|(kind, value)| trimmed(value).map(|id| (kind, id)))
            .ok_or(RuntimeError::MissingIdentifier)?;

        Ok(CleanupRequest {
            kind,
            id,
            event_source_mapping_id: trimmed(&self.event_source_mapping_id),
        })
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
