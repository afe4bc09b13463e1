use crate::event::RequestKind;
use serde::Serialize;

/// `CleanupReport` summarizes what a cleanup run removed
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    /// Identifier the cleanup ran for
    pub identifier: String,
    /// Kind of identifier
    pub kind: RequestKind,
    /// ARNs of the stopped ECS tasks
    pub stopped_tasks: Vec<String>,
    /// Ids of the targets detached from the rule
    pub removed_targets: Vec<String>,
    /// False if the rule was already gone
    pub rule_deleted: bool,
    /// False if the event bus had no matching statement
    pub event_bus_permission_removed: bool,
    /// False if the function had no matching statement
    pub lambda_permission_removed: bool,
    /// False if the trigger target was already gone
    pub trigger_removed: bool,
    /// None when no event source mapping was requested
    pub event_source_mapping_deleted: Option<bool>,
}
