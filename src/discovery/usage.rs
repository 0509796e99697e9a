use serde::Serialize;
use std::fmt;

/// The kind of resource that uses a gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceType {
    App,
    Flow,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::App => write!(f, "App"),
            ResourceType::Flow => write!(f, "Flow"),
        }
    }
}

/// One resource reaching a data source through one gateway-backed connection.
///
/// Field order is the column order of the exported reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub resource_type: ResourceType,
    pub resource_name: String,
    pub resource_id: String,
    pub environment_name: String,
    pub environment_id: String,
    pub connection_display_name: String,
    pub connection_target: String,
    pub gateway_id: String,
    pub gateway_name: String,
    pub gateway_type: String,
    pub owner: String,
    pub created_time: String,
    pub last_modified_time: String,
}

pub const USAGE_COLUMNS: [&str; 13] = [
    "resourceType",
    "resourceName",
    "resourceId",
    "environmentName",
    "environmentId",
    "connectionDisplayName",
    "connectionTarget",
    "gatewayId",
    "gatewayName",
    "gatewayType",
    "owner",
    "createdTime",
    "lastModifiedTime",
];
