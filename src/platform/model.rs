use serde::{Deserialize, Serialize};

/// Returns the trailing segment of a fully-qualified connection identifier.
///
/// `"/providers/Microsoft.PowerApps/apis/shared_sql/connections/shared-sql-abc123"`
/// becomes `"shared-sql-abc123"`. An identifier without any `/` is already a short name.
pub fn short_name(identifier: &str) -> &str {
    identifier.rsplit('/').next().unwrap_or(identifier)
}

/// A platform environment. Every other listing is scoped to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub id: String,
    pub display_name: String,
}

/// The owner of an app or the creator of a flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Principal {
    pub fn with_email(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            display_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub id: String,
    pub display_name: String,
    pub owner: Principal,
    pub created_time: String,
    pub last_modified_time: String,
    pub environment_id: String,
}

/// A cloud flow. The definition stays untyped until a `FlowDocument` is read from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    pub id: String,
    pub display_name: String,
    pub creator: Principal,
    pub created_time: String,
    pub last_modified_time: String,
    pub environment_id: String,
    pub definition: serde_json::Value,
}

/// The gateway a connection is routed through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRef {
    #[serde(alias = "gatewayId")]
    pub id: String,
    #[serde(default, alias = "gatewayName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "type",
        alias = "gatewayType",
        skip_serializing_if = "Option::is_none"
    )]
    pub gateway_type: Option<String>,
}

impl GatewayRef {
    /// A reference only counts when it names a gateway.
    pub fn is_routed(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Full resource identifier as listed by the platform.
    pub id: String,
    pub short_name: String,
    pub display_name: String,
    pub api_id: Option<String>,
    pub server_address: Option<String>,
    pub gateway: Option<GatewayRef>,
}

impl Connection {
    pub fn new(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            short_name: short_name(id).to_string(),
            display_name: display_name.to_string(),
            api_id: None,
            server_address: None,
            gateway: None,
        }
    }

    pub fn with_api(mut self, api_id: &str) -> Self {
        self.api_id = Some(api_id.to_string());
        self
    }

    pub fn with_server(mut self, server_address: &str) -> Self {
        self.server_address = Some(server_address.to_string());
        self
    }

    pub fn with_gateway(mut self, gateway: GatewayRef) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// The gateway this connection routes through, if it names one.
    pub fn routed_gateway(&self) -> Option<&GatewayRef> {
        self.gateway.as_ref().filter(|g| g.is_routed())
    }

    /// Where the connection points: the server address when known, otherwise the API id.
    pub fn target(&self) -> &str {
        self.server_address
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.api_id.as_deref())
            .unwrap_or("")
    }
}
