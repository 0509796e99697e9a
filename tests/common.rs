//! Common test utilities: an in-memory admin API and builders for platform resources.
use gateway_audit::error::SourceError;
use gateway_audit::prelude::*;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};

pub const CONNECTION_PREFIX: &str = "/providers/Microsoft.PowerApps/apis/shared_sql/connections";

/// An `AdminApi` serving fixed listings, with switches to make individual calls fail.
#[derive(Default)]
#[allow(dead_code)]
pub struct FixtureApi {
    pub environments: Vec<Environment>,
    pub apps: HashMap<String, Vec<App>>,
    pub connections: HashMap<String, Vec<Connection>>,
    pub app_connections: HashMap<String, Vec<Connection>>,
    pub flows: HashMap<String, Vec<Flow>>,
    pub failing_apps: HashSet<String>,
    pub failing_flow_listings: HashSet<String>,
    pub fail_environment_listing: bool,
}

#[allow(dead_code)]
impl FixtureApi {
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environments.push(environment);
        self
    }

    pub fn with_connection(mut self, environment_id: &str, connection: Connection) -> Self {
        self.connections
            .entry(environment_id.to_string())
            .or_default()
            .push(connection);
        self
    }

    /// Adds an app and the connections it uses. The connections are not added to the
    /// environment listing; use `with_connection` for that.
    pub fn with_app(mut self, app: App, connections: Vec<Connection>) -> Self {
        self.app_connections.insert(app.id.clone(), connections);
        self.apps
            .entry(app.environment_id.clone())
            .or_default()
            .push(app);
        self
    }

    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flows
            .entry(flow.environment_id.clone())
            .or_default()
            .push(flow);
        self
    }
}

impl AdminApi for FixtureApi {
    fn list_environments(&self) -> std::result::Result<Vec<Environment>, SourceError> {
        if self.fail_environment_listing {
            return Err(SourceError::Api("401 Unauthorized".to_string()));
        }
        Ok(self.environments.clone())
    }

    fn list_apps(&self, environment_id: &str) -> std::result::Result<Vec<App>, SourceError> {
        Ok(self.apps.get(environment_id).cloned().unwrap_or_default())
    }

    fn list_connections(
        &self,
        environment_id: &str,
        app_id: Option<&str>,
    ) -> std::result::Result<Vec<Connection>, SourceError> {
        match app_id {
            Some(app_id) if self.failing_apps.contains(app_id) => Err(SourceError::Api(format!(
                "Connections of app '{}' could not be fetched",
                app_id
            ))),
            Some(app_id) => Ok(self
                .app_connections
                .get(app_id)
                .cloned()
                .unwrap_or_default()),
            None => Ok(self
                .connections
                .get(environment_id)
                .cloned()
                .unwrap_or_default()),
        }
    }

    fn list_flows(&self, environment_id: &str) -> std::result::Result<Vec<Flow>, SourceError> {
        if self.failing_flow_listings.contains(environment_id) {
            return Err(SourceError::Api("Flow listing timed out".to_string()));
        }
        Ok(self.flows.get(environment_id).cloned().unwrap_or_default())
    }
}

#[allow(dead_code)]
pub fn environment(id: &str, display_name: &str) -> Environment {
    Environment {
        id: id.to_string(),
        display_name: display_name.to_string(),
    }
}

#[allow(dead_code)]
pub fn connection_id(short: &str) -> String {
    format!("{}/{}", CONNECTION_PREFIX, short)
}

/// A SQL connection with no gateway.
#[allow(dead_code)]
pub fn cloud_connection(short: &str) -> Connection {
    Connection::new(&connection_id(short), &format!("SQL {}", short))
        .with_api("/providers/Microsoft.PowerApps/apis/shared_sql")
}

/// A SQL connection routed through `gateway_id`.
#[allow(dead_code)]
pub fn gateway_connection(
    short: &str,
    gateway_id: &str,
    gateway_name: Option<&str>,
) -> Connection {
    cloud_connection(short)
        .with_server(&format!("{}.corp.local", short))
        .with_gateway(GatewayRef {
            id: gateway_id.to_string(),
            name: gateway_name.map(str::to_string),
            gateway_type: gateway_name.map(|_| "Standard".to_string()),
        })
}

#[allow(dead_code)]
pub fn app(id: &str, environment_id: &str, owner: &str) -> App {
    App {
        id: id.to_string(),
        display_name: format!("App {}", id),
        owner: Principal::with_email(owner),
        created_time: "2025-01-01T00:00:00Z".to_string(),
        last_modified_time: "2025-02-01T00:00:00Z".to_string(),
        environment_id: environment_id.to_string(),
    }
}

#[allow(dead_code)]
pub fn flow(id: &str, environment_id: &str, definition: Value) -> Flow {
    Flow {
        id: id.to_string(),
        display_name: format!("Flow {}", id),
        creator: Principal::with_email("maker@contoso.com"),
        created_time: "2025-03-01T00:00:00Z".to_string(),
        last_modified_time: "2025-04-01T00:00:00Z".to_string(),
        environment_id: environment_id.to_string(),
        definition,
    }
}

/// A definition declaring each connection under `parameters.$connections.value`.
#[allow(dead_code)]
pub fn declared_definition(shorts: &[&str]) -> Value {
    let declared: serde_json::Map<String, Value> = shorts
        .iter()
        .enumerate()
        .map(|(i, short)| {
            (
                format!("shared_sql_{}", i),
                json!({ "connectionId": connection_id(short), "connectionName": short }),
            )
        })
        .collect();
    json!({ "parameters": { "$connections": { "value": declared } }, "actions": {} })
}

/// A definition with one top-level action per connection, referenced by short name.
#[allow(dead_code)]
pub fn action_definition(shorts: &[&str]) -> Value {
    let actions: serde_json::Map<String, Value> = shorts
        .iter()
        .enumerate()
        .map(|(i, short)| (format!("Get_rows_{}", i), host_action(short)))
        .collect();
    json!({ "actions": actions })
}

#[allow(dead_code)]
pub fn host_action(connection_name: &str) -> Value {
    json!({
        "type": "OpenApiConnection",
        "inputs": { "host": { "connectionName": connection_name, "operationId": "GetItems" } }
    })
}

#[allow(dead_code)]
pub const TENANT_SNAPSHOT_JSON: &str = r#"{
  "environments": [
    {
      "name": "env-prod",
      "displayName": "Production",
      "connections": [
        {
          "id": "/providers/Microsoft.PowerApps/apis/shared_sql/connections/shared-sql-abc123",
          "displayName": "Finance SQL",
          "apiId": "/providers/Microsoft.PowerApps/apis/shared_sql",
          "parameters": { "server": "sql01.corp.local" },
          "gateway": { "id": "gw1", "name": "OnPremGW", "type": "Standard" }
        },
        {
          "name": "shared-fs-777",
          "displayName": "Share Drive",
          "apiId": "/providers/Microsoft.PowerApps/apis/shared_filesystem",
          "gateway": { "gatewayId": "gw2" }
        },
        {
          "id": "/providers/Microsoft.PowerApps/apis/shared_office365/connections/o365-1",
          "displayName": "Outlook",
          "apiId": "/providers/Microsoft.PowerApps/apis/shared_office365"
        }
      ],
      "apps": [
        {
          "name": "app-1",
          "displayName": "Expense Tracker",
          "owner": { "email": "avery@contoso.com", "displayName": "Avery" },
          "createdTime": "2025-01-15T09:30:00Z",
          "lastModifiedTime": "2025-06-01T14:00:00Z",
          "connections": ["shared-sql-abc123", "o365-1"]
        },
        {
          "name": "app-2",
          "displayName": "Broken App",
          "connections": ["does-not-exist"]
        }
      ],
      "flows": [
        {
          "name": "flow-1",
          "displayName": "Nightly Sync",
          "creator": { "displayName": "Service Account" },
          "createdTime": "2025-02-10T08:00:00Z",
          "lastModifiedTime": "2025-07-20T16:45:00Z",
          "definition": "{\"parameters\":{\"$connections\":{\"value\":{\"shared_sql\":{\"connectionId\":\"/providers/Microsoft.PowerApps/apis/shared_sql/connections/shared-sql-abc123\"}}}},\"actions\":{\"Copy\":{\"inputs\":{\"host\":{\"connectionName\":\"shared-fs-777\"}}}}}"
        },
        {
          "name": "flow-2",
          "displayName": "Empty Flow",
          "definition": null
        }
      ]
    },
    {
      "id": "env-dev",
      "connections": [],
      "apps": [],
      "flows": [
        { "name": "flow-3", "displayName": "Corrupt Flow", "definition": 42 }
      ]
    }
  ]
}"#;
