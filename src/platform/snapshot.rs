use super::document::lookup_str;
use super::model::{App, Connection, Environment, Flow, GatewayRef, Principal, short_name};
use super::source::AdminApi;
use crate::error::SourceError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// --- JSON Snapshot Structs (Input Format Specific) ---
// These mirror a saved export of the administrative API and are converted into the
// platform model when listed.

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub environments: Vec<SnapshotEnvironment>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEnvironment {
    #[serde(alias = "id")]
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub connections: Vec<SnapshotConnection>,
    #[serde(default)]
    pub apps: Vec<SnapshotApp>,
    #[serde(default)]
    pub flows: Vec<SnapshotFlow>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotConnection {
    #[serde(alias = "name")]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<GatewayRef>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotApp {
    #[serde(alias = "id")]
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub owner: Principal,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub last_modified_time: String,
    /// Short names or full identifiers of the environment connections the app uses.
    #[serde(default)]
    pub connections: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFlow {
    #[serde(alias = "id")]
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub creator: Principal,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub last_modified_time: String,
    #[serde(default)]
    pub definition: serde_json::Value,
}

impl SnapshotConnection {
    fn to_connection(&self) -> Connection {
        let display_name = self.display_name.as_deref().unwrap_or(short_name(&self.id));
        let mut connection = Connection::new(&self.id, display_name);
        connection.api_id = self.api_id.clone();
        connection.server_address = self.server_address.clone().or_else(|| {
            let parameters = self.parameters.as_ref()?;
            lookup_str(parameters, &["server"])
                .or_else(|| lookup_str(parameters, &["serverAddress"]))
                .map(str::to_string)
        });
        connection.gateway = self.gateway.clone();
        connection
    }
}

impl SnapshotApp {
    fn to_app(&self, environment_id: &str) -> App {
        App {
            id: self.name.clone(),
            display_name: self.display_name.clone().unwrap_or_else(|| self.name.clone()),
            owner: self.owner.clone(),
            created_time: self.created_time.clone(),
            last_modified_time: self.last_modified_time.clone(),
            environment_id: environment_id.to_string(),
        }
    }
}

impl SnapshotFlow {
    fn to_flow(&self, environment_id: &str) -> Flow {
        Flow {
            id: self.name.clone(),
            display_name: self.display_name.clone().unwrap_or_else(|| self.name.clone()),
            creator: self.creator.clone(),
            created_time: self.created_time.clone(),
            last_modified_time: self.last_modified_time.clone(),
            environment_id: environment_id.to_string(),
            definition: self.definition.clone(),
        }
    }
}

/// An `AdminApi` backed by a saved JSON export of the platform's listings.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let snapshot =
            serde_json::from_str(json).map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn environment(&self, environment_id: &str) -> Result<&SnapshotEnvironment, SourceError> {
        self.snapshot
            .environments
            .iter()
            .find(|e| e.name == environment_id)
            .ok_or_else(|| SourceError::EnvironmentNotFound(environment_id.to_string()))
    }
}

impl AdminApi for SnapshotSource {
    fn list_environments(&self) -> Result<Vec<Environment>, SourceError> {
        Ok(self
            .snapshot
            .environments
            .iter()
            .map(|e| Environment {
                id: e.name.clone(),
                display_name: e.display_name.clone().unwrap_or_else(|| e.name.clone()),
            })
            .collect())
    }

    fn list_apps(&self, environment_id: &str) -> Result<Vec<App>, SourceError> {
        let environment = self.environment(environment_id)?;
        Ok(environment
            .apps
            .iter()
            .map(|a| a.to_app(environment_id))
            .collect())
    }

    fn list_connections(
        &self,
        environment_id: &str,
        app_id: Option<&str>,
    ) -> Result<Vec<Connection>, SourceError> {
        let environment = self.environment(environment_id)?;
        let Some(app_id) = app_id else {
            return Ok(environment
                .connections
                .iter()
                .map(SnapshotConnection::to_connection)
                .collect());
        };

        let app = environment
            .apps
            .iter()
            .find(|a| a.name == app_id)
            .ok_or_else(|| {
                SourceError::Api(format!(
                    "App '{}' not found in environment '{}'",
                    app_id, environment_id
                ))
            })?;

        app.connections
            .iter()
            .map(|reference| {
                let key = short_name(reference);
                environment
                    .connections
                    .iter()
                    .rfind(|c| short_name(&c.id) == key)
                    .map(SnapshotConnection::to_connection)
                    .ok_or_else(|| SourceError::UnknownConnection {
                        app_id: app_id.to_string(),
                        connection: reference.clone(),
                    })
            })
            .collect()
    }

    fn list_flows(&self, environment_id: &str) -> Result<Vec<Flow>, SourceError> {
        let environment = self.environment(environment_id)?;
        Ok(environment
            .flows
            .iter()
            .map(|f| f.to_flow(environment_id))
            .collect())
    }
}
