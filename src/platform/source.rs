use super::model::{App, Connection, Environment, Flow};
use crate::error::SourceError;

/// The administrative API the audit reads from.
///
/// The audit never knows how listings are fetched (live calls, paging, a saved export).
/// Implement this trait to plug a new backend in; `SnapshotSource` reads a JSON export.
pub trait AdminApi {
    fn list_environments(&self) -> Result<Vec<Environment>, SourceError>;

    fn list_apps(&self, environment_id: &str) -> Result<Vec<App>, SourceError>;

    /// Lists the connections of one app, or of the whole environment when `app_id` is `None`.
    fn list_connections(
        &self,
        environment_id: &str,
        app_id: Option<&str>,
    ) -> Result<Vec<Connection>, SourceError>;

    /// Lists flows with their full definitions.
    fn list_flows(&self, environment_id: &str) -> Result<Vec<Flow>, SourceError>;
}
