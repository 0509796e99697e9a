use thiserror::Error;

/// Errors raised by an administrative API collaborator while listing resources.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    #[error("Failed to read snapshot '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse snapshot JSON: {0}")]
    Parse(String),

    #[error("Environment '{0}' not found in the snapshot")]
    EnvironmentNotFound(String),

    #[error("App '{app_id}' references connection '{connection}', which is not listed in its environment")]
    UnknownConnection { app_id: String, connection: String },

    #[error("Administrative API call failed: {0}")]
    Api(String),
}

/// Errors raised while reading a flow's definition document.
#[derive(Error, Debug, Clone)]
pub enum DefinitionError {
    #[error("Definition of flow '{flow_id}' is malformed: {message}")]
    Malformed { flow_id: String, message: String },
}

/// Errors raised while writing usage reports.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not write report '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not serialize report '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Errors that terminate an audit run.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Could not list environments")]
    EnvironmentListing(#[source] SourceError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
