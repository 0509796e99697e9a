//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the gateway_audit
//! crate. Import it to get the auditor, the platform model and the reporting types without
//! importing each one individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use gateway_audit::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let source = SnapshotSource::from_file("path/to/tenant.json")?;
//! let outcome = Auditor::default().run(&source)?;
//!
//! for gateway in outcome.registry.all() {
//!     println!("{} ({})", gateway.name, gateway.gateway_id);
//! }
//! # Ok(())
//! # }
//! ```

// Orchestration
pub use crate::audit::{AuditOutcome, Auditor, AuditorBuilder, SkippedKind, SkippedResource};

// Discovery
pub use crate::discovery::{
    ActionHosts, ConnectionIndex, DeclaredConnections, FlowReferenceExtractor, GatewayRecord,
    GatewayRegistry, GatewayUsageResolver, NestedActionHosts, ReferenceStrategy, ResourceType,
    UsageRecord,
};

// Platform model
pub use crate::platform::{
    AdminApi, App, Connection, Environment, Flow, FlowDocument, GatewayRef, Principal,
    SnapshotSource, short_name,
};

// Reporting
pub use crate::report::{
    CsvExporter, Exporter, GatewayGroups, ReportKind, ReportWriter, SummaryFormatter,
    UsageAggregator,
};

// Error types
pub use crate::error::{AuditError, DefinitionError, ExportError, SourceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
