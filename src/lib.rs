//! # Gateway Audit - On-Premises Gateway Dependency Discovery
//!
//! **Gateway Audit** finds every app and flow in a low-code platform tenant that reaches a
//! data source through an on-premises data gateway, and reports that usage grouped by
//! gateway. It answers the questions an administrator has before decommissioning or
//! patching a gateway: what depends on it, who owns it, and where it lives.
//!
//! ## Core Workflow
//!
//! The engine never talks to the platform directly. It reads listings through the
//! `AdminApi` trait, which makes it independent of how those listings were fetched.
//!
//! 1.  **Provide Listings**: Implement `AdminApi` for your backend, or load a saved export
//!     with `SnapshotSource`.
//! 2.  **Configure**: Use `Auditor::builder` to pick reference strategies and environments.
//! 3.  **Run**: `Auditor::run` walks environments, apps and flows, resolves their
//!     connections, and returns an `AuditOutcome` holding the gateway registry and the
//!     usage ledger.
//! 4.  **Report**: Print a `SummaryFormatter` view and write the CSV reports with a
//!     `ReportWriter`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gateway_audit::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // 1. Load a saved export of the administrative API.
//!     let source = SnapshotSource::from_file("tenant.json")?;
//!
//!     // 2. Build the auditor; nested scopes and conditions are searched too.
//!     let auditor = Auditor::builder().with_nested_actions().build();
//!
//!     // 3. Run the audit.
//!     let outcome = auditor.run(&source)?;
//!     println!("{}", SummaryFormatter::format(&outcome));
//!
//!     // 4. Write the non-empty reports.
//!     let written = ReportWriter::new("reports").write(&outcome.usage, &mut CsvExporter)?;
//!     for path in written {
//!         println!("-> {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod discovery;
pub mod error;
pub mod platform;
pub mod prelude;
pub mod report;
