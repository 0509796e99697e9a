use super::aggregator::UsageAggregator;
use crate::discovery::{ResourceType, UsageRecord};
use crate::error::ExportError;
use std::fs;
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Serializes a list of usage records to one tabular file.
pub trait Exporter {
    fn export(&mut self, path: &Path, records: &[&UsageRecord]) -> Result<(), ExportError>;
}

/// Writes comma-separated files with a header row.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn export(&mut self, path: &Path, records: &[&UsageRecord]) -> Result<(), ExportError> {
        let csv_error = |source: csv::Error| ExportError::Csv {
            path: path.display().to_string(),
            source,
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        for record in records {
            writer.serialize(record).map_err(csv_error)?;
        }
        writer.flush().map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

/// The three reports an audit produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    All,
    Apps,
    Flows,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::All, ReportKind::Apps, ReportKind::Flows];

    pub fn file_name(&self, timestamp: &str) -> String {
        let label = match self {
            ReportKind::All => "All",
            ReportKind::Apps => "Apps",
            ReportKind::Flows => "Flows",
        };
        format!("GatewayUsage_{}_{}.csv", label, timestamp)
    }

    fn select<'a>(&self, usage: &'a UsageAggregator) -> Vec<&'a UsageRecord> {
        match self {
            ReportKind::All => usage.records().iter().collect(),
            ReportKind::Apps => usage.records_of(ResourceType::App),
            ReportKind::Flows => usage.records_of(ResourceType::Flow),
        }
    }
}

/// Names the report files for one run and hands each non-empty one to an `Exporter`.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    timestamp: String,
}

impl ReportWriter {
    /// A writer stamped with the current local time.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn path_for(&self, kind: ReportKind) -> PathBuf {
        self.output_dir.join(kind.file_name(&self.timestamp))
    }

    /// Writes every report that has at least one record. Returns the paths written.
    pub fn write(
        &self,
        usage: &UsageAggregator,
        exporter: &mut dyn Exporter,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let mut written = Vec::new();
        for kind in ReportKind::ALL {
            let records = kind.select(usage);
            if records.is_empty() {
                log::debug!("Skipping empty {:?} report", kind);
                continue;
            }

            if written.is_empty() {
                fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::Io {
                    path: self.output_dir.display().to_string(),
                    source,
                })?;
            }

            let path = self.path_for(kind);
            exporter.export(&path, &records)?;
            log::info!("Wrote {} record(s) to '{}'", records.len(), path.display());
            written.push(path);
        }
        Ok(written)
    }
}
