//! Tests for aggregation, the console summary, and report export.
mod common;
use common::*;
use gateway_audit::discovery::USAGE_COLUMNS;
use gateway_audit::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn record(resource_type: ResourceType, name: &str, gateway_name: &str) -> UsageRecord {
    UsageRecord {
        resource_type,
        resource_name: name.to_string(),
        resource_id: format!("{}-id", name),
        environment_name: "Production".to_string(),
        environment_id: "env-1".to_string(),
        connection_display_name: "Finance SQL".to_string(),
        connection_target: "sql01.corp.local".to_string(),
        gateway_id: format!("{}-id", gateway_name),
        gateway_name: gateway_name.to_string(),
        gateway_type: "Standard".to_string(),
        owner: "owner@contoso.com".to_string(),
        created_time: "2025-01-01T00:00:00Z".to_string(),
        last_modified_time: "2025-02-01T00:00:00Z".to_string(),
    }
}

fn sample_usage() -> UsageAggregator {
    let mut usage = UsageAggregator::new();
    usage.add(record(ResourceType::Flow, "Sync", "South"));
    usage.add(record(ResourceType::App, "Expenses", "North"));
    usage.add(record(ResourceType::Flow, "Backup", "North"));
    usage
}

/// Captures what would have been written instead of touching the disk.
#[derive(Default)]
struct MemoryExporter {
    files: Vec<(PathBuf, Vec<String>)>,
}

impl Exporter for MemoryExporter {
    fn export(
        &mut self,
        path: &Path,
        records: &[&UsageRecord],
    ) -> std::result::Result<(), ExportError> {
        let names = records.iter().map(|r| r.resource_name.clone()).collect();
        self.files.push((path.to_path_buf(), names));
        Ok(())
    }
}

#[test]
fn test_aggregator_totals_by_type() {
    let usage = sample_usage();
    assert_eq!(usage.len(), 3);
    assert_eq!(usage.total_by_type(ResourceType::App), 1);
    assert_eq!(usage.total_by_type(ResourceType::Flow), 2);
    assert_eq!(usage.records_of(ResourceType::Flow)[1].resource_name, "Backup");
}

#[test]
fn test_group_by_gateway_keeps_discovery_order() {
    let usage = sample_usage();
    let groups = usage.group_by_gateway();

    assert_eq!(groups.names(), vec!["South", "North"]);
    let north: Vec<&str> = groups
        .get("North")
        .unwrap()
        .iter()
        .map(|r| r.resource_name.as_str())
        .collect();
    assert_eq!(north, vec!["Expenses", "Backup"]);
    assert_eq!(groups.total_records(), usage.len());
    assert!(groups.get("West").is_none());
}

#[test]
fn test_empty_aggregator_has_no_groups() {
    let usage = UsageAggregator::new();
    assert!(usage.group_by_gateway().is_empty());
    assert_eq!(usage.total_by_type(ResourceType::App), 0);
}

#[test]
fn test_report_file_names_carry_timestamp() {
    assert_eq!(
        ReportKind::All.file_name("20250101_120000"),
        "GatewayUsage_All_20250101_120000.csv"
    );
    assert_eq!(
        ReportKind::Apps.file_name("20250101_120000"),
        "GatewayUsage_Apps_20250101_120000.csv"
    );
    assert_eq!(
        ReportKind::Flows.file_name("20250101_120000"),
        "GatewayUsage_Flows_20250101_120000.csv"
    );

    let writer = ReportWriter::new("reports");
    assert_eq!(writer.timestamp().len(), "20250101_120000".len());
}

#[test]
fn test_writer_hands_each_report_to_exporter() {
    let usage = sample_usage();
    let mut exporter = MemoryExporter::default();

    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path()).with_timestamp("T");
    let written = writer.write(&usage, &mut exporter).unwrap();

    assert_eq!(written.len(), 3);
    assert_eq!(exporter.files[0].1, vec!["Sync", "Expenses", "Backup"]);
    assert_eq!(exporter.files[1].1, vec!["Expenses"]);
    assert_eq!(exporter.files[2].1, vec!["Sync", "Backup"]);
    assert_eq!(exporter.files[1].0, dir.path().join("GatewayUsage_Apps_T.csv"));
}

#[test]
fn test_writer_skips_empty_reports() {
    let mut usage = UsageAggregator::new();
    usage.add(record(ResourceType::Flow, "Sync", "South"));
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = MemoryExporter::default();

    let written = ReportWriter::new(dir.path())
        .with_timestamp("T")
        .write(&usage, &mut exporter)
        .unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["GatewayUsage_All_T.csv", "GatewayUsage_Flows_T.csv"]);
}

#[test]
fn test_writer_writes_nothing_for_empty_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("reports");
    let written = ReportWriter::new(&output)
        .write(&UsageAggregator::new(), &mut CsvExporter)
        .unwrap();

    assert!(written.is_empty());
    assert!(!output.exists());
}

#[test]
fn test_csv_export_header_and_rows() {
    let usage = sample_usage();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("nested");

    let written = ReportWriter::new(&output)
        .with_timestamp("20250101_120000")
        .write(&usage, &mut CsvExporter)
        .unwrap();
    assert_eq!(written.len(), 3);

    let content =
        fs::read_to_string(output.join("GatewayUsage_All_20250101_120000.csv")).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), USAGE_COLUMNS.join(","));
    let first_row = lines.next().unwrap();
    assert!(first_row.starts_with("Flow,Sync,Sync-id,Production,env-1,Finance SQL,"));
    assert_eq!(content.lines().count(), 4);

    let apps =
        fs::read_to_string(output.join("GatewayUsage_Apps_20250101_120000.csv")).unwrap();
    assert_eq!(apps.lines().count(), 2);
}

#[test]
fn test_summary_lists_gateways_and_skipped_resources() {
    let connection = gateway_connection("sql", "gw1", Some("OnPremGW"));
    let mut api = FixtureApi::default()
        .with_environment(environment("env-1", "Production"))
        .with_connection("env-1", connection.clone())
        .with_app(app("app-1", "env-1", "owner@contoso.com"), vec![connection])
        .with_app(app("app-2", "env-1", "owner@contoso.com"), vec![]);
    api.failing_apps.insert("app-2".to_string());

    let outcome = Auditor::default().run(&api).unwrap();
    let summary = SummaryFormatter::format(&outcome);

    assert!(summary.contains("Environments scanned: 1"));
    assert!(summary.contains("Total usages:         1"));
    assert!(summary.contains("Gateway 'OnPremGW' [gw1] (type: Standard): 1 usage(s)"));
    assert!(summary.contains("-> [App] App app-1 (Production) via SQL sql"));
    assert!(summary.contains("Skipped resources: 1"));
    assert!(summary.contains("Skipped App 'App app-2' (app-2)"));
}

#[test]
fn test_summary_counts_gateways_sharing_a_name_separately() {
    let first = gateway_connection("sql", "gw1", Some("OnPremGW"));
    let second = gateway_connection("fs", "gw2", Some("OnPremGW"));
    let api = FixtureApi::default()
        .with_environment(environment("env-1", "Production"))
        .with_connection("env-1", first.clone())
        .with_connection("env-1", second.clone())
        .with_app(app("app-1", "env-1", "owner@contoso.com"), vec![first])
        .with_app(app("app-2", "env-1", "owner@contoso.com"), vec![second]);

    let outcome = Auditor::default().run(&api).unwrap();
    let summary = SummaryFormatter::format(&outcome);

    assert!(summary.contains("Total usages:         2"));
    assert!(summary.contains("Gateway 'OnPremGW' [gw1] (type: Standard): 1 usage(s)"));
    assert!(summary.contains("Gateway 'OnPremGW' [gw2] (type: Standard): 1 usage(s)"));
    assert_eq!(summary.matches("  -> [App]").count(), 2);

    // The name-keyed grouping still merges them.
    let groups = outcome.usage.group_by_gateway();
    assert_eq!(groups.get("OnPremGW").map(|r| r.len()), Some(2));
}
