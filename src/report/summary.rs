use crate::audit::AuditOutcome;
use crate::discovery::{GatewayRecord, ResourceType, UsageRecord};

/// Renders the console summary of an audit run.
pub struct SummaryFormatter;

impl SummaryFormatter {
    /// Format the totals, the per-gateway breakdown, and the skipped resources.
    pub fn format(outcome: &AuditOutcome) -> String {
        let usage = &outcome.usage;
        let mut lines = vec![
            "--- Gateway Usage Summary ---".to_string(),
            format!("Environments scanned: {}", outcome.environments_scanned),
            format!("Gateways discovered:  {}", outcome.registry.len()),
            format!("Total usages:         {}", usage.len()),
            format!("  Apps:               {}", usage.total_by_type(ResourceType::App)),
            format!("  Flows:              {}", usage.total_by_type(ResourceType::Flow)),
        ];

        // Distinct gateways may share a display name, so this view is keyed by id.
        for gateway in outcome.registry.all() {
            let records: Vec<&UsageRecord> = usage
                .records()
                .iter()
                .filter(|r| r.gateway_id == gateway.gateway_id)
                .collect();
            lines.push(String::new());
            lines.push(Self::format_gateway(gateway, records.len()));
            lines.extend(records.iter().map(|r| Self::format_usage(r)));
        }

        if !outcome.skipped.is_empty() {
            lines.push(String::new());
            lines.push(format!("Skipped resources: {}", outcome.skipped.len()));
            lines.extend(outcome.skipped.iter().map(|s| format!("  - {}", s)));
        }

        lines.join("\n")
    }

    fn format_gateway(gateway: &GatewayRecord, usages: usize) -> String {
        format!(
            "Gateway '{}' [{}] (type: {}): {} usage(s)",
            gateway.name, gateway.gateway_id, gateway.gateway_type, usages
        )
    }

    fn format_usage(record: &UsageRecord) -> String {
        format!(
            "  -> [{}] {} ({}) via {}",
            record.resource_type,
            record.resource_name,
            record.environment_name,
            record.connection_display_name
        )
    }
}
