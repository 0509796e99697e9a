use clap::Parser;
use gateway_audit::platform::{
    GatewayRef, Principal, Snapshot, SnapshotApp, SnapshotConnection, SnapshotEnvironment,
    SnapshotFlow, short_name,
};
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value, json};
use std::fs;

const APIS: [(&str, &str); 4] = [
    ("shared_sql", "SQL Server"),
    ("shared_filesystem", "File System"),
    ("shared_oracle", "Oracle Database"),
    ("shared_office365", "Office 365 Outlook"),
];

const OWNERS: [&str; 4] = [
    "avery@contoso.com",
    "jordan@contoso.com",
    "morgan@contoso.com",
    "riley@contoso.com",
];

/// A CLI tool to generate a synthetic tenant snapshot for the gateway audit
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_snapshot.json")]
    output: String,

    /// Number of environments to generate
    #[arg(long, default_value_t = 3)]
    environments: usize,

    /// Number of distinct gateways shared by the tenant
    #[arg(long, default_value_t = 2)]
    gateways: usize,

    /// The minimum number of apps and flows to generate per environment
    #[arg(long, default_value_t = 0)]
    min: usize,

    /// The maximum number of apps and flows to generate per environment
    #[arg(long, default_value_t = 10)]
    max: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    println!(
        "Generating snapshot ({} environment(s), {} gateway(s), {} to {} resources each)...",
        cli.environments, cli.gateways, cli.min, cli.max
    );

    let gateways: Vec<GatewayRef> = (0..cli.gateways).map(generate_gateway).collect();
    let environments = (0..cli.environments)
        .map(|index| generate_environment(&mut rng, index, &gateways, cli.min, cli.max))
        .collect();

    let snapshot = Snapshot { environments };
    let json_output = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved snapshot to '{}'",
        cli.output
    );

    Ok(())
}

/// Every third gateway omits its name and type, as some tenants report them.
fn generate_gateway(index: usize) -> GatewayRef {
    let id = format!("gw-{:04}", index + 1);
    if index % 3 == 2 {
        GatewayRef {
            id,
            name: None,
            gateway_type: None,
        }
    } else {
        GatewayRef {
            id,
            name: Some(format!("OnPremGW-{}", index + 1)),
            gateway_type: Some("Standard".to_string()),
        }
    }
}

fn generate_environment(
    rng: &mut ThreadRng,
    index: usize,
    gateways: &[GatewayRef],
    min: usize,
    max: usize,
) -> SnapshotEnvironment {
    let name = format!("Default-{:08x}", rng.random::<u32>());
    let connections: Vec<SnapshotConnection> = (0..rng.random_range(2..=8))
        .map(|c| generate_connection(rng, c, gateways))
        .collect();

    let apps: Vec<SnapshotApp> = (0..rng.random_range(min..=max))
        .map(|a| generate_app(rng, a, &connections))
        .collect();
    let flows: Vec<SnapshotFlow> = (0..rng.random_range(min..=max))
        .map(|f| generate_flow(rng, f, &connections))
        .collect();

    println!(
        "-> Environment {}: {} connection(s), {} app(s), {} flow(s).",
        index + 1,
        connections.len(),
        apps.len(),
        flows.len()
    );

    SnapshotEnvironment {
        name,
        display_name: Some(format!("Environment {}", index + 1)),
        connections,
        apps,
        flows,
    }
}

fn generate_connection(
    rng: &mut ThreadRng,
    index: usize,
    gateways: &[GatewayRef],
) -> SnapshotConnection {
    let (api, label) = APIS[rng.random_range(0..APIS.len())];
    let short = format!(
        "{}-{:06x}",
        api.replace('_', "-"),
        rng.random_range(0..0xffffffu32)
    );
    let gateway = if rng.random_bool(0.6) {
        gateways.choose(rng).cloned()
    } else {
        None
    };
    let parameters = gateway
        .as_ref()
        .map(|_| json!({ "server": format!("srv{:02}.corp.local", index + 1) }));

    SnapshotConnection {
        id: format!(
            "/providers/Microsoft.PowerApps/apis/{}/connections/{}",
            api, short
        ),
        display_name: Some(format!("{} {}", label, index + 1)),
        api_id: Some(format!("/providers/Microsoft.PowerApps/apis/{}", api)),
        server_address: None,
        parameters,
        gateway,
    }
}

fn generate_app(
    rng: &mut ThreadRng,
    index: usize,
    connections: &[SnapshotConnection],
) -> SnapshotApp {
    let count = rng.random_range(0..=connections.len().min(3));
    let used = connections
        .choose_multiple(rng, count)
        .map(|c| short_name(&c.id).to_string())
        .collect();

    SnapshotApp {
        name: format!("app-{:08x}", rng.random::<u32>()),
        display_name: Some(format!("Canvas App {}", index + 1)),
        owner: Principal::with_email(OWNERS.choose(rng).copied().unwrap_or(OWNERS[0])),
        created_time: "2025-01-15T09:30:00Z".to_string(),
        last_modified_time: "2025-06-01T14:00:00Z".to_string(),
        connections: used,
    }
}

fn generate_flow(
    rng: &mut ThreadRng,
    index: usize,
    connections: &[SnapshotConnection],
) -> SnapshotFlow {
    let count = rng.random_range(0..=connections.len().min(3));
    let used: Vec<&SnapshotConnection> = connections.choose_multiple(rng, count).collect();

    let mut declared = Map::new();
    let mut actions = Map::new();
    for (position, connection) in used.iter().enumerate() {
        let reference = format!("conn_{}", position);
        let short = short_name(&connection.id);

        // Each reference is declared, embedded in an action, or both.
        match rng.random_range(0..3) {
            0 => {
                declared.insert(reference, json!({ "connectionId": connection.id }));
            }
            1 => {
                actions.insert(format!("Action_{}", position), host_action(short));
            }
            _ => {
                declared.insert(reference, json!({ "connectionId": connection.id }));
                actions.insert(
                    format!("Scope_{}", position),
                    json!({ "type": "Scope", "actions": { "Inner": host_action(short) } }),
                );
            }
        }
    }

    let creator = if rng.random_bool(0.8) {
        Principal::with_email(OWNERS.choose(rng).copied().unwrap_or(OWNERS[0]))
    } else {
        Principal {
            email: None,
            display_name: Some("Service Account".to_string()),
        }
    };

    SnapshotFlow {
        name: format!("flow-{:08x}", rng.random::<u32>()),
        display_name: Some(format!("Scheduled Flow {}", index + 1)),
        creator,
        created_time: "2025-02-10T08:00:00Z".to_string(),
        last_modified_time: "2025-07-20T16:45:00Z".to_string(),
        definition: json!({
            "parameters": { "$connections": { "value": Value::Object(declared) } },
            "actions": Value::Object(actions),
        }),
    }
}

fn host_action(connection_name: &str) -> Value {
    json!({
        "type": "OpenApiConnection",
        "inputs": { "host": { "connectionName": connection_name } }
    })
}
