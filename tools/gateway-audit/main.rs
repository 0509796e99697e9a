use clap::Parser;
use gateway_audit::prelude::*;
use std::error::Error;
use std::time::Instant;

/// Reports which apps and flows route through on-premises data gateways
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the administrative API snapshot JSON file
    snapshot_path: String,

    /// Directory the CSV reports are written to
    #[arg(short, long, default_value = "reports")]
    output_dir: String,

    /// Only audit this environment (id or display name). Repeat for several
    #[arg(short, long = "environment")]
    environments: Vec<String>,

    /// Also search actions nested in scopes, conditions and switches
    #[arg(long)]
    deep_actions: bool,

    /// Print the summary without writing any report
    #[arg(long)]
    no_export: bool,

    /// Log progress for every environment
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli) {
        exit_with_error(e.as_ref());
    }
}

fn run(cli: Cli) -> std::result::Result<(), Box<dyn Error>> {
    let total_start = Instant::now();

    // --- 1. Snapshot Loading ---
    println!("Loading snapshot from: {}", cli.snapshot_path);
    let source = SnapshotSource::from_file(&cli.snapshot_path)?;

    // --- 2. Discovery ---
    let mut builder = Auditor::builder().with_environment_filter(cli.environments);
    if cli.deep_actions {
        builder = builder.with_nested_actions();
    }
    let auditor = builder.build();
    println!(
        "Reference strategies: {}",
        auditor.extractor().strategy_names().join(", ")
    );

    let audit_start = Instant::now();
    let outcome = auditor.run(&source)?;
    let audit_duration = audit_start.elapsed();

    // --- 3. Summary ---
    println!("\n{}", SummaryFormatter::format(&outcome));

    // --- 4. Export ---
    if cli.no_export {
        println!("\nReport export disabled.");
    } else if outcome.usage.is_empty() {
        println!("\nNo gateway usage found. No reports written.");
    } else {
        let writer = ReportWriter::new(&cli.output_dir);
        let written = writer
            .write(&outcome.usage, &mut CsvExporter)
            .map_err(AuditError::from)?;
        println!();
        for path in written {
            println!("  -> Wrote '{}'", path.display());
        }
    }

    println!("\nAudit:                {:?}", audit_duration);
    println!("Total Execution:      {:?}", total_start.elapsed());
    Ok(())
}

fn exit_with_error(error: &dyn Error) -> ! {
    eprintln!("\nError: {}", error);
    let mut cause = error.source();
    while let Some(inner) = cause {
        eprintln!("  caused by: {}", inner);
        cause = inner.source();
    }
    std::process::exit(1);
}
