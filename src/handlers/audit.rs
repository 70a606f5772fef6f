//! The audit command: connect, run the engine, render, persist.

use log::error;

use crate::auditor::{self, AuditOptions, cluster::ClusterReader};
use crate::cli::{Cli, OutputFormat};
use crate::config;
use crate::error::Result;
use crate::report;

/// Run one complete audit.
///
/// Returns `Err` only for startup failures (configuration, cluster
/// session). Findings never affect the exit status, and neither does a
/// failed report write: the in-memory audit result is already complete
/// when persistence runs.
pub async fn handle_audit(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;

    let reader = ClusterReader::connect(cli.context.as_deref()).await?;

    let options = AuditOptions {
        ns1: cli.ns1.clone(),
        ns2: cli.ns2.clone(),
        skip_scan: cli.skip_scan,
        scanner: config.scanner.clone(),
    };

    let audit_report = auditor::run_audit(&reader, &options).await;

    match cli.format {
        OutputFormat::Table => print!("{}", report::render_console(&audit_report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&audit_report)?),
    }

    if let Some(path) = cli.report.or(config.audit.report) {
        let document = report::markdown::render_markdown(&audit_report);
        match report::markdown::write_report(&path, &document) {
            Ok(()) => {
                if cli.format == OutputFormat::Table {
                    println!("\nMarkdown report saved as: {}", path.display());
                }
            }
            Err(e) => {
                error!("could not write report to {}: {}", path.display(), e);
                eprintln!("Could not write report to {}: {}", path.display(), e);
            }
        }
    }

    if cli.format == OutputFormat::Table {
        println!("\nAudit completed successfully.");
    }
    Ok(())
}
