//! The audit engine.
//!
//! Control flow for one run: cluster reader snapshots (one per
//! namespace, concurrently) feed the stateless checks, the union of
//! discovered images feeds the scanner fan-out, and the aggregator
//! merges everything into a single [`AuditReport`] for the renderer.
//!
//! Checks are pure computations over already-fetched records, so nothing
//! in here holds shared mutable state; the only long-blocking work is
//! the scanner's subprocess pool, which isolates failures per image.
//!
//! [`AuditReport`]: types::AuditReport

pub mod aggregate;
pub mod checks;
pub mod cluster;
pub mod scanner;
pub mod types;

use log::info;

use crate::config::ScannerConfig;
use cluster::ClusterReader;
use scanner::Scanner;
use types::AuditReport;

/// Options for one audit run.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub ns1: String,
    pub ns2: String,
    pub skip_scan: bool,
    pub scanner: ScannerConfig,
}

/// Run a complete audit over two namespaces.
///
/// Never fails: everything that can go wrong past client construction is
/// recorded in the report as a finding or scan status.
pub async fn run_audit(reader: &ClusterReader, options: &AuditOptions) -> AuditReport {
    info!("auditing namespaces '{}' and '{}'", options.ns1, options.ns2);

    let (snapshot_a, snapshot_b) =
        tokio::join!(reader.snapshot(&options.ns1), reader.snapshot(&options.ns2));

    let diffs =
        checks::image_diff::diff_deployments(&snapshot_a.deployments, &snapshot_b.deployments);

    let mut findings = checks::run_namespace_checks(&snapshot_a);
    findings.extend(checks::run_namespace_checks(&snapshot_b));

    let scans = if options.skip_scan {
        info!("image vulnerability scanning skipped by flag");
        Vec::new()
    } else {
        let images = snapshot_a
            .deployments
            .iter()
            .chain(snapshot_b.deployments.iter())
            .flat_map(|d| d.images.iter().cloned());
        Scanner::new(options.scanner.clone()).scan_images(images).await
    };

    aggregate::aggregate(snapshot_a, snapshot_b, diffs, findings, scans, options.skip_scan)
}
