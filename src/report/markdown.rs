//! Persisted Markdown report.
//!
//! Section order is fixed: deployment inventory for both namespaces,
//! image differences, security findings, extended checks, network
//! exposure, then per-image vulnerability scan detail. Unlike the
//! console view, the scan section carries the full scanner output.

use std::fs;
use std::path::Path;

use crate::auditor::types::{
    AuditReport, Category, DeploymentRecord, Finding, TIMESTAMP_FORMAT,
};

/// Render the complete Markdown document for one audit report.
pub fn render_markdown(report: &AuditReport) -> String {
    let (ns1, ns2) = (&report.namespaces.0, &report.namespaces.1);
    let mut lines = Vec::new();

    lines.push("# Kubernetes Namespace Audit Report".to_string());
    lines.push(String::new());
    lines.push(format!(
        "**Generated on:** {}",
        report.generated_at.format(TIMESTAMP_FORMAT)
    ));
    lines.push(format!("**Namespaces compared:** `{}` vs `{}`", ns1, ns2));
    lines.push(String::new());

    lines.push(format!("## Deployments in {}", ns1));
    lines.push(String::new());
    lines.push(inventory_section(&report.deployments.0));
    lines.push(format!("## Deployments in {}", ns2));
    lines.push(String::new());
    lines.push(inventory_section(&report.deployments.1));

    lines.push("## Image Differences".to_string());
    lines.push(String::new());
    if report.diffs.is_empty() {
        lines.push("No differences found between the two namespaces.".to_string());
    } else {
        let rows = report
            .diffs
            .iter()
            .map(|d| vec![d.deployment.clone(), d.image_a.clone(), d.image_b.clone()])
            .collect();
        lines.push(md_table(&["Deployment", ns1, ns2], rows));
    }
    lines.push(String::new());

    lines.push(findings_section(
        report,
        "## Security Findings",
        &[Category::Privileged, Category::CheckError],
    ));
    lines.push(findings_section(
        report,
        "## Extended Security Checks",
        &[Category::Hardening, Category::ResourceLimit],
    ));
    lines.push(findings_section(
        report,
        "## Network Exposure",
        &[Category::NetworkExposure],
    ));

    lines.push("## Image Vulnerability Scans".to_string());
    lines.push(String::new());
    if report.scans_skipped {
        lines.push("Image vulnerability scanning was skipped (--skip-scan).".to_string());
    } else if report.scans.is_empty() {
        lines.push("No images discovered to scan.".to_string());
    } else {
        for scan in &report.scans {
            lines.push(format!("### `{}` — {}", scan.image, scan.status));
            lines.push(String::new());
            if !scan.full_detail.is_empty() {
                lines.push("```".to_string());
                lines.push(scan.full_detail.clone());
                lines.push("```".to_string());
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Write the rendered document to disk.
///
/// The caller decides what a failure means; the audit result itself is
/// already complete by the time this runs.
pub fn write_report(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, content)
}

fn inventory_section(deployments: &[DeploymentRecord]) -> String {
    if deployments.is_empty() {
        return "No deployments found.\n".to_string();
    }
    let rows = deployments
        .iter()
        .map(|d| vec![d.name.clone(), d.image_set(), d.created_at_display()])
        .collect();
    format!("{}\n", md_table(&["Name", "Images", "Created"], rows))
}

fn findings_section(report: &AuditReport, heading: &str, categories: &[Category]) -> String {
    let mut out = vec![heading.to_string(), String::new()];
    let matched: Vec<&Finding> = report
        .findings
        .iter()
        .filter(|f| categories.contains(&f.category))
        .collect();
    if matched.is_empty() {
        out.push("None.".to_string());
    } else {
        for finding in matched {
            out.push(format!(
                "- [{}] **{}** `{}`: {}",
                finding.namespace, finding.severity, finding.subject, finding.message
            ));
        }
    }
    out.push(String::new());
    out.join("\n")
}

fn md_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut out = String::new();
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    out.push_str(&format!(
        "|{}\n",
        headers.iter().map(|_| " --- |").collect::<String>()
    ));
    for row in rows {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out
}
