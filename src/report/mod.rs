//! Report rendering.
//!
//! The console view is built as one string (tables plus colored finding
//! lines) and printed by the handler; the persisted Markdown document
//! lives in [`markdown`]. Rendering never fails the audit.

pub mod markdown;

use colored::*;
use prettytable::{Table, row};

use crate::auditor::types::{
    AuditReport, Category, DeploymentRecord, Finding, ScanStatus, Severity,
};

/// Categories rendered under "Security Findings".
const SECURITY_CATEGORIES: [Category; 1] = [Category::Privileged];
/// Categories rendered under "Extended Security Checks".
const EXTENDED_CATEGORIES: [Category; 2] = [Category::Hardening, Category::ResourceLimit];
/// Categories rendered under "Network Exposure".
const NETWORK_CATEGORIES: [Category; 1] = [Category::NetworkExposure];

/// Render the full console view of an audit report.
pub fn render_console(report: &AuditReport) -> String {
    let (ns1, ns2) = (&report.namespaces.0, &report.namespaces.1);
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n",
        "🔍 Kubernetes Namespace Audit".bright_white().bold()
    ));
    output.push_str(&format!(
        "Generated: {}   Namespaces: {} vs {}\n",
        report
            .generated_at
            .format(crate::auditor::types::TIMESTAMP_FORMAT),
        ns1.cyan(),
        ns2.cyan(),
    ));

    output.push_str(&section(&format!("Deployments in {}", ns1)));
    output.push_str(&inventory_table(&report.deployments.0));

    output.push_str(&section(&format!("Deployments in {}", ns2)));
    output.push_str(&inventory_table(&report.deployments.1));

    output.push_str(&section("Differences between namespaces"));
    if report.diffs.is_empty() {
        output.push_str("No differences found!\n");
    } else {
        let mut table = Table::new();
        table.set_titles(row!["DEPLOYMENT", ns1, ns2]);
        for diff in &report.diffs {
            table.add_row(row![diff.deployment, diff.image_a, diff.image_b]);
        }
        output.push_str(&table.to_string());
    }

    output.push_str(&findings_section(
        report,
        "🛡️  Security Findings",
        &SECURITY_CATEGORIES,
    ));
    output.push_str(&findings_section(
        report,
        "Extended Security Checks",
        &EXTENDED_CATEGORIES,
    ));
    output.push_str(&findings_section(
        report,
        "Network Exposure",
        &NETWORK_CATEGORIES,
    ));

    let errors: Vec<&Finding> = report
        .findings
        .iter()
        .filter(|f| f.category == Category::CheckError)
        .collect();
    if !errors.is_empty() {
        output.push_str(&section("Check Errors"));
        for finding in errors {
            output.push_str(&finding_line(finding));
        }
    }

    output.push_str(&section("Image Vulnerability Scans"));
    if report.scans_skipped {
        output.push_str("Image vulnerability scanning was skipped (--skip-scan).\n");
    } else if report.scans.is_empty() {
        output.push_str("No images discovered to scan.\n");
    } else {
        for scan in &report.scans {
            output.push_str(&format!(
                "[{}] {}\n",
                scan.image.cyan(),
                scan_status_label(scan.status)
            ));
            for line in scan.detail.lines() {
                output.push_str(&format!("    {}\n", line));
            }
        }
    }

    output
}

fn section(title: &str) -> String {
    format!(
        "\n{}\n{}\n",
        title.bright_white().bold(),
        "─".repeat(70).bright_blue()
    )
}

fn inventory_table(deployments: &[DeploymentRecord]) -> String {
    if deployments.is_empty() {
        return "No deployments found.\n".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["NAME", "IMAGES", "CREATED"]);
    for deployment in deployments {
        table.add_row(row![
            deployment.name,
            deployment.image_set(),
            deployment.created_at_display()
        ]);
    }
    table.to_string()
}

fn findings_section(report: &AuditReport, title: &str, categories: &[Category]) -> String {
    let mut output = section(title);
    let matched: Vec<&Finding> = report
        .findings
        .iter()
        .filter(|f| categories.contains(&f.category))
        .collect();
    for finding in matched {
        output.push_str(&finding_line(finding));
    }
    output
}

fn finding_line(finding: &Finding) -> String {
    let line = format!(
        "[{}] [{}] {}: {}",
        finding.namespace,
        severity_label(finding.severity),
        finding.subject,
        finding.message,
    );
    let mut wrapped = textwrap::fill(&line, 100);
    wrapped.push('\n');
    wrapped
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = severity.as_str();
    match severity {
        Severity::Critical => label.bright_red().bold(),
        Severity::High => label.red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.green(),
        Severity::Info => label.blue(),
        Severity::Error => label.magenta(),
    }
}

fn scan_status_label(status: ScanStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        ScanStatus::Clean => label.green(),
        ScanStatus::Vulnerable => label.bright_red().bold(),
        ScanStatus::ToolUnavailable => label.yellow(),
        ScanStatus::Timeout => label.yellow(),
        ScanStatus::Error => label.magenta(),
    }
}
