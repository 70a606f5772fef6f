//! Engine-level tests over fake cluster data: checks, aggregation, and
//! rendering run end to end without a cluster or a scanner installed.

use nsaudit::auditor::aggregate::aggregate;
use nsaudit::auditor::checks::{self, image_diff};
use nsaudit::auditor::scanner::Scanner;
use nsaudit::auditor::types::{
    Category, ContainerRecord, DeploymentRecord, DiffEntry, NamespaceSnapshot, PodRecord,
    ScanStatus, SecurityInfo, Severity,
};
use nsaudit::config::ScannerConfig;
use nsaudit::report::{markdown, render_console};

fn container(name: &str, image: &str) -> ContainerRecord {
    ContainerRecord {
        name: name.to_string(),
        image: image.to_string(),
        security_context: None,
        limits_defined: false,
    }
}

fn deployment(name: &str, images: &[&str]) -> DeploymentRecord {
    DeploymentRecord {
        name: name.to_string(),
        images: images.iter().map(|s| s.to_string()).collect(),
        created_at: None,
        containers: images
            .iter()
            .enumerate()
            .map(|(i, image)| container(&format!("c{}", i), image))
            .collect(),
    }
}

#[test]
fn drift_scenario_web_and_worker() {
    let ns_a = vec![deployment("web", &["app:1.0"])];
    let ns_b = vec![deployment("web", &["app:1.1"]), deployment("worker", &["worker:1.0"])];

    let diffs = image_diff::diff_deployments(&ns_a, &ns_b);
    assert_eq!(
        diffs,
        vec![
            DiffEntry {
                deployment: "web".to_string(),
                image_a: "app:1.0".to_string(),
                image_b: "app:1.1".to_string(),
            },
            DiffEntry {
                deployment: "worker".to_string(),
                image_a: "MISSING".to_string(),
                image_b: "worker:1.0".to_string(),
            },
        ]
    );
}

#[test]
fn privileged_pod_surfaces_as_one_critical_finding_in_the_report() {
    let mut snapshot_a = NamespaceSnapshot::new("prod");
    snapshot_a.pods = vec![PodRecord {
        name: "api-0".to_string(),
        containers: vec![ContainerRecord {
            name: "api".to_string(),
            image: "api:2".to_string(),
            security_context: Some(SecurityInfo {
                privileged: Some(true),
                run_as_non_root: None,
            }),
            limits_defined: true,
        }],
    }];
    let snapshot_b = NamespaceSnapshot::new("staging");

    let mut findings = checks::run_namespace_checks(&snapshot_a);
    findings.extend(checks::run_namespace_checks(&snapshot_b));

    let report = aggregate(snapshot_a, snapshot_b, vec![], findings, vec![], true);

    let critical: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.category == Category::Privileged && f.severity == Severity::Critical)
        .collect();
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].namespace, "prod");
    assert_eq!(critical[0].subject, "api-0");
    assert!(critical[0].message.contains("'api'"));
}

#[test]
fn empty_namespaces_still_render_a_complete_report() {
    let snapshot_a = NamespaceSnapshot::new("prod");
    let snapshot_b = NamespaceSnapshot::new("staging");

    let mut findings = checks::run_namespace_checks(&snapshot_a);
    findings.extend(checks::run_namespace_checks(&snapshot_b));
    let report = aggregate(snapshot_a, snapshot_b, vec![], findings, vec![], true);

    // NetworkPolicy absence is a Medium, Ingress absence an Info, per ns
    for ns in ["prod", "staging"] {
        let network: Vec<_> = report
            .findings
            .iter()
            .filter(|f| f.namespace == ns && f.category == Category::NetworkExposure)
            .collect();
        assert_eq!(network.len(), 2);
        assert_eq!(
            network.iter().filter(|f| f.severity == Severity::Medium).count(),
            1
        );
        assert_eq!(
            network.iter().filter(|f| f.severity == Severity::Info).count(),
            1
        );
    }

    // The remaining check categories are summarized, never silent
    assert!(report.findings.iter().any(|f| f.category == Category::Privileged));
    assert!(report.findings.iter().any(|f| f.category == Category::Hardening));
    assert!(report.findings.iter().any(|f| f.category == Category::ResourceLimit));

    let console = render_console(&report);
    assert!(console.contains("skipped"));
    let doc = markdown::render_markdown(&report);
    assert!(doc.contains("## Network Exposure"));
}

#[tokio::test]
async fn absent_scanner_binary_still_produces_a_full_report() {
    let mut snapshot_a = NamespaceSnapshot::new("prod");
    snapshot_a.deployments = vec![deployment("web", &["app:1.0"])];
    let mut snapshot_b = NamespaceSnapshot::new("staging");
    snapshot_b.deployments =
        vec![deployment("web", &["app:1.0"]), deployment("worker", &["worker:2"])];

    let scanner = Scanner::new(ScannerConfig {
        binary: "nsaudit-integration-missing-scanner".to_string(),
        ..Default::default()
    });
    let images = snapshot_a
        .deployments
        .iter()
        .chain(snapshot_b.deployments.iter())
        .flat_map(|d| d.images.iter().cloned());
    let scans = scanner.scan_images(images).await;

    // app:1.0 appears in both namespaces but is scanned once
    assert_eq!(scans.len(), 2);
    assert!(scans.iter().all(|s| s.status == ScanStatus::ToolUnavailable));

    let diffs = image_diff::diff_deployments(&snapshot_a.deployments, &snapshot_b.deployments);
    let mut findings = checks::run_namespace_checks(&snapshot_a);
    findings.extend(checks::run_namespace_checks(&snapshot_b));
    let report = aggregate(snapshot_a, snapshot_b, diffs, findings, scans, false);

    let doc = markdown::render_markdown(&report);
    assert!(doc.contains("### `app:1.0` — TOOL_UNAVAILABLE"));
    assert!(doc.contains("### `worker:2` — TOOL_UNAVAILABLE"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.md");
    markdown::write_report(&path, &doc).unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().contains("Audit Report"));
}

#[test]
fn findings_never_cross_namespaces() {
    let mut snapshot_a = NamespaceSnapshot::new("prod");
    snapshot_a.pods = vec![PodRecord {
        name: "p".to_string(),
        containers: vec![container("c", "i:1")],
    }];
    let mut snapshot_b = NamespaceSnapshot::new("staging");
    snapshot_b.deployments = vec![deployment("d", &["i:2"])];

    let mut findings = checks::run_namespace_checks(&snapshot_a);
    findings.extend(checks::run_namespace_checks(&snapshot_b));
    let report = aggregate(snapshot_a, snapshot_b, vec![], findings, vec![], true);

    assert!(
        report
            .findings
            .iter()
            .all(|f| f.namespace == "prod" || f.namespace == "staging")
    );
}
