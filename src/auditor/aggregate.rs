//! Finding aggregation into a single report.
//!
//! Pure merge of the cluster reader's errors, the checks' findings, and
//! the scan results. Output ordering is fixed so two runs over the same
//! data render identically.

use chrono::Utc;

use crate::auditor::types::{
    AuditReport, Category, DiffEntry, Finding, NamespaceSnapshot, ScanResult, Severity,
};

/// Rendering order of finding categories within one namespace.
const CATEGORY_ORDER: [Category; 5] = [
    Category::Privileged,
    Category::Hardening,
    Category::ResourceLimit,
    Category::NetworkExposure,
    Category::CheckError,
];

/// Merge everything one audit run produced into the final report.
///
/// Findings are grouped by namespace in audit order, then by category in
/// [`CATEGORY_ORDER`], stable within a category. A check category with no
/// findings at all for a namespace gets one synthesized `Info` summary,
/// so "checked, found nothing" never reads like "not checked". Scan
/// results are sorted by image name.
pub fn aggregate(
    snapshot_a: NamespaceSnapshot,
    snapshot_b: NamespaceSnapshot,
    diffs: Vec<DiffEntry>,
    check_findings: Vec<Finding>,
    mut scans: Vec<ScanResult>,
    scans_skipped: bool,
) -> AuditReport {
    let mut collected = Vec::new();
    collected.extend(snapshot_a.errors.clone());
    collected.extend(snapshot_b.errors.clone());
    collected.extend(check_findings);

    let mut findings = Vec::with_capacity(collected.len());
    for namespace in [&snapshot_a.namespace, &snapshot_b.namespace] {
        for category in CATEGORY_ORDER {
            let matched: Vec<&Finding> = collected
                .iter()
                .filter(|f| &f.namespace == namespace && f.category == category)
                .collect();

            if matched.is_empty() {
                if let Some(summary) = passed_summary(namespace, category) {
                    findings.push(summary);
                }
            } else {
                findings.extend(matched.into_iter().cloned());
            }
        }
    }

    scans.sort_by(|a, b| a.image.cmp(&b.image));

    AuditReport {
        namespaces: (snapshot_a.namespace, snapshot_b.namespace),
        deployments: (snapshot_a.deployments, snapshot_b.deployments),
        diffs,
        findings,
        scans,
        scans_skipped,
        generated_at: Utc::now(),
    }
}

/// Summary finding for a check category that produced nothing.
/// `CheckError` has no summary: the absence of errors is not a check.
fn passed_summary(namespace: &str, category: Category) -> Option<Finding> {
    let message = match category {
        Category::Privileged => "no privileged containers detected",
        Category::Hardening => "all pod hardening checks passed",
        Category::ResourceLimit => "all containers define resource limits",
        Category::NetworkExposure => "no network exposure issues found",
        _ => return None,
    };
    Some(Finding::new(
        namespace,
        namespace,
        Severity::Info,
        category,
        message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(ns: &str, category: Category, message: &str) -> Finding {
        Finding::new(ns, "subject", severity_for(category), category, message)
    }

    fn severity_for(category: Category) -> Severity {
        match category {
            Category::Privileged => Severity::Critical,
            Category::Hardening => Severity::Medium,
            Category::ResourceLimit => Severity::Low,
            Category::CheckError => Severity::Error,
            _ => Severity::Info,
        }
    }

    #[test]
    fn findings_are_ordered_by_namespace_then_category() {
        let mixed = vec![
            finding("b-ns", Category::Hardening, "b hardening"),
            finding("a-ns", Category::NetworkExposure, "a network"),
            finding("a-ns", Category::Privileged, "a privileged"),
            finding("b-ns", Category::Privileged, "b privileged"),
            finding("a-ns", Category::Hardening, "a hardening"),
        ];

        let report = aggregate(
            NamespaceSnapshot::new("a-ns"),
            NamespaceSnapshot::new("b-ns"),
            vec![],
            mixed,
            vec![],
            true,
        );

        let a_findings: Vec<&Finding> = report
            .findings
            .iter()
            .filter(|f| f.namespace == "a-ns")
            .collect();
        let b_start = report
            .findings
            .iter()
            .position(|f| f.namespace == "b-ns")
            .unwrap();

        // All of a-ns comes before all of b-ns
        assert!(report.findings[b_start..].iter().all(|f| f.namespace == "b-ns"));

        // Within a-ns: privileged, hardening, then network exposure
        let a_categories: Vec<Category> = a_findings.iter().map(|f| f.category).collect();
        let privileged = a_categories.iter().position(|c| *c == Category::Privileged).unwrap();
        let hardening = a_categories.iter().position(|c| *c == Category::Hardening).unwrap();
        let network = a_categories
            .iter()
            .position(|c| *c == Category::NetworkExposure)
            .unwrap();
        assert!(privileged < hardening);
        assert!(hardening < network);
    }

    #[test]
    fn empty_categories_get_summary_findings() {
        let report = aggregate(
            NamespaceSnapshot::new("a-ns"),
            NamespaceSnapshot::new("b-ns"),
            vec![],
            vec![],
            vec![],
            true,
        );

        // Four summaries per namespace, none for CheckError
        assert_eq!(report.findings.len(), 8);
        assert!(report.findings.iter().all(|f| f.severity == Severity::Info));
        assert!(report.findings.iter().all(|f| f.category != Category::CheckError));
        assert!(
            report
                .findings
                .iter()
                .any(|f| f.namespace == "a-ns" && f.message.contains("no privileged containers"))
        );
    }

    #[test]
    fn categories_with_findings_are_not_summarized() {
        let report = aggregate(
            NamespaceSnapshot::new("a-ns"),
            NamespaceSnapshot::new("b-ns"),
            vec![],
            vec![finding("a-ns", Category::Privileged, "found one")],
            vec![],
            true,
        );

        let privileged: Vec<&Finding> = report
            .findings
            .iter()
            .filter(|f| f.namespace == "a-ns" && f.category == Category::Privileged)
            .collect();
        assert_eq!(privileged.len(), 1);
        assert_eq!(privileged[0].message, "found one");
    }

    #[test]
    fn snapshot_errors_are_merged_as_check_errors() {
        let mut snapshot_a = NamespaceSnapshot::new("a-ns");
        snapshot_a.errors.push(finding("a-ns", Category::CheckError, "could not list pods"));

        let report = aggregate(
            snapshot_a,
            NamespaceSnapshot::new("b-ns"),
            vec![],
            vec![],
            vec![],
            true,
        );

        let a_findings: Vec<&Finding> = report
            .findings
            .iter()
            .filter(|f| f.namespace == "a-ns")
            .collect();
        // The check error comes after every check summary
        assert_eq!(a_findings.last().unwrap().category, Category::CheckError);
    }

    #[test]
    fn scans_are_sorted_by_image() {
        use crate::auditor::types::{ScanResult, ScanStatus};
        let report = aggregate(
            NamespaceSnapshot::new("a-ns"),
            NamespaceSnapshot::new("b-ns"),
            vec![],
            vec![],
            vec![
                ScanResult::new("zeta:1", ScanStatus::Clean, "ok"),
                ScanResult::new("alpha:2", ScanStatus::Clean, "ok"),
            ],
            false,
        );
        let images: Vec<&str> = report.scans.iter().map(|s| s.image.as_str()).collect();
        assert_eq!(images, vec!["alpha:2", "zeta:1"]);
    }

    #[test]
    fn every_finding_belongs_to_an_audited_namespace() {
        let report = aggregate(
            NamespaceSnapshot::new("a-ns"),
            NamespaceSnapshot::new("b-ns"),
            vec![],
            vec![
                finding("a-ns", Category::Hardening, "x"),
                finding("b-ns", Category::ResourceLimit, "y"),
            ],
            vec![],
            true,
        );
        assert!(
            report
                .findings
                .iter()
                .all(|f| f.namespace == "a-ns" || f.namespace == "b-ns")
        );
    }
}
