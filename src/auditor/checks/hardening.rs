//! Pod hardening checks: securityContext presence and runAsNonRoot.

use crate::auditor::types::{Category, Finding, PodRecord, Severity};

/// Check that every container declares a securityContext and explicitly
/// opts into running as non-root.
///
/// The two conditions are mutually exclusive per container: a missing
/// securityContext is reported on its own, and runAsNonRoot is only
/// evaluated when a securityContext is present.
pub fn check(namespace: &str, pods: &[PodRecord]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for pod in pods {
        for container in &pod.containers {
            match &container.security_context {
                None => findings.push(Finding::new(
                    namespace,
                    &pod.name,
                    Severity::Medium,
                    Category::Hardening,
                    format!("container '{}' has no securityContext defined", container.name),
                )),
                Some(sc) if sc.run_as_non_root != Some(true) => findings.push(Finding::new(
                    namespace,
                    &pod.name,
                    Severity::Medium,
                    Category::Hardening,
                    format!("container '{}' is not set to runAsNonRoot=true", container.name),
                )),
                Some(_) => {}
            }
        }
    }
    findings
}
