//! Privileged container detection.

use crate::auditor::types::{Category, Finding, PodRecord, Severity};

/// Flag every container that explicitly runs in privileged mode.
///
/// A container with no securityContext is treated as not privileged here;
/// the hardening check reports the absence separately.
pub fn check(namespace: &str, pods: &[PodRecord]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for pod in pods {
        for container in &pod.containers {
            let privileged = container
                .security_context
                .as_ref()
                .and_then(|sc| sc.privileged)
                .unwrap_or(false);
            if privileged {
                findings.push(Finding::new(
                    namespace,
                    &pod.name,
                    Severity::Critical,
                    Category::Privileged,
                    format!("container '{}' runs with privileged=true", container.name),
                ));
            }
        }
    }
    findings
}
