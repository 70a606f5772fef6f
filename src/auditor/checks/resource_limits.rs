//! Resource limit checks on deployment containers.

use crate::auditor::types::{Category, DeploymentRecord, Finding, Severity};

/// Flag every deployment container without resource limits.
///
/// Only limits are evaluated; requests are deliberately ignored.
pub fn check(namespace: &str, deployments: &[DeploymentRecord]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for deployment in deployments {
        for container in &deployment.containers {
            if !container.limits_defined {
                findings.push(Finding::new(
                    namespace,
                    &deployment.name,
                    Severity::Low,
                    Category::ResourceLimit,
                    format!("container '{}' has no resource limits set", container.name),
                ));
            }
        }
    }
    findings
}
