//! Network exposure checks: NetworkPolicy presence and Ingress TLS.

use crate::auditor::types::{Category, Finding, IngressRecord, Severity};

/// Run both network sub-checks for one namespace.
///
/// TLS-secured ingresses produce positive `Info` confirmations rather
/// than silence, so a clean report is distinguishable from a check that
/// never ran.
pub fn check(namespace: &str, network_policies: &[String], ingresses: &[IngressRecord]) -> Vec<Finding> {
    let mut findings = Vec::new();

    if network_policies.is_empty() {
        findings.push(Finding::new(
            namespace,
            namespace,
            Severity::Medium,
            Category::NetworkExposure,
            format!("no NetworkPolicy found in namespace '{}'", namespace),
        ));
    }

    if ingresses.is_empty() {
        findings.push(Finding::new(
            namespace,
            namespace,
            Severity::Info,
            Category::NetworkExposure,
            format!("no Ingress resources found in namespace '{}'", namespace),
        ));
    } else {
        for ingress in ingresses {
            if ingress.has_tls {
                findings.push(Finding::new(
                    namespace,
                    &ingress.name,
                    Severity::Info,
                    Category::NetworkExposure,
                    "secured with TLS",
                ));
            } else {
                findings.push(Finding::new(
                    namespace,
                    &ingress.name,
                    Severity::Medium,
                    Category::NetworkExposure,
                    "no TLS configuration (HTTP only)",
                ));
            }
        }
    }

    findings
}
