//! Stateless audit checks.
//!
//! Each check is a pure function from plain records to findings, so the
//! set can run in any order, in parallel, and against fakes in tests.
//! `image_diff` is the exception in shape: it compares the two
//! namespaces against each other and produces [`DiffEntry`] rows for the
//! renderer instead of findings.
//!
//! [`DiffEntry`]: crate::auditor::types::DiffEntry

pub mod hardening;
pub mod image_diff;
pub mod network;
pub mod privileged;
pub mod resource_limits;

use crate::auditor::types::{Finding, NamespaceSnapshot};

/// Run every per-namespace check over one snapshot.
pub fn run_namespace_checks(snapshot: &NamespaceSnapshot) -> Vec<Finding> {
    let ns = snapshot.namespace.as_str();
    let mut findings = privileged::check(ns, &snapshot.pods);
    findings.extend(hardening::check(ns, &snapshot.pods));
    findings.extend(resource_limits::check(ns, &snapshot.deployments));
    findings.extend(network::check(ns, &snapshot.network_policies, &snapshot.ingresses));
    findings
}
