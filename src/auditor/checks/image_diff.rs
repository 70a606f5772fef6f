//! Image drift comparison between the two audited namespaces.

use std::collections::{BTreeMap, BTreeSet};

use crate::auditor::types::{DeploymentRecord, DiffEntry, MISSING};

/// Compare deployment images between two namespaces.
///
/// Image sets are compared as one opaque string per deployment (images
/// joined in container order), so a container reordering also counts as
/// drift. The union of deployment names is walked in lexicographic order
/// for deterministic output; a deployment present on one side only gets
/// exactly one entry with [`MISSING`] on the other side.
pub fn diff_deployments(a: &[DeploymentRecord], b: &[DeploymentRecord]) -> Vec<DiffEntry> {
    let map_a: BTreeMap<&str, String> =
        a.iter().map(|d| (d.name.as_str(), d.image_set())).collect();
    let map_b: BTreeMap<&str, String> =
        b.iter().map(|d| (d.name.as_str(), d.image_set())).collect();

    let all_names: BTreeSet<&str> = map_a.keys().chain(map_b.keys()).copied().collect();

    let mut diffs = Vec::new();
    for name in all_names {
        let image_a = map_a.get(name).cloned().unwrap_or_else(|| MISSING.to_string());
        let image_b = map_b.get(name).cloned().unwrap_or_else(|| MISSING.to_string());
        if image_a != image_b {
            diffs.push(DiffEntry {
                deployment: name.to_string(),
                image_a,
                image_b,
            });
        }
    }
    diffs
}
