use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration loaded from `.nsaudit.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub audit: AuditConfig,
}

/// Settings for the external image vulnerability scanner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScannerConfig {
    /// Scanner binary to invoke.
    pub binary: String,
    /// Severity levels passed to the scanner's --severity flag.
    pub severities: Vec<String>,
    /// Per-image scan timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of images scanned concurrently.
    pub concurrency: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            binary: "trivy".to_string(),
            severities: vec![
                "CRITICAL".to_string(),
                "HIGH".to_string(),
                "MEDIUM".to_string(),
                "LOW".to_string(),
            ],
            timeout_secs: 180,
            concurrency: 4,
        }
    }
}

/// Audit-run defaults that CLI flags override.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuditConfig {
    /// Default report output path when --report is not given.
    pub report: Option<PathBuf>,
}
