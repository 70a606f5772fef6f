//! # nsaudit
//!
//! A Rust-based command-line tool that audits two Kubernetes namespaces
//! for configuration drift and security posture, and produces a
//! human-readable report.
//!
//! ## Features
//!
//! - **Deployment inventory**: lists deployments, images, and creation
//!   timestamps per namespace
//! - **Drift detection**: compares deployment images between the two
//!   namespaces, including deployments missing on one side
//! - **Security checks**: privileged containers, securityContext
//!   hardening, resource limits, NetworkPolicy presence, Ingress TLS
//! - **Vulnerability scanning**: per-image trivy scans with timeout and
//!   failure isolation
//! - **Reports**: colored console view, optional Markdown document,
//!   JSON output
//!
//! The audit is strictly read-only. Any failure past establishing the
//! cluster session becomes a reportable finding instead of aborting.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nsaudit::auditor::{self, AuditOptions, cluster::ClusterReader};
//!
//! # async fn example() -> nsaudit::Result<()> {
//! let reader = ClusterReader::connect(None).await?;
//! let options = AuditOptions {
//!     ns1: "prod".to_string(),
//!     ns2: "staging".to_string(),
//!     skip_scan: true,
//!     scanner: Default::default(),
//! };
//! let report = auditor::run_audit(&reader, &options).await;
//! println!("{} findings", report.findings.len());
//! # Ok(())
//! # }
//! ```

pub mod auditor;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod report;

// Re-export commonly used types and functions
pub use auditor::types::{AuditReport, Category, Finding, ScanResult, Severity};
pub use error::{AuditError, Result};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute the parsed command line.
pub async fn run(cli: cli::Cli) -> Result<()> {
    handlers::handle_audit(cli).await
}
