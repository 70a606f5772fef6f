//! Error types for the audit CLI.
//!
//! Only two classes of failure are allowed to abort a run: being unable
//! to reach the cluster at all, and an unusable configuration file.
//! Everything that can go wrong mid-audit (a failed resource listing, a
//! broken scanner invocation, an unwritable report path) is recovered and
//! surfaced in the report itself.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to create Kubernetes client: {0}")]
    ClientCreation(#[from] kube::Error),

    #[error("Failed to infer Kubernetes config: {0}")]
    ConfigInference(#[from] kube::config::InferConfigError),

    #[error("Failed to read kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("Failed to load configuration from {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}
