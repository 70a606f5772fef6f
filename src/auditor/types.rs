//! Core types for the audit engine.
//!
//! Every check and the scanner adapter normalize their output into these
//! shapes so one aggregator and one renderer can handle all of them:
//! - `Finding` - a single normalized audit observation
//! - `DiffEntry` - one image difference between the two namespaces
//! - `ScanResult` - the outcome of scanning one container image
//! - `AuditReport` - the aggregate handed to the renderer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used when a deployment exists in only one namespace.
pub const MISSING: &str = "MISSING";

/// Textual format applied to all rendered timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Severity levels for findings.
///
/// Ordered from least to most severe:
/// `Info < Low < Medium < High < Critical < Error`
///
/// `Error` sits above `Critical` because a check that could not run at
/// all hides an unknown number of real issues.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
    Error,
}

impl Severity {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The check family a finding belongs to.
///
/// Adding a new check means adding a variant here, not a new data shape.
/// `ImageDiff` and `Vulnerability` are reserved: drift travels as
/// [`DiffEntry`] and scan outcomes as [`ScanResult`], so the core checks
/// never emit findings in those categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    ImageDiff,
    Privileged,
    Hardening,
    ResourceLimit,
    NetworkExposure,
    Vulnerability,
    CheckError,
}

impl Category {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImageDiff => "IMAGE_DIFF",
            Self::Privileged => "PRIVILEGED",
            Self::Hardening => "HARDENING",
            Self::ResourceLimit => "RESOURCE_LIMIT",
            Self::NetworkExposure => "NETWORK_EXPOSURE",
            Self::Vulnerability => "VULNERABILITY",
            Self::CheckError => "CHECK_ERROR",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single normalized audit observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The audited namespace this finding belongs to.
    pub namespace: String,
    /// Pod, deployment, ingress, or namespace name the finding is about.
    pub subject: String,
    pub severity: Severity,
    pub category: Category,
    /// Human-readable description of the observation.
    pub message: String,
}

impl Finding {
    pub fn new(
        namespace: impl Into<String>,
        subject: impl Into<String>,
        severity: Severity,
        category: Category,
        message: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            subject: subject.into(),
            severity,
            category,
            message: message.into(),
        }
    }
}

/// Security-context fields relevant to the container checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityInfo {
    pub privileged: Option<bool>,
    pub run_as_non_root: Option<bool>,
}

/// One container as seen by the checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub name: String,
    pub image: String,
    /// None when the container declares no securityContext at all.
    pub security_context: Option<SecurityInfo>,
    /// Whether a non-empty resource limits mapping is declared.
    pub limits_defined: bool,
}

/// One deployment as seen by the checks and the inventory tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub name: String,
    /// Container images in declaration order.
    pub images: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub containers: Vec<ContainerRecord>,
}

impl DeploymentRecord {
    /// Images joined in declaration order, the unit of drift comparison.
    /// Reordering containers within a deployment counts as a difference.
    pub fn image_set(&self) -> String {
        self.images.join(", ")
    }

    /// Creation timestamp in the report's fixed format, or "N/A".
    pub fn created_at_display(&self) -> String {
        match &self.created_at {
            Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// One pod as seen by the container security checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodRecord {
    pub name: String,
    pub containers: Vec<ContainerRecord>,
}

/// One ingress as seen by the network exposure check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRecord {
    pub name: String,
    pub has_tls: bool,
}

/// One image difference between the two audited namespaces.
///
/// Derived during comparison, consumed directly by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub deployment: String,
    /// Image set in the first namespace, or [`MISSING`].
    pub image_a: String,
    /// Image set in the second namespace, or [`MISSING`].
    pub image_b: String,
}

/// Outcome status of scanning one container image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    Clean,
    Vulnerable,
    ToolUnavailable,
    Timeout,
    Error,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "CLEAN",
            Self::Vulnerable => "VULNERABLE",
            Self::ToolUnavailable => "TOOL_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of scanning one unique image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub image: String,
    pub status: ScanStatus,
    /// Bounded excerpt of scanner output for terminal display.
    pub detail: String,
    /// Full scanner output, rendered only in the persisted report.
    pub full_detail: String,
}

impl ScanResult {
    pub fn new(
        image: impl Into<String>,
        status: ScanStatus,
        detail: impl Into<String>,
    ) -> Self {
        let detail = detail.into();
        Self {
            image: image.into(),
            status,
            full_detail: detail.clone(),
            detail,
        }
    }

    /// Set a full output larger than the terminal excerpt.
    pub fn with_full_detail(mut self, full_detail: impl Into<String>) -> Self {
        self.full_detail = full_detail.into();
        self
    }
}

/// Everything read from one namespace, plus the findings produced while
/// reading it. A failed resource listing leaves its collection empty and
/// contributes one `CheckError` finding instead of aborting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamespaceSnapshot {
    pub namespace: String,
    pub deployments: Vec<DeploymentRecord>,
    pub pods: Vec<PodRecord>,
    /// Names of NetworkPolicy objects; presence is what the check needs.
    pub network_policies: Vec<String>,
    pub ingresses: Vec<IngressRecord>,
    pub errors: Vec<Finding>,
}

impl NamespaceSnapshot {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }
}

/// The aggregate of one audit run, built once and never mutated after
/// handoff to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub namespaces: (String, String),
    pub deployments: (Vec<DeploymentRecord>, Vec<DeploymentRecord>),
    pub diffs: Vec<DiffEntry>,
    pub findings: Vec<Finding>,
    pub scans: Vec<ScanResult>,
    /// True when vulnerability scanning was skipped by flag; the report
    /// states this explicitly rather than omitting the section.
    pub scans_skipped: bool,
    pub generated_at: DateTime<Utc>,
}
