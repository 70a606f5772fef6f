//! Vulnerability scanner adapter.
//!
//! Invokes the external image scanner (trivy by default) as an isolated
//! subprocess per image. Every outcome, including a missing binary or a
//! timeout, is a [`ScanResult`] status rather than an error: one stuck or
//! failing scan must never delay or fail the scans of other images, and
//! the audit itself never aborts on scanner trouble.

use std::collections::BTreeSet;
use std::process::Stdio;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use indicatif::ProgressBar;
use log::{debug, info};
use tokio::process::Command;
use tokio::time::timeout;

use crate::auditor::types::{ScanResult, ScanStatus};
use crate::config::ScannerConfig;

/// Number of scanner output lines kept in the terminal excerpt. The full
/// output still lands in the persisted report.
const EXCERPT_LINES: usize = 20;

/// Per-image scanner with a bounded worker pool.
pub struct Scanner {
    config: ScannerConfig,
}

impl Scanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Scan a single image.
    ///
    /// The subprocess is killed when its future is dropped, so the
    /// per-image timeout also cancels the scan it bounds.
    pub async fn scan(&self, image: &str) -> ScanResult {
        debug!("scanning image '{}'", image);
        let mut command = Command::new(&self.config.binary);
        command
            .arg("image")
            .arg("--no-progress")
            .arg("--severity")
            .arg(self.config.severities.join(","))
            .arg(image)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match timeout(Duration::from_secs(self.config.timeout_secs), command.output()).await {
            Err(_) => ScanResult::new(
                image,
                ScanStatus::Timeout,
                format!("scan timed out after {}s", self.config.timeout_secs),
            ),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => ScanResult::new(
                image,
                ScanStatus::ToolUnavailable,
                format!("scanner binary '{}' not found on PATH", self.config.binary),
            ),
            Ok(Err(e)) => ScanResult::new(
                image,
                ScanStatus::Error,
                format!("failed to invoke scanner: {}", e),
            ),
            Ok(Ok(output)) => {
                classify(image, output.status.success(), &output.stdout, &output.stderr)
            }
        }
    }

    /// Scan the union of discovered images.
    ///
    /// Images are deduplicated by exact string match so a shared base
    /// image is scanned once, and walked in lexicographic order. At most
    /// `concurrency` scans run at a time; each carries its own timeout.
    pub async fn scan_images<I>(&self, images: I) -> Vec<ScanResult>
    where
        I: IntoIterator<Item = String>,
    {
        let unique: BTreeSet<String> = images.into_iter().collect();
        if unique.is_empty() {
            return Vec::new();
        }
        info!("scanning {} unique image(s)", unique.len());

        let progress = ProgressBar::new(unique.len() as u64);
        let concurrency = self.config.concurrency.max(1);

        let results = stream::iter(unique.into_iter().map(|image| {
            let progress = progress.clone();
            async move {
                let result = self.scan(&image).await;
                progress.inc(1);
                result
            }
        }))
        .buffered(concurrency)
        .collect::<Vec<_>>()
        .await;

        progress.finish_and_clear();
        results
    }
}

/// Map one finished scanner invocation to a result.
///
/// Exit 0 means clean. Anything else is treated as vulnerabilities
/// detected, with the scanner's own output as the evidence; stdout wins
/// over stderr when both are present.
fn classify(image: &str, success: bool, stdout: &[u8], stderr: &[u8]) -> ScanResult {
    if success {
        return ScanResult::new(
            image,
            ScanStatus::Clean,
            "no vulnerabilities found at the configured severities",
        );
    }

    let raw = if stdout.is_empty() { stderr } else { stdout };
    let output = String::from_utf8_lossy(raw).trim().to_string();
    ScanResult::new(image, ScanStatus::Vulnerable, excerpt(&output, EXCERPT_LINES))
        .with_full_detail(output)
}

fn excerpt(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= max_lines {
        text.to_string()
    } else {
        lines[..max_lines].join("\n")
    }
}
