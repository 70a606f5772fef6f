use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nsaudit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Audit two Kubernetes namespaces for drift and security posture")]
#[command(
    long_about = "A read-only audit tool that compares deployments between two Kubernetes namespaces, runs container and network security checks, scans container images for vulnerabilities, and renders a console plus optional Markdown report. Cluster state is never modified."
)]
pub struct Cli {
    /// First namespace to audit (e.g. prod)
    #[arg(long, value_name = "NAMESPACE")]
    pub ns1: String,

    /// Second namespace to audit (e.g. staging)
    #[arg(long, value_name = "NAMESPACE")]
    pub ns2: String,

    /// Write a Markdown report to this path
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Skip image vulnerability scanning (faster)
    #[arg(long)]
    pub skip_scan: bool,

    /// Kubeconfig context to use instead of the current one
    #[arg(long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Output format for the console view
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report itself
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
