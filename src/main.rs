use clap::Parser;
use nsaudit::cli::Cli;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    if let Err(e) = nsaudit::run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
