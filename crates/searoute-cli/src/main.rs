use anyhow::Result;
use clap::Parser;
use searoute_cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}
