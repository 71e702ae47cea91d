use hangar::cli;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging on stderr so command output stays clean
    let filter = EnvFilter::try_from_env("HANGAR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting hangar v{}", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments and run the appropriate command
    cli::run().await?;

    Ok(())
}
