/// Sonora - radio playlist generator
use clap::Parser;
use sonora_cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sonora_cli=info,sonora_core=info,sonora_server_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    sonora_cli::run(cli, &mut stdout).await?;

    Ok(())
}
