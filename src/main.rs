use anyhow::Result;
use clap::Parser;
use prompt_forge::app::App;
use prompt_forge::models::Config;
use prompt_forge::server;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "prompt-forge")]
#[command(about = "Serve the master-prompt generation endpoint")]
struct CliArgs {
    /// Address to listen on.
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:3000")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prompt_forge=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting prompt-forge");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app = Arc::new(App::new(&config));
    let listener = tokio::net::TcpListener::bind(args.listen).await?;

    if let Err(e) = server::serve(listener, app, &config).await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
