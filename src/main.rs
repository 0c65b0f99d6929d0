use anyhow::Result;
use clap::{Parser, Subcommand};
use hublink_api::AppState;
use hublink_config::Config;
use hublink_store::MemoryStore;
use std::{path::PathBuf, sync::Arc};

#[derive(Parser, Debug)]
#[command(name = "hublink", about = "hublink — OAuth2 integration hub")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the integration server.
    Serve {
        /// Path to the YAML configuration file.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Override the listening port (default: 8000).
        #[arg(short, long)]
        port: Option<u16>,
        /// Override the listening address (default: 127.0.0.1).
        #[arg(long)]
        host: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port, host } => cmd_serve(config, port, host).await,
    }
}

async fn cmd_serve(
    config_path: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
) -> Result<()> {
    let mut config = if let Some(path) = &config_path {
        Config::from_file(path).map_err(|e| anyhow::anyhow!("config error: {e}"))?
    } else {
        Config::default()
    };

    if let Some(p) = port {
        config.port = p;
    }
    if let Some(h) = host {
        config.host = h;
    }

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, Arc::new(MemoryStore::new()));
    let app = hublink_api::make_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("hublink listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
