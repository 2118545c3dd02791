//! Storechat server binary.
//!
//! Serves the Visit Notifier route that the chat widget posts to on page load.

use clap::Parser;
use storechat_api::config::ApiConfig;
use tracing::info;

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "storechat_server", about = "Storechat visit notifier server")]
struct Args {
    /// Address to listen on (port 0 = ephemeral). Overrides `BIND_ADDR`.
    #[arg(long)]
    bind_addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,storechat_api=debug,storechat_core=debug",
                )
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    if let Some(bind_addr) = args.bind_addr {
        config.bind_addr = bind_addr;
    }

    let app = storechat_api::router();

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "visit notifier listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
