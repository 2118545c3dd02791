//! storechat — the storefront chat widget in a terminal.

// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use storechat_core::replies;

mod chat;
mod cli;
mod logging;
mod render;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _logger = logging::init()?;

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let args = Cli::parse();

    match args.command {
        Commands::Chat(chat_args) => chat::run(chat_args).await?,
        Commands::Ask { text } => {
            let text = text.join(" ");
            println!("{}", replies::canned_reply(&text));
        }
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
