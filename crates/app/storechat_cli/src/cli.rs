use clap::{Args, Parser, Subcommand};
use url::Url;

/// Storefront chat assistant in the terminal.
#[derive(Parser, Debug)]
#[command(name = "storechat", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat(ChatArgs),

    /// Print the canned reply for a single message
    Ask {
        /// Message text (words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Print the version
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct ChatArgs {
    /// Base URL of the external price/negotiation backend; enables remote replies.
    /// Overrides `STORECHAT_BACKEND_URL`.
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Page the widget is embedded in (remote mode).
    #[arg(long, default_value = "http://localhost:3000/")]
    pub page_url: Url,

    /// Visit Notifier route to report the page visit to (remote mode).
    #[arg(long)]
    pub notifier_url: Option<Url>,

    /// Referrer reported with the page visit.
    #[arg(long, default_value = "")]
    pub referrer: String,

    /// Upper bound on each backend call, in seconds (at least 1).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Canned reply delay as `MIN-MAX` milliseconds (or a single value).
    #[arg(long)]
    pub delay_ms: Option<String>,
}
