//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::account::AccountCommand;
use crate::commands::feed::FeedArgs;
use crate::commands::post::PostArgs;
use crate::config::ServiceOptions;

/// Prayer feed client.
#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Service base URL (or VIGIL_SERVICE_URL)
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Publishable service API key (or VIGIL_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            service_url: self.service_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account and session operations
    Account(AccountCommand),

    /// Browse the prayer feed for the current identity
    Feed(FeedArgs),

    /// Post a new prayer request
    Post(PostArgs),
}
