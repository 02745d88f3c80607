//! Feed command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use vigil_feed::{FeedCache, FeedKey, FeedQuery};

use crate::backend::AppBackend;
use crate::config::ServiceOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Walk pagination to the end instead of the first page
    #[arg(long)]
    pub all: bool,

    /// Output records as JSON instead of cards
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: FeedArgs, options: &ServiceOptions) -> Result<()> {
    let app = session::init(options).await?;

    let mode = app
        .manager
        .resolve()
        .await
        .context("Failed to resolve identity")?;

    let backend = AppBackend::for_mode(&mode, &app.manager, &app.kv).context(
        "No active session. Run 'vigil account sign-in' or 'vigil account guest' first.",
    )?;

    let query = FeedQuery::new(backend, FeedKey::for_mode(&mode), FeedCache::new());

    query.next_page().await.context("Failed to fetch feed")?;
    if args.all {
        while query.has_next() {
            query.next_page().await.context("Failed to fetch feed")?;
        }
    }

    let prayers = query.prayers();

    if prayers.is_empty() {
        eprintln!("{}", "No prayers yet. Be the first!".dimmed());
        return Ok(());
    }

    for prayer in &prayers {
        if args.json {
            output::json(prayer)?;
        } else {
            output::prayer_card(prayer);
        }
    }

    if !args.all && query.has_next() {
        eprintln!("{}", "More available; pass --all to fetch everything.".dimmed());
    }

    Ok(())
}
