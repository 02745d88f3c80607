//! Post command implementation.

use anyhow::{Context, Result};
use clap::Args;

use vigil_core::{IdentityMode, UserId};
use vigil_feed::{FeedCache, FeedKey, Submission};

use crate::backend::AppBackend;
use crate::config::ServiceOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct PostArgs {
    /// The prayer request text
    pub content: String,

    /// Hide your name on this prayer
    #[arg(long)]
    pub anonymous: bool,
}

pub async fn run(args: PostArgs, options: &ServiceOptions) -> Result<()> {
    let app = session::init(options).await?;

    let mode = app
        .manager
        .resolve()
        .await
        .context("Failed to resolve identity")?;

    let backend = AppBackend::for_mode(&mode, &app.manager, &app.kv).context(
        "No active session. Run 'vigil account sign-in' or 'vigil account guest' first.",
    )?;

    let author = match &mode {
        IdentityMode::Guest => UserId::guest(),
        _ => mode
            .user_id()
            .cloned()
            .context("No author identity available")?,
    };

    let submission = Submission::new(
        backend,
        FeedKey::for_mode(&mode),
        FeedCache::new(),
        author,
    );

    let prayer = submission
        .submit(&args.content, args.anonymous)
        .await
        .context("Failed to post prayer")?;

    output::success("Prayer posted");
    println!();
    output::field("Id", prayer.id.as_str());
    if mode.is_guest() {
        println!("Stored on this device. Create an account to share with a community.");
    }

    Ok(())
}
