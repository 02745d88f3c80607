//! Sign-out command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::config::ServiceOptions;
use crate::output;
use crate::session::{self, storage};

#[derive(Args, Debug)]
pub struct SignOutArgs {
    /// Also delete locally stored guest prayers
    #[arg(long)]
    pub purge_guest: bool,
}

pub async fn run(args: SignOutArgs, options: &ServiceOptions) -> Result<()> {
    let app = session::init(options).await?;

    app.manager.sign_out().await.context("Failed to sign out")?;
    storage::clear_session()
        .await
        .context("Failed to clear stored session")?;

    if args.purge_guest {
        vigil_local::GuestStore::new(app.kv.clone())
            .clear()
            .await
            .context("Failed to clear guest prayers")?;
    }

    output::success("Signed out");

    Ok(())
}
