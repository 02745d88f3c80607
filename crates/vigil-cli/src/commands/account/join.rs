//! Organization-join command implementation.

use anyhow::{Context, Result};
use clap::Args;

use vigil_core::InviteCode;

use crate::config::ServiceOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct JoinArgs {
    /// Invite code from your community
    #[arg(long)]
    pub code: String,
}

pub async fn run(args: JoinArgs, options: &ServiceOptions) -> Result<()> {
    let app = session::init(options).await?;

    let mode = app
        .manager
        .resolve()
        .await
        .context("Failed to resolve identity")?;
    if !mode.is_authenticated() {
        output::error("Joining needs an account. Run 'vigil account sign-in' first.");
        anyhow::bail!("not signed in");
    }

    let code = InviteCode::new(&args.code).context("Invalid invite code")?;
    let mode = app
        .manager
        .join_organization(&code)
        .await
        .context("Failed to join organization")?;

    output::success("Joined community");
    if let Some(org) = mode.organization_id() {
        println!();
        output::field("Organization", org.as_str());
    }

    Ok(())
}
