//! Guest-mode command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::config::ServiceOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct GuestArgs {}

pub async fn run(_args: GuestArgs, options: &ServiceOptions) -> Result<()> {
    let app = session::init(options).await?;

    app.manager
        .enter_guest_mode()
        .await
        .context("Failed to enter guest mode")?;

    output::success("Browsing as guest");
    println!("Your prayers stay on this device until you create an account.");

    Ok(())
}
