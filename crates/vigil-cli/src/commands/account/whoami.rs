//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use vigil_core::IdentityMode;

use crate::config::ServiceOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, options: &ServiceOptions) -> Result<()> {
    let app = session::init(options).await?;

    let mode = app
        .manager
        .resolve()
        .await
        .context("Failed to resolve identity")?;

    match mode {
        IdentityMode::Unauthenticated => {
            eprintln!("{}", "Not signed in.".dimmed());
        }
        IdentityMode::Guest => {
            output::field("Mode", "guest");
            println!("Prayers are stored on this device only.");
        }
        IdentityMode::Authenticated {
            user_id,
            organization_id,
        } => {
            output::field("Mode", "authenticated");
            output::field("User", user_id.as_str());
            match organization_id {
                Some(org) => output::field("Organization", org.as_str()),
                None => output::field("Organization", "none"),
            }
        }
    }

    Ok(())
}
