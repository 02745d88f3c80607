//! Sign-in command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use vigil_core::Credentials;

use crate::config::ServiceOptions;
use crate::output;
use crate::session::{self, storage};

#[derive(Args, Debug)]
pub struct SignInArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: SignInArgs, options: &ServiceOptions) -> Result<()> {
    let app = session::init(options).await?;

    eprintln!("{}", "Signing in...".dimmed());

    let credentials = Credentials::new(&args.email, &args.password);
    let mode = app
        .manager
        .sign_in(&credentials)
        .await
        .context("Failed to sign in")?;

    let session = app
        .manager
        .auth()
        .session()
        .context("No session after sign-in")?;
    storage::save_session(&session)
        .await
        .context("Failed to save session")?;

    output::success("Signed in");
    println!();
    output::field("User", session.user_id().as_str());
    match mode.organization_id() {
        Some(org) => output::field("Organization", org.as_str()),
        None => {
            println!("Not part of an organization yet. Join one with 'vigil account join --code <CODE>'.");
        }
    }

    Ok(())
}
