//! Sign-up command implementation.

use anyhow::{Context, Result};
use clap::Args;

use vigil_core::SignUp;

use crate::config::ServiceOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct SignUpArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Display name shown on your prayers
    #[arg(long)]
    pub name: String,
}

pub async fn run(args: SignUpArgs, options: &ServiceOptions) -> Result<()> {
    let app = session::init(options).await?;

    let signup = SignUp::new(&args.email, &args.password, &args.name);
    app.manager
        .sign_up(&signup)
        .await
        .context("Failed to create account")?;

    output::success("Account created");
    println!();
    output::field("Email", &args.email);
    println!("Check your inbox for email verification, then run 'vigil account sign-in'.");

    Ok(())
}
