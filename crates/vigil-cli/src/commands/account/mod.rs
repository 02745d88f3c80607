//! Account subcommand implementations.

mod guest;
mod join;
mod sign_in;
mod sign_out;
mod sign_up;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::ServiceOptions;

#[derive(Args, Debug)]
pub struct AccountCommand {
    #[command(subcommand)]
    pub command: AccountSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AccountSubcommand {
    /// Create a new account
    SignUp(sign_up::SignUpArgs),

    /// Sign in and persist the session
    SignIn(sign_in::SignInArgs),

    /// Sign out and clear local session state
    SignOut(sign_out::SignOutArgs),

    /// Continue as a guest without an account
    Guest(guest::GuestArgs),

    /// Join an organization with an invite code
    Join(join::JoinArgs),

    /// Display the resolved identity
    Whoami(whoami::WhoamiArgs),
}

pub async fn handle(cmd: AccountCommand, options: &ServiceOptions) -> Result<()> {
    match cmd.command {
        AccountSubcommand::SignUp(args) => sign_up::run(args, options).await,
        AccountSubcommand::SignIn(args) => sign_in::run(args, options).await,
        AccountSubcommand::SignOut(args) => sign_out::run(args, options).await,
        AccountSubcommand::Guest(args) => guest::run(args, options).await,
        AccountSubcommand::Join(args) => join::run(args, options).await,
        AccountSubcommand::Whoami(args) => whoami::run(args, options).await,
    }
}
