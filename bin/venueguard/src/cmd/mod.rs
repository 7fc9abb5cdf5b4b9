//! Built-in `venueguard` commands.
use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;

use venueguard_auth::AuthorizationGate;
use venueguard_auth::Role;
use venueguard_context::Context;

pub mod check;

/// Verify administrative roles and venue scopes of callers.
#[derive(Debug, Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the VenueGuard configuration to use.
    #[arg(short = 'c', long = "config", default_value_t = String::from("venueguard.yaml"))]
    pub config: String,

    /// Print collected metrics to standard error once the command completes.
    #[arg(long, global = true)]
    pub print_metrics: bool,

    /// Select the venueguard command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Select the venueguard command to run.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Print the claims of a caller as JSON.
    Claims(CallerArgs),

    /// Verify a caller holds at least the given role.
    #[command(alias = "role")]
    CheckRole(CheckRoleArgs),

    /// Verify a caller holds at least the given role and can access a venue.
    #[command(alias = "scope")]
    CheckScope(CheckScopeArgs),

    /// Verify a caller can access a venue, regardless of their role rank.
    #[command(alias = "venue")]
    CheckVenue(CheckVenueArgs),
}

/// Identify the caller to look up.
#[derive(Args, Clone, Debug)]
pub struct CallerArgs {
    /// ID of the caller as known to the identity provider.
    #[arg(long)]
    pub caller: String,
}

/// Arguments for the `check-role` command.
#[derive(Args, Clone, Debug)]
pub struct CheckRoleArgs {
    /// ID of the caller as known to the identity provider.
    #[arg(long)]
    pub caller: String,

    /// Minimum role the caller must hold (defaults to siteAdmin).
    #[arg(long)]
    pub role: Option<Role>,
}

/// Arguments for the `check-scope` command.
#[derive(Args, Clone, Debug)]
pub struct CheckScopeArgs {
    /// ID of the caller as known to the identity provider.
    #[arg(long)]
    pub caller: String,

    /// Minimum role the caller must hold (defaults to siteAdmin).
    #[arg(long)]
    pub role: Option<Role>,

    /// ID of the venue the caller must be able to access.
    #[arg(long)]
    pub venue: String,
}

/// Arguments for the `check-venue` command.
#[derive(Args, Clone, Debug)]
pub struct CheckVenueArgs {
    /// ID of the caller as known to the identity provider.
    #[arg(long)]
    pub caller: String,

    /// ID of the venue the caller must be able to access.
    #[arg(long)]
    pub venue: String,
}

/// Run the selected command against the given gate.
pub async fn run(context: &Context, gate: &AuthorizationGate, command: &Command) -> Result<()> {
    match command {
        Command::Claims(args) => check::claims(context, gate, args).await,
        Command::CheckRole(args) => check::role(context, gate, args).await,
        Command::CheckScope(args) => check::scope(context, gate, args).await,
        Command::CheckVenue(args) => check::venue(context, gate, args).await,
    }
}
