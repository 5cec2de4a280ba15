use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "registrar")]
#[command(about = "Query and update domains through the reseller API")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "registrar.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Show the full domain record
    Domain { name: String },
    /// Show the four contact roles
    Contacts { name: String },
    /// Show the registrar lock state
    IsLocked { name: String },
    Lock { name: String },
    Unlock { name: String },
    /// Show the auto-renew state
    IsAutoRenew { name: String },
    EnableAutoRenew { name: String },
    DisableAutoRenew { name: String },
    Nameservers { name: String },
    Created { name: String },
}
