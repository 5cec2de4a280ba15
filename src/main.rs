use anyhow::Context;
use clap::Parser;
use registrar_client::utils::error::ErrorCategory;
use registrar_client::utils::{logger, validation::Validate};
use registrar_client::{CliArgs, CliCommand, ClientConfig, HttpTransport, RegistrarClient};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(
    client: &RegistrarClient<HttpTransport>,
    command: &CliCommand,
) -> registrar_client::Result<serde_json::Value> {
    let value = match command {
        CliCommand::Domain { name } => {
            serde_json::to_value(client.get_domain_by_name(name).await?)?
        }
        CliCommand::Contacts { name } => {
            serde_json::to_value(client.get_contacts_by_domain_name(name).await?)?
        }
        CliCommand::IsLocked { name } => {
            serde_json::to_value(client.get_is_domain_locked_by_name(name).await?)?
        }
        CliCommand::Lock { name } => {
            serde_json::to_value(client.enable_domain_lock_by_name(name).await?)?
        }
        CliCommand::Unlock { name } => {
            serde_json::to_value(client.disable_domain_lock_by_name(name).await?)?
        }
        CliCommand::IsAutoRenew { name } => {
            serde_json::to_value(client.get_is_domain_auto_renew_by_name(name).await?)?
        }
        CliCommand::EnableAutoRenew { name } => {
            serde_json::to_value(client.enable_domain_auto_renew_by_name(name).await?)?
        }
        CliCommand::DisableAutoRenew { name } => {
            serde_json::to_value(client.disable_domain_auto_renew_by_name(name).await?)?
        }
        CliCommand::Nameservers { name } => {
            serde_json::to_value(client.get_domain_name_servers_by_name(name).await?)?
        }
        CliCommand::Created { name } => {
            serde_json::to_value(client.get_domain_created_date_by_name(name).await?)?
        }
    };
    Ok(value)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = ClientConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if args.json_logs || config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose());
    }
    tracing::debug!("CLI args: {:?}", args);

    config.validate().context("invalid configuration")?;

    let client = RegistrarClient::from_config(&config)?;

    match run(&client, &args.command).await {
        Ok(value) => print_json(&value),
        Err(e) => {
            tracing::error!("{} (category: {:?})", e, e.category());
            eprintln!("❌ {}", e);
            let exit_code = match e.category() {
                ErrorCategory::Remote => 2,
                ErrorCategory::Input => 64,
                ErrorCategory::Transport => 3,
                ErrorCategory::Config => 78,
            };
            std::process::exit(exit_code);
        }
    }
}
