mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use platform_authz::{Action, Authority, EditionType, actions_for};
use platform_obs::{ObsConfig, init_tracing};
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "authority", version, about = "Editorial authority decisions")]
struct Cli {
    /// Directory fixture (JSON); overrides AUTHORITY_FIXTURE.
    #[arg(long, global = true, value_name = "FILE")]
    fixture: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide one action for an actor on an edition.
    Check {
        #[arg(long)]
        actor: Uuid,
        #[arg(long)]
        edition: Uuid,
        #[arg(long)]
        action: String,
    },
    /// Print the decision for every action.
    Matrix {
        #[arg(long)]
        actor: Uuid,
        #[arg(long)]
        edition: Uuid,
    },
    /// List the actions catalogued for an edition type.
    Actions {
        #[arg(long = "type", value_name = "EDITION_TYPE")]
        edition_type: EditionType,
    },
    /// Decide whether an actor may create editions of a type.
    Create {
        #[arg(long)]
        actor: Uuid,
        #[arg(long = "type", value_name = "EDITION_TYPE")]
        edition_type: EditionType,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?.with_fixture(cli.fixture);
    init_tracing(
        ObsConfig::default()
            .with_filter(config.log_filter.clone())
            .with_otlp_endpoint(config.otlp_endpoint.clone()),
    )?;

    match cli.command {
        Command::Actions { edition_type } => {
            for action in actions_for(edition_type) {
                println!("{action}");
            }
            Ok(())
        }
        Command::Check {
            actor,
            edition,
            action,
        } => check(&config, actor, edition, &action).await,
        Command::Matrix { actor, edition } => matrix(&config, actor, edition).await,
        Command::Create {
            actor,
            edition_type,
        } => create(&config, actor, edition_type).await,
    }
}

fn verdict(allowed: bool) -> &'static str {
    if allowed { "allowed" } else { "denied" }
}

async fn check(config: &AppConfig, actor: Uuid, edition: Uuid, action: &str) -> Result<()> {
    let authority = Authority::new(config.load_directory()?);
    let allowed = authority.authorize_named(actor, edition, action).await?;
    println!("{}", verdict(allowed));
    Ok(())
}

async fn matrix(config: &AppConfig, actor: Uuid, edition: Uuid) -> Result<()> {
    let authority = Authority::new(config.load_directory()?);
    let loaded = authority.load_edition(edition).await?;
    let permitted = authority.permitted(actor, edition).await?;
    info!(edition_type = %loaded.edition_type(), "evaluating catalogue");
    for action in authority.actions_for(loaded.edition_type()) {
        println!("{:<24} {}", action.as_str(), verdict(permitted.contains(action)));
    }
    Ok(())
}

async fn create(config: &AppConfig, actor: Uuid, edition_type: EditionType) -> Result<()> {
    let authority = Authority::new(config.load_directory()?);
    let allowed = authority.can_create(actor, edition_type).await?;
    println!("{} {}", Action::Create, verdict(allowed));
    Ok(())
}
