use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use projects::contract::client::ProjectsApi;
use projects::contract::model::{ProjectId, UserId};
use projects::domain::service::{Service, ServiceConfig};
use projects::gateways::local::ProjectsLocalClient;
use projects::infra::events::TracingEventPublisher;
use projects::infra::storage::sea_orm_repo::SeaOrmProjectsRepository;
use projects::ProjectsConfig;
use runtime::{AppConfig, CliArgs};

mod commands;
mod db;
mod dto;

use commands::ProjectCommand;

/// Projects CLI - manage projects and their collaborators
#[derive(Parser)]
#[command(name = "projects-cli")]
#[command(about = "Projects CLI - manage projects and their collaborators")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long, global = true)]
    mock: bool,

    /// Acting user id
    #[arg(short, long, global = true)]
    user: Option<UserId>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration and database connectivity
    Check,
    /// List projects visible to the acting user
    List,
    /// Show one project
    Get { id: ProjectId },
    /// Create a project owned by the acting user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Replace a project's name and description
    Update {
        id: ProjectId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a project
    Delete { id: ProjectId },
    /// Grant a user read access to a project
    Share { id: ProjectId, user_id: UserId },
    /// Revoke a user's read access to a project
    Unshare { id: ProjectId, user_id: UserId },
}

impl Commands {
    fn into_project_command(self) -> Option<ProjectCommand> {
        Some(match self {
            Commands::Check => return None,
            Commands::List => ProjectCommand::List,
            Commands::Get { id } => ProjectCommand::Get { id },
            Commands::Create { name, description } => ProjectCommand::Create { name, description },
            Commands::Update {
                id,
                name,
                description,
            } => ProjectCommand::Update {
                id,
                name,
                description,
            },
            Commands::Delete { id } => ProjectCommand::Delete { id },
            Commands::Share { id, user_id } => ProjectCommand::Share { id, user: user_id },
            Commands::Unshare { id, user_id } => ProjectCommand::Unshare { id, user: user_id },
        })
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let args = CliArgs {
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.home_dir));
    tracing::debug!(home_dir = %config.home_dir, "Projects CLI starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        return Err(anyhow!("No command given; see --help"));
    };

    match command.into_project_command() {
        None => check_config(config).await,
        Some(command) => {
            let user = cli
                .user
                .ok_or_else(|| anyhow!("--user <ID> is required for project commands"))?;
            let api = build_api(&config).await?;
            Ok(commands::execute(api.as_ref(), user, command).await)
        }
    }
}

/// Wire storage, event sink and service behind the public API.
async fn build_api(config: &AppConfig) -> Result<Arc<dyn ProjectsApi>> {
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("No database configured; set `database.url` or pass --mock"))?;
    let conn = db::connect(db_config, Path::new(&config.home_dir)).await?;

    let projects_config = ProjectsConfig::from_module_value(config.module_config("projects"))?;
    let service = Service::new(
        Arc::new(SeaOrmProjectsRepository::new(conn)),
        Arc::new(TracingEventPublisher),
        ServiceConfig::from(&projects_config),
    );

    Ok(Arc::new(ProjectsLocalClient::new(Arc::new(service))))
}

async fn check_config(config: AppConfig) -> Result<ExitCode> {
    tracing::info!("Checking configuration...");

    ProjectsConfig::from_module_value(config.module_config("projects"))?;
    if let Some(db_config) = &config.database {
        db::connect(db_config, Path::new(&config.home_dir)).await?;
    } else {
        tracing::warn!("No database configuration found");
    }

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(ExitCode::SUCCESS)
}
