use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::api_client::ApiClient;
use crate::commands::app_command;
use crate::config::ClientConfig;
use crate::context::{CmdContext, GlobalOptions};
use crate::prompt::TerminalPrompter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// App to operate on
    #[arg(short = 'a', long, global = true, env = "HANGAR_APP")]
    app: Option<String>,

    /// Path to an app config file or a directory containing hangar.toml
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Print structured output as JSON
    #[arg(short = 'j', long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage apps
    #[command(subcommand, alias = "app")]
    Apps(AppsCommand),
}

#[derive(Subcommand, Debug)]
pub enum AppsCommand {
    /// List all apps
    List,

    /// Create a new app
    Create(CreateArgs),

    /// Permanently destroy an app
    Destroy(DestroyArgs),

    /// Move an app to another organization
    Move(MoveArgs),

    /// Pause the selected app
    Pause,

    /// Resume the selected app
    Resume,

    /// Restart the selected app
    Restart,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateArgs {
    /// Name of the app
    pub app_name: Option<String>,

    /// The app name to use
    #[arg(long)]
    pub name: Option<String>,

    /// The organization that will own the app
    #[arg(long)]
    pub org: Option<String>,

    /// Internal port on application to connect to external services
    #[arg(short, long)]
    pub port: Option<String>,

    /// The Cloud Native Buildpacks builder to use when deploying the app
    #[arg(long)]
    pub builder: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DestroyArgs {
    /// Name of the app
    pub app_name: String,

    /// Accept all confirmations
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MoveArgs {
    /// Name of the app
    pub app_name: String,

    /// Accept all confirmations
    #[arg(short, long)]
    pub yes: bool,

    /// The organization to move the app to
    #[arg(long)]
    pub org: Option<String>,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().context("Could not determine working directory")?;
    let client = ApiClient::new(ClientConfig::load()?)?;

    let options = GlobalOptions {
        app_name: cli.app,
        config_path: cli.config,
        json: cli.json,
    };
    let mut ctx = CmdContext::new(
        Arc::new(client),
        Arc::new(TerminalPrompter::default()),
        Box::new(std::io::stdout()),
        Box::new(std::io::stderr()),
        options,
        working_dir,
    );

    match cli.command {
        Commands::Apps(command) => app_command::dispatch(&mut ctx, command).await?,
    }

    Ok(())
}
