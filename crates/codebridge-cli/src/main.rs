use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codebridge_application::{Studio, StudioOptions};
use codebridge_core::config::{AppConfig, SecretService};
use codebridge_core::{Concept, Language};
use codebridge_infrastructure::{CodebridgePaths, ConfigStorage, SecretServiceImpl};
use codebridge_interaction::HttpApiClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;
mod repl;

#[derive(Parser)]
#[command(name = "codebridge")]
#[command(about = "CodeBridge - learn programming concepts through real-world code", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the CodeBridge server
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Configuration directory (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Teaching language (python, javascript, java, cpp)
    #[arg(long, global = true)]
    language: Option<Language>,

    /// Selected concept, e.g. if-else, loops, oops
    #[arg(long, global = true)]
    concept: Option<String>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive studio
    Studio,
    /// Execute a source file on the server
    Run { file: PathBuf },
    /// Ask the assistant a question
    Ask {
        question: String,
        /// Send this file as the code context
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Analyze the complexity of a source file
    Analyze { file: PathBuf },
    /// Show the built-in example of a concept
    Example { concept: String },
    /// Show the real-world counterpart of a source file
    Realworld { file: PathBuf },
    /// Check the assistant key and login status
    Status,
    /// Write the current settings to config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Settings assembled from the config file, the environment and flags.
struct Settings {
    config: AppConfig,
    paths: CodebridgePaths,
    storage: ConfigStorage,
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let paths = CodebridgePaths::new(cli.config.as_deref());
    let config_file = paths
        .config_file()
        .context("Failed to resolve the config file location")?;
    let storage = ConfigStorage::with_path(config_file.clone());
    let mut config = storage
        .load()
        .with_context(|| format!("Failed to load {}", config_file.display()))?
        .with_env_overrides();

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(language) = cli.language {
        config.defaults.language = language;
    }
    if let Some(concept) = &cli.concept {
        config.defaults.concept = Concept::new(concept);
    }
    tracing::debug!("[Cli] Using server {}", config.api.base_url);

    Ok(Settings {
        config,
        paths,
        storage,
    })
}

fn build_studio(settings: &Settings) -> Result<Studio> {
    let api = HttpApiClient::new(&settings.config.api)?;
    let secrets: Option<Arc<dyn SecretService>> = match settings.paths.secret_file() {
        Ok(path) => Some(Arc::new(SecretServiceImpl::with_path(path))),
        Err(err) => {
            tracing::warn!("[Cli] No secret file location: {}", err);
            None
        }
    };

    let studio = Studio::new(
        Arc::new(api),
        StudioOptions {
            config: settings.config.clone(),
            secrets,
            ..StudioOptions::default()
        },
    );
    studio.mount()?;
    Ok(studio)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let settings = load_settings(&cli)?;

    match &cli.command {
        Commands::Example { concept } => {
            commands::example::show(&settings.config, &Concept::new(concept))?
        }
        Commands::Studio => repl::run(build_studio(&settings)?).await?,
        Commands::Run { file } => commands::run::execute(&build_studio(&settings)?, file).await?,
        Commands::Ask { question, file } => {
            commands::ask::ask(&build_studio(&settings)?, question, file.as_deref()).await?
        }
        Commands::Analyze { file } => {
            commands::analyze::analyze(&build_studio(&settings)?, file).await?
        }
        Commands::Realworld { file } => {
            commands::realworld::show(&build_studio(&settings)?, file).await?
        }
        Commands::Status => commands::status::check(&build_studio(&settings)?).await?,
        Commands::Init { force } => {
            commands::init::write_config(&settings.storage, &settings.config, *force)?
        }
    }

    Ok(())
}
