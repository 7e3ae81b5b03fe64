pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod services;
pub mod state;

use std::path::Path;
use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
pub use cli::Cli;
use cli::{AccountCommands, Commands, FriendsCommands};
pub use config::{Config, LogFormat};
use db::Store;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::load(path)?;
    config.validate()?;
    Ok(config)
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve { ephemeral: false }) {
        Commands::Serve { ephemeral } => run_server(config, ephemeral).await,

        Commands::Init => {
            if Config::init_default()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }

        Commands::Account { command } => {
            let state = SharedState::new(config).await?;
            match command {
                AccountCommands::Create { username, password } => {
                    cli::cmd_account_create(&state, &username, &password).await
                }
                AccountCommands::List => cli::cmd_account_list(&state).await,
                AccountCommands::Show { username } => {
                    cli::cmd_account_show(&state, &username).await
                }
                AccountCommands::Disable { username } => {
                    cli::cmd_account_disable(&state, &username).await
                }
                AccountCommands::Delete { username } => {
                    cli::cmd_account_delete(&state, &username).await
                }
                AccountCommands::Verify { username, password } => {
                    cli::cmd_account_verify(&state, &username, &password).await
                }
            }
        }

        Commands::Friends { command } => {
            let state = SharedState::new(config).await?;
            match command {
                FriendsCommands::List { user_id } => cli::cmd_friends_list(&state, &user_id).await,
                FriendsCommands::Incoming { user_id } => {
                    cli::cmd_friends_incoming(&state, &user_id).await
                }
            }
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.logging.format == LogFormat::Json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {e}");
    }
}

async fn run_server(config: Config, ephemeral: bool) -> anyhow::Result<()> {
    info!("Rapport v{} starting...", env!("CARGO_PKG_VERSION"));

    let prometheus_handle = if config.metrics.enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let shared = if ephemeral {
        info!("Using ephemeral in-memory database");
        SharedState::with_store(config.clone(), Store::in_memory().await?)
    } else {
        SharedState::new(config.clone()).await?
    };

    let state = api::create_app_state(Arc::new(shared), prometheus_handle);
    let app = api::router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
