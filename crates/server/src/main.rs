//! Cofre server binary.

use anyhow::{Context, Result};
use clap::Parser;
use cofre_core::config::AppConfig;
use cofre_server::{AppState, create_router, spawn_sweep_scheduler};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Cofre - A family finance record server
#[derive(Parser, Debug)]
#[command(name = "cofred")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "COFRE_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup banner
    tracing::info!("Cofre v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    if config_path.exists() {
        figment = figment.merge(Toml::file(config_path));
        tracing::info!(path = %config_path.display(), "Loaded configuration file");
    } else {
        tracing::info!(
            path = %config_path.display(),
            "Configuration file not found, using environment and defaults"
        );
    }
    let config: AppConfig = figment
        .merge(Env::prefixed("COFRE_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Create record store
    let metadata = cofre_metadata::from_config(&config.metadata)
        .await
        .context("failed to create record store")?;
    tracing::info!("Record store ready");

    let bind = config.server.bind.clone();
    let sweep_enabled = config.retention.sweep_enabled;
    let state = AppState::new(config, metadata);

    // Background retention sweep
    let _sweep_handle = if sweep_enabled {
        tracing::info!(
            interval_secs = state.config.retention.sweep_interval_secs,
            retention_days = state.config.retention.days,
            "Retention sweep scheduler enabled"
        );
        Some(spawn_sweep_scheduler(state.clone()))
    } else {
        tracing::info!("Retention sweep scheduler disabled; use POST /v1/admin/sweep");
        None
    };

    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(%bind, "Listening");

    axum::serve(listener, router)
        .await
        .context("server error")?;

    Ok(())
}
