//! pos-api server: loads configuration, selects the storage backend and serves
//! the HTTP API until interrupted.

use pos_api::{app, ensure_schema, store, AppState, Backend, Config, ConfigError, Seed};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pos_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().inspect_err(|e| tracing::error!("failed to load config: {e}"))?;
    let state = build_state(&config).await?;

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(backend = ?config.backend, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    match config.backend {
        Backend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::MissingDatabaseUrl)?;
            let pool = store::connect(url, config.max_connections)
                .await
                .inspect_err(|e| tracing::error!("failed to connect database: {e}"))?;
            ensure_schema(&pool).await?;
            Ok(AppState::postgres(pool, config.openapi_path.clone()))
        }
        Backend::Memory => match &config.seed_path {
            Some(path) => {
                let seed: Seed = serde_json::from_slice(&tokio::fs::read(path).await?)?;
                tracing::info!(
                    products = seed.products.len(),
                    categories = seed.categories.len(),
                    "seeding memory store from {}",
                    path.display()
                );
                Ok(AppState::seeded(seed, config.openapi_path.clone())?)
            }
            None => Ok(AppState::in_memory(config.openapi_path.clone())),
        },
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("ctrl-c handler unavailable: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}
