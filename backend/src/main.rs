use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use daycare_backend::config::AppConfig;
use daycare_backend::domain::spawn_expiry_sweeper;
use daycare_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = AppConfig::load()?;

    // Initialize logging; RUST_LOG overrides the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!("Using config from {}", source);

    let app_state = initialize_backend(&config).await?;

    let sweeper = match config.sweep_interval() {
        Some(period) => Some(spawn_expiry_sweeper(
            app_state.announcement_service.clone(),
            period,
        )),
        None => {
            info!("Announcement expiry sweeper disabled");
            None
        }
    };

    let app = create_router(app_state, &config.cors_origin)?;

    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on {}", config.bind_address);

    let served = axum::serve(listener, app).await;

    if let Some(handle) = sweeper {
        handle.abort();
    }
    served?;

    Ok(())
}
