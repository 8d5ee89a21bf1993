//! services/frontend/src/bin/frontend.rs

use frontend_lib::{
    adapters::{HttpBackendAdapter, MemorySessionStore},
    config::Config,
    error::ApiError,
    web::{router, AppState},
};
use flixr_core::ports::SessionStore;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let http_client = reqwest::Client::builder().build()?;
    let backend = Arc::new(HttpBackendAdapter::new(http_client, config.backend_url.clone()));
    info!("Forwarding to backend at {}", config.backend_url);

    let sessions = Arc::new(MemorySessionStore::new());

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        backend,
        sessions: sessions.clone(),
        config: config.clone(),
    });

    // --- 4. Sweep Expired Sessions in the Background ---
    let shutdown = CancellationToken::new();
    let sweeper = tokio::spawn(sweep_sessions(
        sessions,
        config.session_sweep_interval,
        shutdown.clone(),
    ));

    // --- 5. Create the Web Router ---
    let app = router(app_state);

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown.cancel();
    if let Err(e) = sweeper.await {
        error!("Session sweeper ended abnormally: {}", e);
    }
    info!("Server stopped");

    Ok(())
}

async fn sweep_sessions(
    sessions: Arc<MemorySessionStore>,
    every: std::time::Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(every);
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => info!("Purged {} expired sessions", purged),
                Err(e) => error!("Failed to purge sessions: {}", e),
            },
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
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
}
