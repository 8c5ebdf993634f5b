use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codenote_api::config::ServerConfig;
use codenote_api::router::build_app_router;
use codenote_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {e}"));
    let addr = config.bind_addr();
    let shutdown_timeout = config.shutdown_timeout;

    let pool = codenote_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    codenote_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    codenote_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!(max_connections = config.db_max_connections, "Database ready");

    let app = build_app_router(AppState {
        pool: pool.clone(),
        config: Arc::new(config),
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "codenote API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // In-flight requests have drained; give the pool a bounded window to
    // close its connections.
    if tokio::time::timeout(shutdown_timeout, pool.close()).await.is_err() {
        tracing::warn!(
            timeout_secs = shutdown_timeout.as_secs(),
            "Database pool did not close in time"
        );
    }
    tracing::info!("Shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codenote_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("SIGINT received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
