use anyhow::Context;
use blog_api::api::{create_router, AppState};
use blog_api::config::AppConfig;
use blog_api::infrastructure::database;
use blog_api::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    telemetry::init_tracing(config.log_format);

    let (state, pool) = match &config.database {
        Some(db_config) => {
            let pool = database::connect(db_config)
                .await
                .context("failed to connect to database")?;

            if db_config.run_migrations {
                database::run_migrations(&pool)
                    .await
                    .context("failed to run migrations")?;
            }

            (AppState::postgres(pool.clone()), Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            (AppState::in_memory(), None)
        }
    };

    let app = create_router(state.with_posts_page_limit(config.posts_page_limit));

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    if let Some(pool) = pool {
        tracing::info!("Closing database pool");
        pool.close().await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
