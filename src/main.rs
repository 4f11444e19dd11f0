mod config;
mod error;
mod models;
mod retrieval;
mod routes;
mod transcript;

use anyhow::Context;
use clap::Parser;
use config::Config;
use routes::create_routes;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    let strategy = config.build_strategy();
    tracing::info!(strategy = strategy.name(), "transcript strategy selected");

    let app = create_routes(strategy).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
    );

    tracing::info!("Listening on {}", config.bind);
    axum::Server::try_bind(&config.bind)
        .with_context(|| format!("failed to bind {}", config.bind))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
