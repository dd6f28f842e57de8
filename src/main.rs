use std::sync::Arc;

use marquee::{AppState, MovieCatalog, config::Config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,marquee=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(
        &config.database_url,
        config.db_max_connections,
        config.db_connect_timeout,
    )
    .await?;
    let catalog = MovieCatalog::new(db.clone());

    let connected = catalog.check_connection().await;
    if let Some(err) = connected.error() {
        anyhow::bail!("database unreachable: {err}");
    }

    let state = Arc::new(AppState { catalog });
    let app = marquee::app(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    db.close().await?;
    tracing::info!("shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
    }
}
