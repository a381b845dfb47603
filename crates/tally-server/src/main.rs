mod config;

use std::sync::Arc;

use tracing::info;

use tally_api::{AppState, AppStateInner};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug,tally_api=debug,tally_db=info,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init database
    let db = tally_db::Database::open(&config.db_path)?;

    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret: config.jwt_secret,
    });

    let app = tally_api::router(state);

    info!("Tally server listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
