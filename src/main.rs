mod app;
mod auth;
mod bmi;
mod config;
mod db;
mod error;
mod state;
mod store;

use crate::{app::build_app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "vitali=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let (app_state, pg) = AppState::init().await?;
    tokio::task::spawn_blocking(auth::password::warm_up).await?;

    sqlx::migrate!("./migrations").run(pg.pool()).await?;

    let config = app_state.config.clone();
    let app = build_app(app_state);
    let served = app::serve(app, &config).await;

    pg.pool().close().await;
    tracing::info!("database pool closed");
    served
}
