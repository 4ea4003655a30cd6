mod admin;
mod affiliate;
mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod form_state;
mod llm_client;
mod models;
mod notify;
mod payments;
mod reports;
mod routes;
mod state;
#[cfg(test)]
mod testing;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::admin::dashboards::Dashboards;
use crate::admin::store::PgAdminStore;
use crate::auth::SessionVerifier;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::notify::LogNotifier;
use crate::payments::verifier_from_config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(config.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    info!("Starting CareerPath API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url, config.db_max_connections).await?;
    let store = PgAdminStore::new(db, config.db_rls_role.clone());

    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let payments = verifier_from_config(&config.payment)?;

    let state = AppState {
        llm: Arc::new(llm),
        store: Arc::new(store),
        sessions: Arc::new(SessionVerifier::new(&config.session)),
        payments,
        notifier: Arc::new(LogNotifier),
        dashboards: Dashboards::sample(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
