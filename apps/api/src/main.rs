mod config;
mod conversion;
mod errors;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::conversion::assemble::default_page_config;
use crate::conversion::logo::load_logo;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Formatter API v{}", env!("CARGO_PKG_VERSION"));

    // The logo is a required asset; without it no CV can be produced.
    let logo = load_logo(&config.logo_path)?;

    let page_config = default_page_config();
    info!(
        "Page config: {}\" x {}\", {} {}pt",
        page_config.page_width_in,
        page_config.page_height_in,
        page_config.body_font,
        page_config.body_font_size_pt
    );

    let state = AppState {
        config: config.clone(),
        logo: Arc::new(logo),
        page_config: Arc::new(page_config),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the form's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
