mod config;
mod errors;
mod models;
mod profile;
mod resume;
mod routes;
mod state;
mod upstream;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::resume::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::upstream::HttpProfileApi;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: a missing PROFILE_API_URL aborts startup.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobboard API v{}", env!("CARGO_PKG_VERSION"));

    let profile_api = HttpProfileApi::new(&config.profile_api_url, config.profile_api_timeout_secs)?;
    info!("Profile API client initialized ({})", config.profile_api_url);

    // A4 in points, footer space reserved at the bottom of every page.
    let page_config = default_page_config();
    info!(
        "Resume page config: {}x{}pt, {}pt body text",
        page_config.page_width_pt, page_config.page_height_pt, page_config.font_size_pt
    );

    let state = AppState {
        config: config.clone(),
        profile_api: Arc::new(profile_api),
        page_config,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the marketplace front end

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
