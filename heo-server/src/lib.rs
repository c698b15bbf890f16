//! REST service for simulated Himalayan earth-observation indicators.
//!
//! Every answer is generated on request from the deterministic simulator;
//! nothing is stored. When NASA credentials and live data are configured,
//! readings are additionally checked for data availability in CMR.

pub mod config;
pub mod error;
pub mod nasa;
pub mod routes;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use config::ServeArgs;
use heo_core::{glof::GlofLake, story::StoryRecord};
use heo_data::Simulator;
use heo_utils::years::YearBounds;
use log::info;
use nasa::NasaClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    simulator: Simulator,
    bounds: YearBounds,
    delay: Option<Duration>,
    nasa: NasaClient,
    stories: Arc<Vec<StoryRecord>>,
    lakes: Arc<Vec<GlofLake>>,
}

impl AppState {
    pub fn from_args(args: &ServeArgs) -> anyhow::Result<Self> {
        let stories = StoryRecord::get_story_vector().context("loading bundled stories")?;
        let lakes = GlofLake::get_glof_lake_vector().context("loading bundled GLOF lakes")?;
        Ok(Self {
            simulator: args.seed.map(Simulator::with_seed).unwrap_or_default(),
            bounds: args.bounds()?,
            delay: args.delay(),
            nasa: NasaClient::from_args(args)?,
            stories: Arc::new(stories),
            lakes: Arc::new(lakes),
        })
    }

    async fn simulate_latency(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(routes::healthz))
        .route(
            "/api/environmental/readings/:indicator/:year",
            get(routes::reading),
        )
        .route("/api/environmental/summary", get(routes::summary))
        .route(
            "/api/environmental/compare/temporal",
            get(routes::compare_temporal),
        )
        .route("/api/environmental/trends/:indicator", get(routes::trends))
        .route("/api/environmental/indicators", get(routes::indicators))
        .route(
            "/api/environmental/export/:indicator/:year",
            get(routes::export_report),
        )
        .route("/api/stories", get(routes::stories))
        .route("/api/glof/lakes", get(routes::glof_lakes))
        .route("/api/nasa/status", get(routes::nasa_status))
        .route("/api/nasa/layers", get(routes::nasa_layers))
        .route(
            "/api/satellite/image_url",
            get(routes::satellite_image_url),
        )
        .route("/api/satellite/image", get(routes::satellite_image))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve on an already bound listener until the process stops.
pub async fn serve_on(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    info!("HEO service listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

pub async fn serve(args: &ServeArgs) -> anyhow::Result<()> {
    let state = AppState::from_args(args)?;
    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    serve_on(listener, state).await
}
