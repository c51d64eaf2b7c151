use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::predict::{Observer, Satellite};

use super::api;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::ui;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub satellite: Arc<Satellite>,
    pub observer: Observer,
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let satellite = Satellite::from_tle_file(&config.predict.tle_file)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let observer = Observer::from_coordinates(
        &config.station.coordinates,
        Some(config.station.altitude_m),
    )
    .ok_or_else(|| std::io::Error::other("invalid station coordinates"))?;

    log::info!(
        "loaded {} for observer at {}",
        satellite.name,
        config.station.coordinates
    );

    let state = AppState {
        config: Arc::new(config),
        satellite: Arc::new(satellite),
        observer,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(ui::dashboard))
        .route("/api/passes", get(api::list_passes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
