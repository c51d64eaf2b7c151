use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::chart::{render_svg, ChartConfig};

use super::api::{compute_windows, ApiError, ApiResult};
use super::server::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub satellite: String,
    pub station: String,
    pub duration_hours: f64,
    pub chart_svg: String,
    pub windows: Vec<WindowRow>,
}

pub struct WindowRow {
    pub start: String,
    pub end: String,
    pub minutes: i64,
}

pub async fn dashboard(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let (series, windows) = compute_windows(&state, None, None)?;

    let chart_svg = render_svg(
        &series,
        &windows,
        &ChartConfig {
            title: state.satellite.name.clone(),
            ..ChartConfig::default()
        },
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    let rows = windows
        .iter()
        .map(|w| WindowRow {
            start: w.start.format("%Y-%m-%d %H:%M").to_string(),
            end: w.end.format("%H:%M").to_string(),
            minutes: w.duration().num_minutes(),
        })
        .collect();

    Ok(DashboardTemplate {
        satellite: state.satellite.name.clone(),
        station: state
            .config
            .station
            .name
            .clone()
            .unwrap_or_else(|| state.config.station.coordinates.clone()),
        duration_hours: state.config.predict.duration_hours,
        chart_svg,
        windows: rows,
    })
}
