use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::predict::{predict_series, PredictError, Sgp4Propagator};
use crate::visibility::{minute_instants, visible_windows, SampleSeries, VisibilityWindow};

use super::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PassesQuery {
    #[serde(default)]
    pub duration_hours: Option<f64>,
    #[serde(default)]
    pub elevation_bias_deg: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PassesResponse {
    pub satellite: String,
    pub window_count: usize,
    pub windows: Vec<VisibilityWindow>,
}

pub enum ApiError {
    Validation(String),
    Predict(PredictError),
    Internal(String),
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        ApiError::Predict(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::Predict(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message(
                    "prediction_failed",
                    &e.to_string(),
                )),
            )
                .into_response(),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message("internal_error", &msg)),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/passes",
    tag = "passes",
    params(
        ("duration_hours" = Option<f64>, Query, description = "Look-ahead window in hours (defaults to the configured value)"),
        ("elevation_bias_deg" = Option<f64>, Query, description = "Degrees added to every raw elevation before thresholding")
    ),
    responses(
        (status = 200, description = "Visible pass windows", body = PassesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Propagation failure", body = ErrorResponse)
    )
)]
pub async fn list_passes(
    State(state): State<AppState>,
    Query(query): Query<PassesQuery>,
) -> ApiResult<impl IntoResponse> {
    let (series, windows) = compute_windows(&state, query.duration_hours, query.elevation_bias_deg)?;
    log::info!(
        "predicted {} visible windows over {} samples",
        windows.len(),
        series.len()
    );

    Ok((
        StatusCode::OK,
        Json(PassesResponse {
            satellite: state.satellite.name.clone(),
            window_count: windows.len(),
            windows,
        }),
    ))
}

/// Shared prediction path for the API and the dashboard.
pub fn compute_windows(
    state: &AppState,
    duration_hours: Option<f64>,
    elevation_bias_deg: Option<f64>,
) -> ApiResult<(SampleSeries, Vec<VisibilityWindow>)> {
    let duration = duration_hours.unwrap_or(state.config.predict.duration_hours);
    if !duration.is_finite() || duration <= 0.0 {
        return Err(ApiError::Validation(
            "duration_hours must be positive".into(),
        ));
    }
    let bias = elevation_bias_deg.unwrap_or(state.config.predict.elevation_bias_deg);

    let instants = minute_instants(duration);
    let propagator = Sgp4Propagator::new(&state.satellite, state.observer);
    let series = predict_series(&propagator, &instants)?;
    let windows = visible_windows(&series, bias).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((series, windows))
}
