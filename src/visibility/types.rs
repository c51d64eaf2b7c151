use chrono::{DateTime, Local};
use serde::Serialize;
use utoipa::ToSchema;

/// Propagation result for one sample instant.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Observation {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
    pub sunlit: bool,
}

/// Index-aligned sample instants and their observations, ordered by time.
///
/// Instants carry the observer's local clock, which is also the clock the
/// chart axis and pass annotations are rendered in.
#[derive(Debug, Clone, Default)]
pub struct SampleSeries {
    pub instants: Vec<DateTime<Local>>,
    pub observations: Vec<Observation>,
}

impl SampleSeries {
    pub fn new(instants: Vec<DateTime<Local>>, observations: Vec<Observation>) -> Self {
        Self {
            instants,
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }
}

/// One contiguous visible pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct VisibilityWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl VisibilityWindow {
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}
