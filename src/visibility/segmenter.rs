use chrono::{DateTime, Local};

use super::error::ContractError;
use super::types::{SampleSeries, VisibilityWindow};

/// Extract the visible pass windows from a sampled series.
///
/// A sample counts as visible when its bias-adjusted elevation is above the
/// horizon and the satellite is sunlit. A window opens on the first visible
/// sample and closes on the next sample that is not visible; that sample's
/// instant is the window end. A window still open when the series runs out
/// closes at the last sample's instant.
///
/// The sunlit flag alone stands in for "seen against a dark sky", so a pass
/// in daylight still counts. An empty series yields no windows. A series
/// whose single sample is visible yields one zero-length window.
pub fn visible_windows(
    series: &SampleSeries,
    elevation_bias_deg: f64,
) -> Result<Vec<VisibilityWindow>, ContractError> {
    if series.instants.len() != series.observations.len() {
        return Err(ContractError::LengthMismatch {
            instants: series.instants.len(),
            observations: series.observations.len(),
        });
    }

    let mut windows = Vec::new();
    let mut pending: Option<DateTime<Local>> = None;

    for (instant, observation) in series.instants.iter().zip(&series.observations) {
        let visible = observation.elevation_deg + elevation_bias_deg > 0.0 && observation.sunlit;
        match pending {
            None if visible => pending = Some(*instant),
            Some(start) if !visible => {
                windows.push(VisibilityWindow {
                    start,
                    end: *instant,
                });
                pending = None;
            }
            _ => {}
        }
    }

    if let (Some(start), Some(&end)) = (pending, series.instants.last()) {
        windows.push(VisibilityWindow { start, end });
    }

    Ok(windows)
}
