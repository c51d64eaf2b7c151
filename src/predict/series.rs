use chrono::{DateTime, Local, Utc};

use crate::visibility::{Observation, SampleSeries};

use super::error::{PredictError, PropagationError};

/// The propagation collaborator: one observation for one absolute instant.
pub trait ObservationSource {
    fn observe(&self, instant: DateTime<Utc>) -> Result<Observation, PropagationError>;
}

/// Collect one observation per instant, index-aligned with the input.
///
/// The whole batch fails on the first collaborator error, carrying the
/// failing instant. Samples are never skipped: a gap would desynchronize
/// the segmenter's pairing of instants and observations.
pub fn predict_series(
    source: &impl ObservationSource,
    instants: &[DateTime<Local>],
) -> Result<SampleSeries, PredictError> {
    let mut observations = Vec::with_capacity(instants.len());
    for instant in instants {
        let observation = source
            .observe(instant.with_timezone(&Utc))
            .map_err(|source| PredictError::Propagation {
                instant: *instant,
                source,
            })?;
        observations.push(observation);
    }
    Ok(SampleSeries::new(instants.to_vec(), observations))
}
