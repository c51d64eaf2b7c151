mod error;
mod observer;
mod propagation;
mod satellite;
mod series;
mod sun;

pub use error::{PredictError, PropagationError};
pub use observer::Observer;
pub use propagation::{observe_at, Sgp4Propagator};
pub use satellite::Satellite;
pub use series::{predict_series, ObservationSource};
