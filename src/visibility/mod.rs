mod error;
mod sampler;
mod segmenter;
mod types;

pub use error::ContractError;
pub use sampler::{minute_instants, minute_instants_from};
pub use segmenter::visible_windows;
pub use types::{Observation, SampleSeries, VisibilityWindow};
