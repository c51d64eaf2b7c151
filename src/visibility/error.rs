use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("sample series misaligned: {instants} instants vs {observations} observations")]
    LengthMismatch { instants: usize, observations: usize },
}
