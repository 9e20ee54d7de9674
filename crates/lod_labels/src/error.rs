//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! rejected zoom/engine configuration, empty datasets handed to the partitioner,
//! and out-of-range item levels.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dataset is empty; nothing to partition into levels")]
    EmptyDataset,

    #[error("item level {level} exceeds the supported maximum of {max}")]
    LevelOutOfRange { level: u32, max: u32 },
}
