//! Controller errors.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::adapter::AdapterError;

/// Collection an out of range index referred to.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Target {
    Led,
    Zone,
    Mode,
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Led => f.write_str("LED"),
            Self::Zone => f.write_str("zone"),
            Self::Mode => f.write_str("mode"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{target} index {index} out of range (count {len})")]
    IndexOutOfRange { target: Target, index: usize, len: usize },

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("speed {speed} outside of range {min}..={max}")]
    SpeedOutOfRange { speed: u8, min: u8, max: u8 },

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

pub type Result<T> = std::result::Result<T, Error>;
