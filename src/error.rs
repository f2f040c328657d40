use thiserror::Error;

use crate::engine::EngineError;

pub type HarnessResult<T> = Result<T, HarnessError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// Fatal, only raised at startup.
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// Rejected user input. The previous value stays in effect.
    #[error("Invalid {name} \"{value}\"")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Engine call `{op}` failed")]
    EngineCallFailure {
        op: &'static str,
        #[source]
        source: EngineError,
    },

    /// The engine handed out a cell buffer that does not cover the grid.
    #[error("Cell buffer holds {actual} bytes, expected {expected}")]
    BufferMismatch { expected: usize, actual: usize },
}

impl HarnessError {
    pub(crate) fn engine(op: &'static str) -> impl FnOnce(EngineError) -> Self {
        move |source| Self::EngineCallFailure { op, source }
    }
}

impl From<EngineError> for HarnessError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidDimension { width, height } => {
                Self::InvalidDimension { width, height }
            }
            source => Self::EngineCallFailure {
                op: "create",
                source,
            },
        }
    }
}
