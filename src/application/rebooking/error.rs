//! Stage-attributed workflow errors.

use thiserror::Error;

use crate::domain::{Outcome, Stage};
use crate::error::Error;

/// An error tagged with the workflow stage that produced it.
#[derive(Error, Debug)]
#[error("{stage}: {error}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub error: Error,
}

impl StageError {
    pub fn new(stage: Stage, error: impl Into<Error>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }

    /// Convert into the `failed` outcome reported for this run.
    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        Outcome::Failed {
            stage: self.stage,
            kind: self.error.kind(),
            cause: self.error.to_string(),
        }
    }
}

/// Attach a stage to any error convertible into [`Error`].
pub(crate) trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, StageError>;
}

impl<T, E: Into<Error>> AtStage<T> for Result<T, E> {
    fn at(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|err| StageError::new(stage, err))
    }
}
