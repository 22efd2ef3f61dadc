//! Error definitions for preprocessing
use flushot::SchemaError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PreprocessingError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreprocessingError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error("field `{0}` has no observed value to learn a fill value from")]
    NoObservations(String),
    #[error(transparent)]
    FlushotError(#[from] flushot::Error),
}
