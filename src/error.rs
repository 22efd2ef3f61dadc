//! Error types in flushot
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("not enough samples")]
    NotEnoughSamples,
}

/// The fields of a batch do not line up with the expected schema.
///
/// Not recoverable locally, the caller has to correct its input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("required field `{0}` is absent from the input")]
    MissingField(String),
    #[error("field `{field}` is {found}, expected {expected}")]
    KindMismatch {
        field: String,
        expected: String,
        found: String,
    },
    #[error("level {value} of field `{field}` lies outside of {min}..={max}")]
    LevelOutOfRange {
        field: String,
        value: u8,
        min: u8,
        max: u8,
    },
    #[error("value `{value}` of field `{field}` was not seen during fitting")]
    UnknownCategory { field: String, value: String },
    #[error("field `{0}` is defined more than once")]
    DuplicateField(String),
    #[error("schema does not contain any field")]
    EmptySchema,
}

/// Upstream data problems which would corrupt supervised learning if tolerated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataIntegrityError {
    #[error("respondent `{0}` appears more than once")]
    DuplicateIdentifier(String),
    #[error("label of respondent `{id}` is `{value}`, expected 0 or 1")]
    InvalidLabel { id: String, value: String },
    #[error("respondent `{0}` has no label")]
    MissingLabel(String),
    #[error("label for respondent `{0}` has no matching record")]
    UnmatchedLabel(String),
    #[error("column `{field}` has {found} entries, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },
}
