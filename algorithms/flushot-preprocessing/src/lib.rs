//! # Feature preprocessing
//!
//! `flushot-preprocessing` turns batches of survey respondents into model ready numeric matrices.
//!
//! ## The Big Picture
//!
//! `flushot-preprocessing` is a crate in the `flushot` workspace. A
//! [`FeaturePreprocessor`](FeaturePreprocessor) is fitted once on a training split and then
//! reused unchanged on validation, test and inference batches, so that no split leaks into the
//! parameters used to encode another one.
//!
//! ## Current state
//!
//! The preprocessor applies one rule per field kind:
//!
//! | Field kind | Missing value | Encoding |
//! |---|---|---|
//! | binary | training mode | 0/1 |
//! | ordinal | training median of the observed levels | level as number |
//! | count | training sample median | count as number |
//! | categorical | explicit missing token | one-hot, plus an unknown bucket |
//!
//! Missing categorical answers keep their own column instead of being folded into an existing
//! category, since in this survey a blank employment field is informative on its own.
//!
//! ## Examples
//!
//! There is an usage example in the `examples/` directory. To run, use:
//!
//! ```bash
//! $ cargo run --example seasonal_flu
//! ```
//!

pub mod error;
mod feature_preprocessing;
pub mod imputation;
pub mod one_hot;

pub use error::PreprocessingError;
pub use feature_preprocessing::{
    FeaturePreprocessor, FeaturePreprocessorParams, FeaturePreprocessorValidParams,
};
pub use imputation::MedianMethod;
pub use one_hot::{Category, CategoryVocabulary, UnknownCategory};
