//! `flushot` provides the data model and the shared traits for predicting seasonal flu
//! vaccination from the National 2009 H1N1 Flu Survey.
//!
//! ## The Big Picture
//!
//! A survey respondent answers binary indicators, ordinal ratings, counts and categorical
//! questions, and any of these answers may be missing. Missingness carries signal in this survey
//! (a blank employment field correlates with not being employed), so it is kept as an explicit
//! [`Observed::Missing`](dataset::Observed) variant rather than a nullable primitive.
//!
//! The workspace is split into three crates:
//!
//! * `flushot`: records, labels, the feature [`Schema`](dataset::Schema), error kinds, the
//!   [`Fit`](traits::Fit) and [`Transformer`](traits::Transformer) traits and splitting helpers
//! * `flushot-preprocessing`: the feature preprocessor, which learns fill values and category
//!   vocabularies from a training split and encodes any split into a numeric matrix
//! * `flushot-datasets`: the CSV loader for the survey tables and a small embedded sample
//!
//! ## Leakage
//!
//! Everything a preprocessor learns comes from the batch passed to `fit`. Splits and folds are
//! copies of the loaded data, so fitting on one of them can never see the others.
//!

pub mod dataset;
pub mod error;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, Float};
pub use error::{DataIntegrityError, Error, Result, SchemaError};
pub use param_guard::ParamGuard;
