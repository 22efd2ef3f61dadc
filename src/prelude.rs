//! flushot prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{DataIntegrityError, Error, Result, SchemaError};

#[doc(no_inline)]
pub use crate::traits::*;

#[doc(no_inline)]
pub use crate::param_guard::ParamGuard;

#[doc(no_inline)]
pub use crate::dataset::{
    Column, Dataset, FieldKind, FieldSpec, Float, LabeledRecords, Labels, Observed, RecordSet,
    Schema,
};
