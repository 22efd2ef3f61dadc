//! Datasets
//!
//! This module implements the survey data model: typed columns whose missing entries are an
//! explicit variant, record batches keyed by respondent, binary labels and their one-to-one join,
//! and the numeric dataset handed to a classifier once preprocessing is done.
use ndarray::{Array1, Array2, ScalarOperand};
use num_traits::{FromPrimitive, NumCast};

use std::fmt;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod impl_dataset;
mod impl_labeled;
mod impl_records;
mod schema;

pub use schema::{FieldSpec, Schema, H1N1_FIELDS, H1N1_TARGET, ID_COLUMN, SEASONAL_TARGET};

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used for the encoded feature
/// matrix and the fill values learned from a training split.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// A single survey answer
///
/// The respondent either gave a value or did not. Missingness is kept as its own variant all the
/// way into encoding, so that no stage silently coerces an unknown answer into a default.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Observed<T> {
    Missing,
    Value(T),
}

impl<T> Observed<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Observed::Missing)
    }

    /// Returns the observed value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Observed::Missing => None,
            Observed::Value(v) => Some(v),
        }
    }

    pub fn map<U, G: FnOnce(T) -> U>(self, fnc: G) -> Observed<U> {
        match self {
            Observed::Missing => Observed::Missing,
            Observed::Value(v) => Observed::Value(fnc(v)),
        }
    }
}

impl<T> From<Option<T>> for Observed<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Observed::Value(v),
            None => Observed::Missing,
        }
    }
}

/// The kind of a survey field
///
/// * `Binary`: a 0/1 indicator
/// * `Ordinal`: a rating on the inclusive scale `min..=max`
/// * `Count`: a non-negative integer
/// * `Categorical`: a free label out of a finite, data-defined vocabulary
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Binary,
    Ordinal { min: u8, max: u8 },
    Count,
    Categorical,
}

impl FieldKind {
    /// Whether a column can hold values of this kind
    pub fn accepts(&self, column: &Column) -> bool {
        matches!(
            (self, column),
            (FieldKind::Binary, Column::Binary(_))
                | (FieldKind::Ordinal { .. }, Column::Ordinal(_))
                | (FieldKind::Count, Column::Count(_))
                | (FieldKind::Categorical, Column::Categorical(_))
        )
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, FieldKind::Categorical)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Binary => write!(f, "binary"),
            FieldKind::Ordinal { min, max } => write!(f, "ordinal ({}-{})", min, max),
            FieldKind::Count => write!(f, "count"),
            FieldKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Typed storage for the answers of all respondents to one field
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Binary(Vec<Observed<bool>>),
    Ordinal(Vec<Observed<u8>>),
    Count(Vec<Observed<u32>>),
    Categorical(Vec<Observed<String>>),
}

impl Column {
    pub fn binary<I: IntoIterator<Item = Option<bool>>>(values: I) -> Self {
        Column::Binary(values.into_iter().map(Observed::from).collect())
    }

    pub fn ordinal<I: IntoIterator<Item = Option<u8>>>(values: I) -> Self {
        Column::Ordinal(values.into_iter().map(Observed::from).collect())
    }

    pub fn count<I: IntoIterator<Item = Option<u32>>>(values: I) -> Self {
        Column::Count(values.into_iter().map(Observed::from).collect())
    }

    pub fn categorical<S: ToString, I: IntoIterator<Item = Option<S>>>(values: I) -> Self {
        Column::Categorical(
            values
                .into_iter()
                .map(|v| Observed::from(v.map(|s| s.to_string())))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Binary(v) => v.len(),
            Column::Ordinal(v) => v.len(),
            Column::Count(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of respondents who did not answer
    pub fn missing_count(&self) -> usize {
        match self {
            Column::Binary(v) => v.iter().filter(|x| x.is_missing()).count(),
            Column::Ordinal(v) => v.iter().filter(|x| x.is_missing()).count(),
            Column::Count(v) => v.iter().filter(|x| x.is_missing()).count(),
            Column::Categorical(v) => v.iter().filter(|x| x.is_missing()).count(),
        }
    }

    /// Short description of the stored kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Column::Binary(_) => "binary",
            Column::Ordinal(_) => "ordinal",
            Column::Count(_) => "count",
            Column::Categorical(_) => "categorical",
        }
    }

    /// Copies the entries at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> Column {
        fn pick<T: Clone>(values: &[T], indices: &[usize]) -> Vec<T> {
            indices.iter().map(|&i| values[i].clone()).collect()
        }

        match self {
            Column::Binary(v) => Column::Binary(pick(v, indices)),
            Column::Ordinal(v) => Column::Ordinal(pick(v, indices)),
            Column::Count(v) => Column::Count(pick(v, indices)),
            Column::Categorical(v) => Column::Categorical(pick(v, indices)),
        }
    }
}

/// A batch of survey respondents
///
/// Each respondent is identified by an opaque identifier, which is never used as a feature. The
/// identifiers are unique within a batch and every column has one entry per respondent. Once
/// built, a batch is never modified: selecting, splitting or shuffling produces new batches.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    ids: Vec<String>,
    columns: Vec<(String, Column)>,
}

/// Binary vaccination status per respondent
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    target: String,
    ids: Vec<String>,
    values: Vec<usize>,
}

/// Records joined one-to-one with their labels
///
/// `targets[i]` is the label of the respondent in row `i` of `records`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRecords {
    records: RecordSet,
    targets: Array1<usize>,
    target_name: String,
}

/// A model ready dataset
///
/// It contains the encoded feature matrix with dimensionality (nsamples, nfeatures), the binary
/// targets and the name of every encoded column.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<F> {
    pub records: Array2<F>,
    pub targets: Array1<usize>,

    feature_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_from_option() {
        assert_eq!(Observed::from(Some(3u8)), Observed::Value(3));
        assert_eq!(Observed::<u8>::from(None), Observed::Missing);
        assert!(Observed::<bool>::Missing.is_missing());
        assert_eq!(Observed::Value(2u8).map(|x| x * 2).value(), Some(&4));
    }

    #[test]
    fn column_counts_missing_entries() {
        let column = Column::categorical(vec![Some("a"), None, Some("b"), None]);
        assert_eq!(column.len(), 4);
        assert_eq!(column.missing_count(), 2);
        assert_eq!(column.kind_name(), "categorical");

        let column = Column::binary(vec![Some(true), Some(false)]);
        assert_eq!(column.missing_count(), 0);
    }

    #[test]
    fn column_select_keeps_missingness() {
        let column = Column::ordinal(vec![Some(1), None, Some(5)]);
        assert_eq!(
            column.select(&[2, 1]),
            Column::Ordinal(vec![Observed::Value(5), Observed::Missing])
        );
    }

    #[test]
    fn kind_accepts_matching_column() {
        let ordinal = FieldKind::Ordinal { min: 1, max: 5 };
        assert!(ordinal.accepts(&Column::ordinal(vec![Some(3)])));
        assert!(!ordinal.accepts(&Column::count(vec![Some(3)])));
        assert!(FieldKind::Categorical.accepts(&Column::categorical(vec![Some("x")])));
        assert_eq!(ordinal.to_string(), "ordinal (1-5)");
    }
}
