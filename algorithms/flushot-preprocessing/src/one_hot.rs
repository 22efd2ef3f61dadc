//! Category vocabularies for one-hot encoding

use std::collections::BTreeSet;
use std::fmt;

use flushot::dataset::Observed;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// What to do with a categorical value that was not seen during fitting
///
/// * `Bucket`: set a reserved extra column of the field, one per categorical field
/// * `Error`: fail the transformation with `SchemaError::UnknownCategory`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownCategory {
    Bucket,
    Error,
}

impl Default for UnknownCategory {
    fn default() -> Self {
        UnknownCategory::Bucket
    }
}

/// A single one-hot column of a categorical field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Value(String),
    /// The respondent did not answer
    Missing,
    /// Reserved bucket for values not seen during fitting
    Unknown,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Value(v) => write!(f, "{}", v),
            Category::Missing => write!(f, "<missing>"),
            Category::Unknown => write!(f, "<unknown>"),
        }
    }
}

/// The categories of one field observed in a training split
///
/// Observed values are kept in lexicographic order, followed by the missing token if at least one
/// respondent of the training split left the field blank. The position of a category is the
/// offset of its one-hot column within the field.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryVocabulary {
    values: Vec<String>,
    has_missing: bool,
}

impl CategoryVocabulary {
    /// Learns the vocabulary of a categorical column
    pub fn learn(column: &[Observed<String>]) -> CategoryVocabulary {
        let mut has_missing = false;
        let mut values = BTreeSet::new();
        for entry in column {
            match entry {
                Observed::Missing => has_missing = true,
                Observed::Value(v) => {
                    values.insert(v.as_str());
                }
            }
        }

        CategoryVocabulary {
            values: values.into_iter().map(|v| v.to_string()).collect(),
            has_missing,
        }
    }

    /// Number of learned categories, the missing token included
    pub fn len(&self) -> usize {
        self.values.len() + usize::from(self.has_missing)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether missingness was observed during fitting
    pub fn has_missing(&self) -> bool {
        self.has_missing
    }

    /// Offset of the one-hot column for `entry`, `None` if it was not seen during fitting
    pub fn position(&self, entry: &Observed<String>) -> Option<usize> {
        match entry {
            Observed::Value(v) => self.values.binary_search(v).ok(),
            Observed::Missing if self.has_missing => Some(self.values.len()),
            Observed::Missing => None,
        }
    }

    /// All learned categories, in column order
    pub fn categories(&self) -> Vec<Category> {
        self.values
            .iter()
            .cloned()
            .map(Category::Value)
            .chain(self.has_missing.then(|| Category::Missing))
            .collect()
    }
}
