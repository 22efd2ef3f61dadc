use std::collections::HashSet;

use super::{Column, RecordSet, Schema};
use crate::error::{DataIntegrityError, Result, SchemaError};

impl RecordSet {
    /// Create a batch without any column
    ///
    /// Fails if a respondent identifier appears more than once.
    pub fn new<S: ToString>(ids: Vec<S>) -> Result<RecordSet> {
        let ids: Vec<String> = ids.into_iter().map(|id| id.to_string()).collect();
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id.as_str()) {
                return Err(DataIntegrityError::DuplicateIdentifier(id.clone()).into());
            }
        }

        Ok(RecordSet {
            ids,
            columns: Vec::new(),
        })
    }

    /// Add a named column
    ///
    /// The column must have one entry per respondent and its name must not be taken yet.
    pub fn with_column<S: ToString>(mut self, name: S, column: Column) -> Result<RecordSet> {
        let name = name.to_string();
        if column.len() != self.ids.len() {
            return Err(DataIntegrityError::LengthMismatch {
                field: name,
                expected: self.ids.len(),
                found: column.len(),
            }
            .into());
        }
        if self.column(&name).is_some() {
            return Err(SchemaError::DuplicateField(name).into());
        }

        self.columns.push((name, column));
        Ok(self)
    }

    /// Respondent identifiers, in row order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn nsamples(&self) -> usize {
        self.ids.len()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, column)| column)
    }

    /// Names of all stored columns, in insertion order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, column)| (name.as_str(), column))
    }

    /// Copies the respondents at `indices` into a new batch
    pub fn select(&self, indices: &[usize]) -> RecordSet {
        RecordSet {
            ids: indices.iter().map(|&i| self.ids[i].clone()).collect(),
            columns: self
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), column.select(indices)))
                .collect(),
        }
    }

    /// Keeps only the columns named in `schema`, in schema order
    ///
    /// Schema fields without a column are skipped here, the consumer decides whether their absence
    /// is an error.
    pub fn restrict(&self, schema: &Schema) -> RecordSet {
        let columns = schema
            .fields()
            .iter()
            .filter_map(|field| {
                self.column(field.name())
                    .map(|column| (field.name().to_string(), column.clone()))
            })
            .collect();

        RecordSet {
            ids: self.ids.clone(),
            columns,
        }
    }
}
