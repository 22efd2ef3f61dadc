//! Missing-value aware feature preprocessing

use flushot::dataset::{Column, Dataset, FieldKind, LabeledRecords, Observed, RecordSet, Schema};
use flushot::traits::{Fit, Transformer};
use flushot::{Float, ParamGuard, SchemaError};
use ndarray::{s, Array2, ArrayViewMut1, ArrayViewMut2, Axis};
use tracing::{debug, warn};

use crate::error::{PreprocessingError, Result};
use crate::imputation::{binary_mode, median};
use crate::one_hot::{Category, CategoryVocabulary, UnknownCategory};

pub use hyperparams::{FeaturePreprocessorParams, FeaturePreprocessorValidParams};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod hyperparams;

/// Looks up the column of every schema field, in schema order
///
/// Columns of the batch which are not part of the schema are ignored. Ordinal answers have to
/// lie on the scale of their field.
fn schema_columns<'a>(schema: &Schema, records: &'a RecordSet) -> Result<Vec<&'a Column>> {
    schema
        .fields()
        .iter()
        .map(|field| -> Result<&'a Column> {
            let column = records
                .column(field.name())
                .ok_or_else(|| SchemaError::MissingField(field.name().to_string()))?;
            if !field.kind().accepts(column) {
                return Err(SchemaError::KindMismatch {
                    field: field.name().to_string(),
                    expected: field.kind().to_string(),
                    found: column.kind_name().to_string(),
                }
                .into());
            }
            if let (FieldKind::Ordinal { min, max }, Column::Ordinal(values)) =
                (field.kind(), column)
            {
                if let Some(&value) = values
                    .iter()
                    .filter_map(|x| x.value())
                    .find(|&&x| x < min || x > max)
                {
                    return Err(SchemaError::LevelOutOfRange {
                        field: field.name().to_string(),
                        value,
                        min,
                        max,
                    }
                    .into());
                }
            }
            Ok(column)
        })
        .collect()
}

impl<F: Float> FeaturePreprocessorValidParams<F> {
    /// Encodes every fold of `data` with its own preprocessor
    ///
    /// For each of the `k` folds produced by [`LabeledRecords::fold`] a preprocessor is fitted on
    /// the training part only and then used to encode both parts. Returns the encoded
    /// `(train, valid)` pairs in fold order.
    pub fn fit_transform_folds(
        &self,
        data: &LabeledRecords,
        k: usize,
    ) -> Result<Vec<(Dataset<F>, Dataset<F>)>> {
        data.fold(k)?
            .into_iter()
            .enumerate()
            .map(|(i, (train, valid))| -> Result<(Dataset<F>, Dataset<F>)> {
                let preprocessor = self.fit(train.records())?;
                debug!(
                    fold = i,
                    train = train.nsamples(),
                    valid = valid.nsamples(),
                    "fitted fold preprocessor"
                );
                Ok((preprocessor.transform(&train)?, preprocessor.transform(&valid)?))
            })
            .collect()
    }
}

impl<F: Float> FeaturePreprocessorParams<F> {
    /// Encodes every fold of `data` with its own preprocessor, see
    /// [`FeaturePreprocessorValidParams::fit_transform_folds`].
    pub fn fit_transform_folds(
        &self,
        data: &LabeledRecords,
        k: usize,
    ) -> Result<Vec<(Dataset<F>, Dataset<F>)>> {
        self.check_ref()
            .and_then(|params| params.fit_transform_folds(data, k))
    }
}

impl<F: Float> Fit<RecordSet, PreprocessingError> for FeaturePreprocessorValidParams<F> {
    type Object = FeaturePreprocessor<F>;

    /// Learns fill values and vocabularies from the training batch `records`.
    ///
    /// Returns an error if:
    /// * the batch is empty
    /// * a schema field is absent from the batch or stored with a different kind
    /// * a binary, ordinal or count field has no observed value in the batch
    fn fit(&self, records: &RecordSet) -> Result<Self::Object> {
        if records.nsamples() == 0 {
            return Err(PreprocessingError::NotEnoughSamples);
        }
        let columns = schema_columns(self.schema(), records)?;

        let mut imputers = Vec::new();
        let mut encoders = Vec::new();
        for (field, column) in self.schema().fields().iter().zip(columns) {
            let name = field.name().to_string();
            let fill = match column {
                Column::Binary(values) => binary_mode(values).map(|x| F::cast(u8::from(x))),
                Column::Ordinal(values) => median(values, self.ordinal_median()),
                Column::Count(values) => median(values, self.count_median()),
                Column::Categorical(values) => {
                    let vocabulary = CategoryVocabulary::learn(values);
                    debug!(
                        field = %name,
                        categories = vocabulary.len(),
                        missing = vocabulary.has_missing(),
                        "learned vocabulary"
                    );
                    encoders.push(OneHotField { name, vocabulary });
                    continue;
                }
            };

            let fill = fill.ok_or_else(|| PreprocessingError::NoObservations(name.clone()))?;
            debug!(field = %name, fill = %fill, "learned fill value");
            imputers.push(ImputedField { name, fill });
        }

        let mut feature_names = imputers
            .iter()
            .map(|x| x.name.clone())
            .collect::<Vec<_>>();
        for encoder in &encoders {
            feature_names.extend(
                encoder
                    .vocabulary
                    .categories()
                    .iter()
                    .map(|category| format!("{}={}", encoder.name, category)),
            );
            if let UnknownCategory::Bucket = self.unknown_category() {
                feature_names.push(format!("{}={}", encoder.name, Category::Unknown));
            }
        }

        debug!(
            nsamples = records.nsamples(),
            nfeatures = feature_names.len(),
            "fitted feature preprocessor"
        );

        Ok(FeaturePreprocessor {
            schema: self.schema().clone(),
            unknown_category: self.unknown_category(),
            imputers,
            encoders,
            feature_names,
        })
    }
}

impl<F: Float> Fit<LabeledRecords, PreprocessingError> for FeaturePreprocessorValidParams<F> {
    type Object = FeaturePreprocessor<F>;

    /// Learns from the records of a labeled training split, the labels are not used.
    fn fit(&self, data: &LabeledRecords) -> Result<Self::Object> {
        self.fit(data.records())
    }
}

/// A binary, ordinal or count field with its fill value
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
struct ImputedField<F> {
    name: String,
    fill: F,
}

impl<F: Float> ImputedField<F> {
    fn encode(&self, column: &Column, mut out: ArrayViewMut1<F>) {
        fn fill_into<F: Float, T: Copy>(
            values: &[Observed<T>],
            fill: F,
            to_float: impl Fn(T) -> F,
            out: &mut ArrayViewMut1<F>,
        ) {
            for (cell, value) in out.iter_mut().zip(values) {
                *cell = value.value().map(|&x| to_float(x)).unwrap_or(fill);
            }
        }

        match column {
            Column::Binary(values) => {
                fill_into(values, self.fill, |x| F::cast(u8::from(x)), &mut out)
            }
            Column::Ordinal(values) => fill_into(values, self.fill, F::cast, &mut out),
            Column::Count(values) => fill_into(values, self.fill, F::cast, &mut out),
            Column::Categorical(_) => {}
        }
    }
}

/// A categorical field with its learned vocabulary
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
struct OneHotField {
    name: String,
    vocabulary: CategoryVocabulary,
}

impl OneHotField {
    /// Number of output columns of the field
    fn width(&self, unknown_category: UnknownCategory) -> usize {
        match unknown_category {
            UnknownCategory::Bucket => self.vocabulary.len() + 1,
            UnknownCategory::Error => self.vocabulary.len(),
        }
    }

    fn encode<F: Float>(
        &self,
        column: &Column,
        mut out: ArrayViewMut2<F>,
        unknown_category: UnknownCategory,
    ) -> Result<()> {
        let values = match column {
            Column::Categorical(values) => values,
            _ => return Ok(()),
        };

        let mut unknown = 0;
        for (mut row, value) in out.axis_iter_mut(Axis(0)).zip(values) {
            match (self.vocabulary.position(value), unknown_category) {
                (Some(idx), _) => row[idx] = F::one(),
                (None, UnknownCategory::Bucket) => {
                    row[self.vocabulary.len()] = F::one();
                    unknown += 1;
                }
                (None, UnknownCategory::Error) => {
                    let value = match value.value() {
                        Some(v) => v.clone(),
                        None => Category::Missing.to_string(),
                    };
                    return Err(SchemaError::UnknownCategory {
                        field: self.name.clone(),
                        value,
                    }
                    .into());
                }
            }
        }

        if unknown > 0 {
            warn!(
                field = %self.name,
                count = unknown,
                "values not seen during fitting were mapped to the unknown bucket"
            );
        }

        Ok(())
    }
}

/// Encodes survey batches with the fill values and vocabularies learned during fitting.
///
/// The output has one row per respondent. Columns are the binary, ordinal and count fields in
/// schema order, followed by the one-hot columns of every categorical field in schema order.
/// Within a categorical field the columns are the observed values in lexicographic order, the
/// missing token if missingness was seen during fitting, and the unknown bucket if configured.
///
/// ### Example
///
/// ```rust
/// use flushot::traits::{Fit, Transformer};
/// use flushot_preprocessing::FeaturePreprocessor;
/// use ndarray::Array2;
///
/// let data = flushot_datasets::sample().unwrap();
/// let (train, valid) = data.split_with_ratio(0.8);
///
/// // learn fill values and vocabularies from the training split only
/// let preprocessor = FeaturePreprocessor::<f64>::params().fit(&train).unwrap();
/// // encode the validation split with exactly the same rules
/// let encoded: Array2<f64> = preprocessor.transform(valid.records()).unwrap();
/// assert_eq!(encoded.ncols(), preprocessor.nfeatures());
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePreprocessor<F> {
    schema: Schema,
    unknown_category: UnknownCategory,
    imputers: Vec<ImputedField<F>>,
    encoders: Vec<OneHotField>,
    feature_names: Vec<String>,
}

impl<F: Float> FeaturePreprocessor<F> {
    /// Construct a new set of parameters for the default seasonal schema
    pub fn params() -> FeaturePreprocessorParams<F> {
        FeaturePreprocessorParams::default()
    }

    /// The schema the preprocessor was fitted with
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Fill value of a binary, ordinal or count field, `None` for other fields
    pub fn fill_value(&self, field: &str) -> Option<F> {
        self.imputers
            .iter()
            .find(|x| x.name == field)
            .map(|x| x.fill)
    }

    /// Learned vocabulary of a categorical field, `None` for other fields
    pub fn vocabulary(&self, field: &str) -> Option<&CategoryVocabulary> {
        self.encoders
            .iter()
            .find(|x| x.name == field)
            .map(|x| &x.vocabulary)
    }

    /// Names of the output columns, in column order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Number of output columns
    pub fn nfeatures(&self) -> usize {
        self.feature_names.len()
    }

    fn encode(&self, records: &RecordSet) -> Result<Array2<F>> {
        let columns = schema_columns(&self.schema, records)?;
        let (numeric, categorical): (Vec<_>, Vec<_>) = self
            .schema
            .fields()
            .iter()
            .zip(columns)
            .partition(|(field, _)| !field.kind().is_categorical());

        let mut encoded = Array2::zeros((records.nsamples(), self.nfeatures()));

        for (j, (imputer, (_, column))) in self.imputers.iter().zip(numeric).enumerate() {
            imputer.encode(column, encoded.column_mut(j));
        }

        let mut offset = self.imputers.len();
        for (encoder, (_, column)) in self.encoders.iter().zip(categorical) {
            let width = encoder.width(self.unknown_category);
            encoder.encode(
                column,
                encoded.slice_mut(s![.., offset..offset + width]),
                self.unknown_category,
            )?;
            offset += width;
        }

        Ok(encoded)
    }
}

impl<'a, F: Float> Transformer<&'a RecordSet, Result<Array2<F>>> for FeaturePreprocessor<F> {
    /// Encodes a batch of respondents into a matrix of size `(nsamples, nfeatures)`.
    ///
    /// Fields of the batch which are not part of the schema are ignored. Returns an error if a
    /// schema field is absent or stored with a different kind, or if an unseen category is met
    /// while `UnknownCategory::Error` is configured. The batch itself is never modified.
    fn transform(&self, records: &'a RecordSet) -> Result<Array2<F>> {
        self.encode(records)
    }
}

impl<'a, F: Float> Transformer<&'a LabeledRecords, Result<Dataset<F>>> for FeaturePreprocessor<F> {
    /// Encodes the records of a labeled split and carries over its targets and the names of the
    /// output columns.
    fn transform(&self, data: &'a LabeledRecords) -> Result<Dataset<F>> {
        let records = self.encode(data.records())?;

        Ok(Dataset::new(records, data.targets().clone())
            .with_feature_names(self.feature_names.clone()))
    }
}
