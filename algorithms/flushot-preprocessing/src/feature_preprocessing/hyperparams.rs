use std::marker::PhantomData;

use flushot::dataset::Schema;
use flushot::{Float, ParamGuard};

use crate::error::PreprocessingError;
use crate::imputation::MedianMethod;
use crate::one_hot::UnknownCategory;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Feature preprocessor: learns fill values and category vocabularies from a training split,
/// producing a [FeaturePreprocessor](crate::FeaturePreprocessor) that encodes any split with
/// exactly the same rules.
///
/// ### Attributes
///
/// * `schema`: the fields used as model input and their kinds. Defaults to the seasonal flu
///   survey without the H1N1 opinion and knowledge fields.
/// * `unknown_category`: handling of categorical values not seen during fitting. Defaults to
///   [`UnknownCategory::Bucket`].
/// * `ordinal_median`: how fill values of ordinal fields are computed. Defaults to
///   [`MedianMethod::Levels`].
/// * `count_median`: how fill values of count fields are computed. Defaults to
///   [`MedianMethod::Samples`].
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FeaturePreprocessorValidParams<F> {
    schema: Schema,
    unknown_category: UnknownCategory,
    ordinal_median: MedianMethod,
    count_median: MedianMethod,
    #[cfg_attr(feature = "serde", serde(skip))]
    phantom: PhantomData<F>,
}

impl<F: Float> FeaturePreprocessorValidParams<F> {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn unknown_category(&self) -> UnknownCategory {
        self.unknown_category
    }

    pub fn ordinal_median(&self) -> MedianMethod {
        self.ordinal_median
    }

    pub fn count_median(&self) -> MedianMethod {
        self.count_median
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FeaturePreprocessorParams<F>(FeaturePreprocessorValidParams<F>);

impl<F: Float> Default for FeaturePreprocessorParams<F> {
    fn default() -> Self {
        FeaturePreprocessorParams::new(Schema::seasonal_flu_default())
    }
}

impl<F: Float> FeaturePreprocessorParams<F> {
    /// Creates a preprocessor for the fields of `schema`, with default configuration otherwise.
    pub fn new(schema: Schema) -> Self {
        Self(FeaturePreprocessorValidParams {
            schema,
            unknown_category: UnknownCategory::default(),
            ordinal_median: MedianMethod::Levels,
            count_median: MedianMethod::Samples,
            phantom: PhantomData,
        })
    }

    /// Set the fields used as model input
    pub fn schema(mut self, schema: Schema) -> Self {
        self.0.schema = schema;
        self
    }

    /// Configure the handling of categorical values not seen during fitting,
    /// defaults to `UnknownCategory::Bucket`.
    pub fn unknown_category(mut self, unknown_category: UnknownCategory) -> Self {
        self.0.unknown_category = unknown_category;
        self
    }

    /// Configure how ordinal fill values are computed,
    /// defaults to `MedianMethod::Levels`.
    pub fn ordinal_median(mut self, median: MedianMethod) -> Self {
        self.0.ordinal_median = median;
        self
    }

    /// Configure how count fill values are computed,
    /// defaults to `MedianMethod::Samples`.
    pub fn count_median(mut self, median: MedianMethod) -> Self {
        self.0.count_median = median;
        self
    }

    /// Use the same median method for ordinal and count fields
    pub fn median(self, median: MedianMethod) -> Self {
        self.ordinal_median(median).count_median(median)
    }
}

impl<F: Float> ParamGuard for FeaturePreprocessorParams<F> {
    type Checked = FeaturePreprocessorValidParams<F>;
    type Error = PreprocessingError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        self.0.schema.validate()?;
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}
