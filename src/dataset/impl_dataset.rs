use ndarray::{Array1, Array2};

use super::{Dataset, Float};

impl<F: Float> Dataset<F> {
    /// Create a new dataset from encoded records and targets
    ///
    /// Feature names default to `feature-0`, `feature-1`, ... until set with
    /// `with_feature_names`.
    pub fn new(records: Array2<F>, targets: Array1<usize>) -> Dataset<F> {
        let feature_names = (0..records.ncols())
            .map(|idx| format!("feature-{}", idx))
            .collect();

        Dataset {
            records,
            targets,
            feature_names,
        }
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> Dataset<F> {
        let feature_names = names.into_iter().map(|x| x.into()).collect();

        self.feature_names = feature_names;

        self
    }

    pub fn records(&self) -> &Array2<F> {
        &self.records
    }

    pub fn targets(&self) -> &Array1<usize> {
        &self.targets
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    pub fn nfeatures(&self) -> usize {
        self.records.ncols()
    }
}
