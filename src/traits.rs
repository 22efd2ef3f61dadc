//! Provide traits for different classes of algorithms
//!

use std::error::Error;

/// Transformation algorithms
///
/// A transformer takes a batch and applies parameters learned earlier. It never learns from the
/// batch it is given, which keeps training, validation and inference splits independent.
pub trait Transformer<R, T> {
    fn transform(&self, x: R) -> T;
}

/// Fittable algorithms
///
/// A fittable algorithm takes a batch and creates a concept of some kind about it, for example
/// the vocabulary of a categorical field or the fill value of a sparse one. The learned state is
/// returned as `Self::Object` and the batch itself is left untouched.
pub trait Fit<R, E: Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &R) -> Result<Self::Object, E>;
}
