//! Fill values for sparse numeric fields

use flushot::dataset::Observed;
use flushot::Float;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// How the fill value of ordinal and count fields is computed
///
/// * `Levels`: median of the distinct observed values. Every answer level weighs the same, so a
///   few very popular answers do not pull the fill value. `[1, 2, 4, 4, 5]` gives `3`.
/// * `Samples`: ordinary median of all observed values. `[1, 2, 4, 4, 5]` gives `4`.
///
/// Missing entries never take part in either computation.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedianMethod {
    Levels,
    Samples,
}

impl Default for MedianMethod {
    fn default() -> Self {
        MedianMethod::Levels
    }
}

/// Most frequent observed value of a binary field
///
/// Ties resolve to `false`. Returns `None` if no value was observed.
pub fn binary_mode(values: &[Observed<bool>]) -> Option<bool> {
    let (zeros, ones) = values
        .iter()
        .filter_map(|x| x.value())
        .fold((0usize, 0usize), |(zeros, ones), &x| {
            if x {
                (zeros, ones + 1)
            } else {
                (zeros + 1, ones)
            }
        });

    match (zeros, ones) {
        (0, 0) => None,
        (zeros, ones) => Some(ones > zeros),
    }
}

/// Median of the observed values, computed according to `method`
///
/// For an even number of candidates the two middle values are averaged. Returns `None` if no
/// value was observed.
pub fn median<F: Float, T: Copy + Ord + Into<f64>>(
    values: &[Observed<T>],
    method: MedianMethod,
) -> Option<F> {
    let mut observed = values
        .iter()
        .filter_map(|x| x.value())
        .copied()
        .collect::<Vec<_>>();
    observed.sort_unstable();
    if let MedianMethod::Levels = method {
        observed.dedup();
    }

    let len = observed.len();
    if len == 0 {
        return None;
    }

    let mid = len / 2;
    let median = if len % 2 == 1 {
        observed[mid].into()
    } else {
        (observed[mid - 1].into() + observed[mid].into()) / 2.0
    };

    Some(F::cast(median))
}
