use std::error::Error;

use crate::traits::Fit;

/// Configuration which has not been checked for validity yet
///
/// The checked configuration can only be reached through `check_ref()` or `check()`. Whenever
/// `Fit` is implemented on the checked configuration it is implemented on the unchecked one as
/// well, running the check before fitting.
///
/// `check_ref()` and `check()` have to apply the same validation.
pub trait ParamGuard {
    /// The checked configuration
    type Checked;
    /// Error returned when the configuration is rejected
    type Error: Error;

    /// Checks the configuration and returns a reference to the checked one
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Checks the configuration and returns the checked one
    fn check(self) -> Result<Self::Checked, Self::Error>;
}

/// Checks the configuration and fits with the checked one. A rejected configuration is converted
/// into the error type of `Fit`.
impl<R, E, P: ParamGuard> Fit<R, E> for P
where
    P::Checked: Fit<R, E>,
    E: Error + From<crate::error::Error> + From<P::Error>,
{
    type Object = <<P as ParamGuard>::Checked as Fit<R, E>>::Object;

    fn fit(&self, dataset: &R) -> Result<Self::Object, E> {
        let checked = self.check_ref()?;
        checked.fit(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error as FlushotError;

    struct Threshold(f64);

    struct ThresholdParams(Threshold);

    impl ParamGuard for ThresholdParams {
        type Checked = Threshold;
        type Error = FlushotError;

        fn check_ref(&self) -> Result<&Threshold, FlushotError> {
            if (0.0..=1.0).contains(&(self.0).0) {
                Ok(&self.0)
            } else {
                Err(FlushotError::Parameters(format!(
                    "threshold {} outside of [0, 1]",
                    (self.0).0
                )))
            }
        }

        fn check(self) -> Result<Threshold, FlushotError> {
            self.check_ref()?;
            Ok(self.0)
        }
    }

    impl Fit<Vec<f64>, FlushotError> for Threshold {
        type Object = usize;

        fn fit(&self, dataset: &Vec<f64>) -> Result<usize, FlushotError> {
            Ok(dataset.iter().filter(|&&x| x > self.0).count())
        }
    }

    #[test]
    fn fit_runs_the_check() {
        let data = vec![0.1, 0.6, 0.9];
        assert_eq!(ThresholdParams(Threshold(0.5)).fit(&data), Ok(2));
        assert!(matches!(
            ThresholdParams(Threshold(1.5)).fit(&data),
            Err(FlushotError::Parameters(_))
        ));
        assert!(ThresholdParams(Threshold(-0.5)).check().is_err());
    }
}
