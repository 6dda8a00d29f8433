mod closest_point;
mod length;

pub use closest_point::{ClosestPoint, Localization, SegmentLocalization};
pub use length::{ArcLength, SegmentArcLength};

use crate::error::{QueryError, Result};

/// Accuracy settings of the two query decorators.
///
/// Smaller values cost more evaluations and give more precise results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyParams {
    /// Parameter tolerance of closest-point searches.
    pub localization: f64,
    /// Arc-length tolerance of length and `t <-> s` conversions.
    pub parametrization: f64,
}

impl Default for AccuracyParams {
    fn default() -> Self {
        Self {
            localization: 0.01,
            parametrization: 0.01,
        }
    }
}

impl AccuracyParams {
    /// Creates accuracy settings.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidAccuracy`] if either value is not
    /// positive and finite.
    pub fn new(localization: f64, parametrization: f64) -> Result<Self> {
        let params = Self {
            localization,
            parametrization,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that both accuracies are positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidAccuracy`] for the first invalid value.
    pub fn validate(&self) -> Result<()> {
        validate_accuracy(self.localization)?;
        validate_accuracy(self.parametrization)?;
        Ok(())
    }
}

pub(crate) fn validate_accuracy(accuracy: f64) -> std::result::Result<f64, QueryError> {
    if accuracy.is_finite() && accuracy > 0.0 {
        Ok(accuracy)
    } else {
        Err(QueryError::InvalidAccuracy(accuracy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(AccuracyParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_accuracy() {
        assert!(AccuracyParams::new(0.0, 0.01).is_err());
        assert!(AccuracyParams::new(0.01, -1.0).is_err());
        assert!(AccuracyParams::new(f64::NAN, 0.01).is_err());
        assert!(AccuracyParams::new(0.01, f64::INFINITY).is_err());
    }
}
