//! Linear rescaling of numeric data by its observed minimum and spread.
//!
//! The mapping is `(vmax - vmin) * (v - min) / ptp - vmin`. Note the
//! subtraction of `vmin`: for the common `(0, 1)` range this is the usual
//! min/max normalization, for other ranges the offset is negated. Inferred
//! values and decoded images both depend on this exact formula.

use crate::error::InvertError;

/// A rescaling fitted to a batch of data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    min: f64,
    ptp: f64,
    range: (f64, f64),
}

impl Normalizer {
    /// Fit to the minimum and peak-to-peak spread of `data`.
    ///
    /// # Errors
    ///
    /// - [`InvertError::Precondition`] when `data` is empty
    /// - [`InvertError::DegenerateRange`] when all values are identical
    ///   (or the spread is not finite)
    pub fn fit(data: &[f64], range: (f64, f64)) -> Result<Self, InvertError> {
        if data.is_empty() {
            return Err(InvertError::Precondition(
                "cannot normalize an empty array".to_string(),
            ));
        }
        let (min, max) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Self::with_reference(min, max - min, range)
    }

    /// Use a known reference minimum and spread instead of fitting.
    pub fn with_reference(min: f64, ptp: f64, range: (f64, f64)) -> Result<Self, InvertError> {
        if !min.is_finite() || !ptp.is_finite() || ptp == 0.0 {
            return Err(InvertError::DegenerateRange);
        }
        Ok(Self { min, ptp, range })
    }

    #[inline]
    pub fn apply(&self, v: f64) -> f64 {
        let (vmin, vmax) = self.range;
        (vmax - vmin) * (v - self.min) / self.ptp - vmin
    }

    /// The fitted minimum.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The fitted peak-to-peak spread.
    #[inline]
    pub fn ptp(&self) -> f64 {
        self.ptp
    }
}

/// Rescale `data` into `range` based on its own minimum and spread.
///
/// # Example
///
/// ```
/// use cmap_invert::normalize;
///
/// let out = normalize(&[2.0, 4.0, 6.0], (0.0, 1.0)).unwrap();
/// assert_eq!(out, vec![0.0, 0.5, 1.0]);
///
/// assert!(normalize(&[3.0, 3.0], (0.0, 1.0)).is_err());
/// ```
pub fn normalize(data: &[f64], range: (f64, f64)) -> Result<Vec<f64>, InvertError> {
    let norm = Normalizer::fit(data, range)?;
    Ok(data.iter().map(|&v| norm.apply(v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_range() {
        let out = normalize(&[10.0, 20.0, 15.0], (0.0, 1.0)).unwrap();
        assert_eq!(out, vec![0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_negated_offset_is_preserved() {
        // (vmax - vmin) * frac - vmin, not + vmin.
        let out = normalize(&[0.0, 1.0], (-1.0, 1.0)).unwrap();
        assert_eq!(out, vec![1.0, 3.0]);

        let out = normalize(&[0.0, 1.0], (2.0, 4.0)).unwrap();
        assert_eq!(out, vec![-2.0, 0.0]);
    }

    #[test]
    fn test_constant_input_is_degenerate() {
        assert_eq!(
            normalize(&[7.0; 5], (0.0, 1.0)),
            Err(InvertError::DegenerateRange)
        );
    }

    #[test]
    fn test_single_value_is_degenerate() {
        assert_eq!(
            normalize(&[0.5], (0.0, 1.0)),
            Err(InvertError::DegenerateRange)
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            normalize(&[], (0.0, 1.0)),
            Err(InvertError::Precondition(_))
        ));
    }

    #[test]
    fn test_non_finite_spread() {
        assert_eq!(
            normalize(&[0.0, f64::INFINITY], (0.0, 1.0)),
            Err(InvertError::DegenerateRange)
        );
    }

    #[test]
    fn test_fit_then_apply() {
        let norm = Normalizer::fit(&[0.0, 255.0], (0.0, 1.0)).unwrap();
        assert_eq!(norm.min(), 0.0);
        assert_eq!(norm.ptp(), 255.0);
        assert_eq!(norm.apply(51.0), 0.2);
    }
}
