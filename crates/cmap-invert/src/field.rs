//! Inferred scalar fields with a validity mask.

/// Scalar values recovered from colors, one per query pixel.
///
/// `mask[i] == true` means pixel `i` matched no sampled color closely enough;
/// its value is still present but meaningless. `errors` carries the minimum
/// color distance found for every pixel and `indices` the sample it matched.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedField {
    values: Vec<f64>,
    mask: Vec<bool>,
    errors: Vec<f64>,
    indices: Vec<usize>,
    rows: usize,
    cols: usize,
}

impl MaskedField {
    pub(crate) fn new(
        values: Vec<f64>,
        mask: Vec<bool>,
        errors: Vec<f64>,
        indices: Vec<usize>,
        (rows, cols): (usize, usize),
    ) -> Self {
        debug_assert_eq!(values.len(), rows * cols);
        debug_assert_eq!(mask.len(), values.len());
        debug_assert_eq!(errors.len(), values.len());
        debug_assert_eq!(indices.len(), values.len());
        Self {
            values,
            mask,
            errors,
            indices,
            rows,
            cols,
        }
    }

    /// An empty field of shape `(rows, cols)` where one side is zero.
    pub(crate) fn empty((rows, cols): (usize, usize)) -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), (rows, cols))
    }

    /// Spatial shape as `(rows, cols)`; single-color queries are one row.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw values, masked entries included.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `true` where the value is invalid.
    #[inline]
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Minimum color distance per pixel, in unit channel space.
    #[inline]
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Matched sample index per pixel.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The value at `i`, or `None` when it is masked.
    pub fn get(&self, i: usize) -> Option<f64> {
        match self.mask.get(i) {
            Some(false) => Some(self.values[i]),
            _ => None,
        }
    }

    #[inline]
    pub fn is_masked(&self, i: usize) -> bool {
        self.mask[i]
    }

    pub fn valid_count(&self) -> usize {
        self.mask.iter().filter(|&&m| !m).count()
    }

    pub fn masked_count(&self) -> usize {
        self.len() - self.valid_count()
    }

    /// Mean color distance over valid pixels, `None` when nothing matched.
    pub fn mean_error(&self) -> Option<f64> {
        let valid = self.valid_count();
        if valid == 0 {
            return None;
        }
        let total: f64 = self
            .errors
            .iter()
            .zip(&self.mask)
            .filter(|(_, &m)| !m)
            .map(|(&e, _)| e)
            .sum();
        Some(total / valid as f64)
    }

    /// Values with masked entries replaced by `fill`.
    pub fn filled(&self, fill: f64) -> Vec<f64> {
        self.iter().map(|v| v.unwrap_or(fill)).collect()
    }

    /// Iterate as `Option<f64>`, `None` for masked pixels.
    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values
            .iter()
            .zip(&self.mask)
            .map(|(&v, &m)| (!m).then_some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> MaskedField {
        MaskedField::new(
            vec![0.0, 0.5, 1.0],
            vec![false, true, false],
            vec![0.01, 0.9, 0.03],
            vec![0, 3, 7],
            (1, 3),
        )
    }

    #[test]
    fn test_counts() {
        let f = field();
        assert_eq!(f.len(), 3);
        assert_eq!(f.valid_count(), 2);
        assert_eq!(f.masked_count(), 1);
        assert!(f.is_masked(1));
    }

    #[test]
    fn test_get_respects_mask() {
        let f = field();
        assert_eq!(f.get(0), Some(0.0));
        assert_eq!(f.get(1), None);
        assert_eq!(f.get(9), None);
    }

    #[test]
    fn test_filled() {
        assert_eq!(field().filled(f64::NAN)[2], 1.0);
        assert!(field().filled(f64::NAN)[1].is_nan());
    }

    #[test]
    fn test_mean_error_skips_masked() {
        let mean = field().mean_error().unwrap();
        assert!((mean - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_empty() {
        let f = MaskedField::empty((1, 0));
        assert!(f.is_empty());
        assert_eq!(f.shape(), (1, 0));
        assert_eq!(f.mean_error(), None);
    }
}
