//! Discrete samples of a colormap and nearest-color lookup.

use crate::colormap::Colormap;
use crate::error::InvertError;

/// `n` evenly spaced values over `0.0..=1.0`, both ends included.
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|i| i as f64 / last).collect()
        }
    }
}

/// A colormap sampled at evenly spaced positions.
///
/// `y` holds the colors in the colormap's own channel scale. A copy divided
/// by the scale is kept for distance computations so matching always happens
/// in unit channel space.
#[derive(Debug, Clone)]
pub struct SampleTable {
    x: Vec<f64>,
    y: Vec<f64>,
    unit: Vec<f64>,
    channels: usize,
    scale: f64,
}

impl SampleTable {
    /// Sample `cmap` at `n` evenly spaced positions.
    ///
    /// # Errors
    ///
    /// [`InvertError::Precondition`] when fewer than two samples are requested.
    pub fn sample(cmap: &Colormap, n: usize) -> Result<Self, InvertError> {
        if n < 2 {
            return Err(InvertError::Precondition(format!(
                "a sample table needs at least 2 samples, got {n}"
            )));
        }
        let x = linspace(n);
        let y = cmap.colors(&x);
        let scale = cmap.scale();
        let unit = y.iter().map(|v| v / scale).collect();
        Ok(Self {
            x,
            y,
            unit,
            channels: cmap.channels(),
            scale,
        })
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Sample positions, strictly increasing from 0 to 1.
    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Sampled colors, flat with a trailing channel axis.
    #[inline]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The sampled color at index `i`.
    #[inline]
    pub fn color(&self, i: usize) -> &[f64] {
        &self.y[i * self.channels..(i + 1) * self.channels]
    }

    /// Index and Euclidean distance of the sample nearest to `query`.
    ///
    /// `query` is in the colormap's channel scale. Only the first
    /// `min(query.len(), channels)` channels are compared, after both sides
    /// are divided by the scale. The earliest index wins ties. A query that
    /// cannot be compared (NaN channels) reports index 0 at infinite distance.
    pub fn nearest(&self, query: &[f64]) -> (usize, f64) {
        let k = query.len().min(self.channels);
        let inv = 1.0 / self.scale;

        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;

        for (i, sample) in self.unit.chunks_exact(self.channels).enumerate() {
            let dist: f64 = query[..k]
                .iter()
                .zip(&sample[..k])
                .map(|(&q, &s)| {
                    let d = q * inv - s;
                    d * d
                })
                .sum();
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray255() -> Colormap {
        Colormap::from_fn("gray255", 3, 255.0, |t, out| out.fill(255.0 * t))
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2), vec![0.0, 1.0]);
        assert!(linspace(0).is_empty());
    }

    #[test]
    fn test_sample_shape() {
        let table = SampleTable::sample(&gray255(), 255).unwrap();
        assert_eq!(table.len(), 255);
        assert_eq!(table.y().len(), 255 * 3);
        assert_eq!(table.x()[0], 0.0);
        assert_eq!(table.x()[254], 1.0);
        assert!(table.x().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(table.color(254), &[255.0, 255.0, 255.0]);
    }

    #[test]
    fn test_sample_needs_two() {
        assert!(matches!(
            SampleTable::sample(&gray255(), 1),
            Err(InvertError::Precondition(_))
        ));
    }

    #[test]
    fn test_nearest_exact_sample() {
        let table = SampleTable::sample(&gray255(), 5).unwrap();
        let (idx, dist) = table.nearest(&[127.5, 127.5, 127.5]);
        assert_eq!(idx, 2);
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_nearest_distance_is_in_unit_space() {
        let table = SampleTable::sample(&gray255(), 2).unwrap();
        let (idx, dist) = table.nearest(&[255.0, 0.0, 0.0]);
        assert_eq!(idx, 0);
        assert!((dist - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_first_minimum_wins() {
        // 0.25 is equidistant from samples 0.0 and 0.5.
        let gray = Colormap::from_fn("gray", 3, 1.0, |t, out| out.fill(t));
        let table = SampleTable::sample(&gray, 3).unwrap();
        let (idx, dist) = table.nearest(&[0.25, 0.25, 0.25]);
        assert_eq!(idx, 0);
        assert_eq!(table.nearest(&[0.25, 0.25, 0.25]), (idx, dist));
    }

    #[test]
    fn test_nearest_ignores_extra_channels() {
        let table = SampleTable::sample(&gray255(), 3).unwrap();
        let (idx, dist) = table.nearest(&[255.0, 255.0, 255.0, 0.0]);
        assert_eq!(idx, 2);
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_nearest_nan_is_infinite() {
        let table = SampleTable::sample(&gray255(), 3).unwrap();
        let (idx, dist) = table.nearest(&[f64::NAN, 0.0, 0.0]);
        assert_eq!(idx, 0);
        assert!(dist.is_infinite());
    }
}
