//! Piecewise-linear color functions.
//!
//! [`Segmented`] follows the matplotlib `LinearSegmentedColormap` model: each
//! channel is described independently by anchors `(x, below, above)`, which
//! allows discontinuities where `below != above`. [`Stops`] is the simpler
//! "list of colors at positions" form used by most catalogs.

use super::ColorFunction;
use crate::error::InvertError;

/// One anchor of a segmented channel.
///
/// Approaching `x` from the left the channel tends to `below`; leaving `x`
/// to the right it starts at `above`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub below: f64,
    pub above: f64,
}

impl Anchor {
    pub const fn new(x: f64, below: f64, above: f64) -> Self {
        Self { x, below, above }
    }
}

impl From<[f64; 3]> for Anchor {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Segment data for each channel, producing RGBA colors in `0.0..=1.0`.
///
/// When no alpha segments are given the colormap is fully opaque.
#[derive(Debug, Clone)]
pub struct Segmented {
    channels: [Vec<Anchor>; 4],
}

const OPAQUE: [Anchor; 2] = [Anchor::new(0.0, 1.0, 1.0), Anchor::new(1.0, 1.0, 1.0)];

impl Segmented {
    /// Validate and build segment data.
    ///
    /// Every channel needs at least two anchors, the first at `x = 0` and the
    /// last at `x = 1`, with non-decreasing `x` and values in `0.0..=1.0`.
    pub fn new(
        name: &str,
        red: Vec<Anchor>,
        green: Vec<Anchor>,
        blue: Vec<Anchor>,
        alpha: Option<Vec<Anchor>>,
    ) -> Result<Self, InvertError> {
        let alpha = alpha.unwrap_or_else(|| OPAQUE.to_vec());
        let labelled = [
            ("red", &red),
            ("green", &green),
            ("blue", &blue),
            ("alpha", &alpha),
        ];
        for (label, anchors) in labelled {
            check_anchors(name, label, anchors)?;
        }
        Ok(Self {
            channels: [red, green, blue, alpha],
        })
    }
}

fn check_anchors(name: &str, label: &str, anchors: &[Anchor]) -> Result<(), InvertError> {
    if anchors.len() < 2 {
        return Err(InvertError::invalid(
            name,
            format!("{label} channel needs at least two anchors"),
        ));
    }
    if anchors[0].x != 0.0 || anchors[anchors.len() - 1].x != 1.0 {
        return Err(InvertError::invalid(
            name,
            format!("{label} channel must start at x=0 and end at x=1"),
        ));
    }
    if anchors.windows(2).any(|w| !(w[0].x <= w[1].x)) {
        return Err(InvertError::invalid(
            name,
            format!("{label} channel anchors must have non-decreasing x"),
        ));
    }
    let in_unit = |v: f64| (0.0..=1.0).contains(&v);
    if anchors.iter().any(|a| !in_unit(a.below) || !in_unit(a.above)) {
        return Err(InvertError::invalid(
            name,
            format!("{label} channel values must lie in 0..=1"),
        ));
    }
    Ok(())
}

/// Evaluate one segmented channel at `t` in `0.0..=1.0`.
fn eval_channel(anchors: &[Anchor], t: f64) -> f64 {
    // Number of anchors at or left of t; at least 1 since anchors[0].x == 0.
    let k = anchors.partition_point(|a| a.x <= t);
    if k >= anchors.len() {
        return anchors[anchors.len() - 1].below;
    }
    let lo = anchors[k.max(1) - 1];
    let hi = anchors[k];
    let span = hi.x - lo.x;
    if span <= 0.0 {
        return hi.below;
    }
    lo.above + (hi.below - lo.above) * (t - lo.x) / span
}

impl ColorFunction for Segmented {
    fn channels(&self) -> usize {
        4
    }

    fn eval_into(&self, t: f64, out: &mut [f64]) {
        for (value, anchors) in out.iter_mut().zip(&self.channels) {
            *value = eval_channel(anchors, t);
        }
    }
}

/// Linear interpolation between colored stops.
#[derive(Debug, Clone)]
pub struct Stops {
    positions: Vec<f64>,
    colors: Vec<Vec<f64>>,
    channels: usize,
    scale: f64,
}

impl Stops {
    /// Build stops from explicit positions.
    ///
    /// Needs at least two stops, positions starting at 0, ending at 1 and
    /// non-decreasing, and every color with the same 3 or 4 channels.
    pub fn new(
        name: &str,
        positions: Vec<f64>,
        colors: Vec<Vec<f64>>,
        scale: f64,
    ) -> Result<Self, InvertError> {
        if colors.len() < 2 {
            return Err(InvertError::invalid(name, "at least two color stops are required"));
        }
        if positions.len() != colors.len() {
            return Err(InvertError::invalid(
                name,
                format!(
                    "{} positions given for {} colors",
                    positions.len(),
                    colors.len()
                ),
            ));
        }
        if positions[0] != 0.0 || positions[positions.len() - 1] != 1.0 {
            return Err(InvertError::invalid(name, "stop positions must start at 0 and end at 1"));
        }
        if positions.windows(2).any(|w| !(w[0] <= w[1])) {
            return Err(InvertError::invalid(name, "stop positions must be non-decreasing"));
        }
        let channels = colors[0].len();
        if colors.iter().any(|c| c.len() != channels) {
            return Err(InvertError::invalid(name, "all stops must have the same channel count"));
        }
        Ok(Self {
            positions,
            colors,
            channels,
            scale,
        })
    }

    /// Build stops spread evenly over `0.0..=1.0`.
    pub fn evenly(name: &str, colors: Vec<Vec<f64>>, scale: f64) -> Result<Self, InvertError> {
        let last = colors.len().saturating_sub(1).max(1) as f64;
        let positions = (0..colors.len()).map(|i| i as f64 / last).collect();
        Self::new(name, positions, colors, scale)
    }
}

impl ColorFunction for Stops {
    fn channels(&self) -> usize {
        self.channels
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn eval_into(&self, t: f64, out: &mut [f64]) {
        let k = self.positions.partition_point(|&p| p <= t);
        if k >= self.positions.len() {
            out.copy_from_slice(&self.colors[self.colors.len() - 1]);
            return;
        }
        let lo = k.max(1) - 1;
        let span = self.positions[k] - self.positions[lo];
        let frac = if span > 0.0 {
            (t - self.positions[lo]) / span
        } else {
            1.0
        };
        for ((value, &a), &b) in out.iter_mut().zip(&self.colors[lo]).zip(&self.colors[k]) {
            *value = a + (b - a) * frac;
        }
    }
}
