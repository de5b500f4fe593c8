//! cmap-invert: numerical colormap inversion
//!
//! A colormap turns a scalar in `0.0..=1.0` into a color. This crate runs
//! that mapping backwards: it samples the colormap into a table, matches
//! each query color to its nearest sample and reports the sample position
//! as the recovered value. Colors that match nothing closely are masked,
//! never rejected.
//!
//! # Quick Start
//!
//! ```
//! use cmap_invert::{convert_color, Image, Registry};
//!
//! let registry = Registry::builtin();
//! let image = Image::from_rgb(
//!     2,
//!     1,
//!     &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
//! )
//! .unwrap();
//!
//! // Re-render a grayscale plot with the bone colormap.
//! let out = convert_color(&image, ("gray", "bone"), (0.0, 1.0), &registry).unwrap();
//! assert_eq!(out.pixel(1), &[1.0, 1.0, 1.0]);
//! ```
//!
//! # Matching
//!
//! With `xtol` the table holds `round(1 / xtol)` samples evenly spaced over
//! `0.0..=1.0`. Query and table colors are both divided by the colormap's
//! channel scale before comparison, so the distances (and the `10 * xtol`
//! mask threshold) do not depend on whether the colormap produces `0..=1`
//! or `0..=255` channels. Only the channels both sides have are compared:
//! an RGBA image can be matched against an RGB colormap and vice versa.
//! Ties go to the lowest sample index.
//!
//! # Value Scaling
//!
//! Matched positions are rescaled into the requested value range with
//! [`Normalizer`]. By default ([`ValueScaling::Batch`]) the fit covers the
//! positions selected by the whole query, so the darkest and brightest
//! matches in an image span the full range. A query whose matches all land
//! on one sample falls back to the fixed sample domain, which
//! [`ValueScaling::Domain`] uses unconditionally.

pub mod colormap;
pub mod error;
pub mod field;
pub mod image;
pub mod inverse;
pub mod normalize;
pub mod pipeline;
pub mod table;


pub use colormap::{
    Anchor, CmapSpec, ColorFunction, Colormap, Registry, RegistryBuilder, Segmented, Stops,
};
pub use error::InvertError;
pub use field::MaskedField;
pub use image::{Colors, Image};
pub use inverse::{
    InvertedColorMap, ValueScaling, DEFAULT_VALUE_RANGE, DEFAULT_XTOL, MASK_FACTOR, MAX_SAMPLES,
};
pub use normalize::{normalize, Normalizer};
pub use pipeline::{convert_color, Recolored, Recolorer};
pub use table::{linspace, SampleTable};
