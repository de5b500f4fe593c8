//! Built-in colormaps (matplotlib segment data, evaluated continuously).

use super::segmented::{Anchor, Segmented};
use super::Colormap;

const fn a(x: f64, below: f64, above: f64) -> Anchor {
    Anchor::new(x, below, above)
}

const JET_R: &[Anchor] = &[
    a(0.0, 0.0, 0.0),
    a(0.35, 0.0, 0.0),
    a(0.66, 1.0, 1.0),
    a(0.89, 1.0, 1.0),
    a(1.0, 0.5, 0.5),
];
const JET_G: &[Anchor] = &[
    a(0.0, 0.0, 0.0),
    a(0.125, 0.0, 0.0),
    a(0.375, 1.0, 1.0),
    a(0.64, 1.0, 1.0),
    a(0.91, 0.0, 0.0),
    a(1.0, 0.0, 0.0),
];
const JET_B: &[Anchor] = &[
    a(0.0, 0.5, 0.5),
    a(0.11, 1.0, 1.0),
    a(0.34, 1.0, 1.0),
    a(0.65, 0.0, 0.0),
    a(1.0, 0.0, 0.0),
];

const BONE_R: &[Anchor] = &[
    a(0.0, 0.0, 0.0),
    a(0.746032, 0.652778, 0.652778),
    a(1.0, 1.0, 1.0),
];
const BONE_G: &[Anchor] = &[
    a(0.0, 0.0, 0.0),
    a(0.365079, 0.319444, 0.319444),
    a(0.746032, 0.777778, 0.777778),
    a(1.0, 1.0, 1.0),
];
const BONE_B: &[Anchor] = &[
    a(0.0, 0.0, 0.0),
    a(0.365079, 0.444444, 0.444444),
    a(1.0, 1.0, 1.0),
];

const HOT_R: &[Anchor] = &[
    a(0.0, 0.0416, 0.0416),
    a(0.365079, 1.0, 1.0),
    a(1.0, 1.0, 1.0),
];
const HOT_G: &[Anchor] = &[
    a(0.0, 0.0, 0.0),
    a(0.365079, 0.0, 0.0),
    a(0.746032, 1.0, 1.0),
    a(1.0, 1.0, 1.0),
];
const HOT_B: &[Anchor] = &[a(0.0, 0.0, 0.0), a(0.746032, 0.0, 0.0), a(1.0, 1.0, 1.0)];

const COPPER_R: &[Anchor] = &[a(0.0, 0.0, 0.0), a(0.809524, 1.0, 1.0), a(1.0, 1.0, 1.0)];
const COPPER_G: &[Anchor] = &[a(0.0, 0.0, 0.0), a(1.0, 0.7812, 0.7812)];
const COPPER_B: &[Anchor] = &[a(0.0, 0.0, 0.0), a(1.0, 0.4975, 0.4975)];

const UP: &[Anchor] = &[a(0.0, 0.0, 0.0), a(1.0, 1.0, 1.0)];
const DOWN: &[Anchor] = &[a(0.0, 1.0, 1.0), a(1.0, 0.0, 0.0)];
const ZERO: &[Anchor] = &[a(0.0, 0.0, 0.0), a(1.0, 0.0, 0.0)];
const ONE: &[Anchor] = &[a(0.0, 1.0, 1.0), a(1.0, 1.0, 1.0)];
const HALF_UP: &[Anchor] = &[a(0.0, 0.5, 0.5), a(1.0, 1.0, 1.0)];
const HALF_DOWN: &[Anchor] = &[a(0.0, 1.0, 1.0), a(1.0, 0.5, 0.5)];
const FORTY: &[Anchor] = &[a(0.0, 0.4, 0.4), a(1.0, 0.4, 0.4)];

type Channels = (&'static [Anchor], &'static [Anchor], &'static [Anchor]);

const BUILTINS: &[(&str, Channels)] = &[
    ("autumn", (ONE, UP, ZERO)),
    ("binary", (DOWN, DOWN, DOWN)),
    ("bone", (BONE_R, BONE_G, BONE_B)),
    ("cool", (UP, DOWN, ONE)),
    ("copper", (COPPER_R, COPPER_G, COPPER_B)),
    ("gray", (UP, UP, UP)),
    ("hot", (HOT_R, HOT_G, HOT_B)),
    ("jet", (JET_R, JET_G, JET_B)),
    ("spring", (ONE, UP, DOWN)),
    ("summer", (UP, HALF_UP, FORTY)),
    ("winter", (ZERO, UP, HALF_DOWN)),
];

/// All built-in colormaps, in name order.
pub(crate) fn all() -> Vec<Colormap> {
    BUILTINS
        .iter()
        .filter_map(|&(name, (r, g, b))| {
            // Static data, validated by the tests below.
            Segmented::new(name, r.to_vec(), g.to_vec(), b.to_vec(), None)
                .ok()
                .map(|seg| Colormap::new(name, seg))
        })
        .collect()
}
