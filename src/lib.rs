//! recolor - re-render colormapped images through a different colormap
//!
//! The numerical work lives in the `cmap-invert` crate. This library adds
//! configuration, PNG I/O and file-to-file jobs, and is exposed for
//! integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
