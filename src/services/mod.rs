pub mod recolor_service;

pub use recolor_service::{ConvertReport, ConvertRequest, InvertRequest, RecolorService};
