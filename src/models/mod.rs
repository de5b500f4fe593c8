pub mod config;

pub use config::{parse_hex, AppConfig, ColormapEntry, Defaults, SegmentData};
