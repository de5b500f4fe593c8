//! Tests for config loading and user-defined colormaps.

mod common;

use common::fixtures::{GRAY_RAMP, GRAY_RAMP_REVERSED};
use common::{assert_gray_levels, assert_png, TestDir};
use pretty_assertions::assert_eq;
use recolor::assets::{AssetLoader, ConfigSource};
use recolor::error::CatalogError;
use recolor::models::AppConfig;
use recolor::services::{ConvertRequest, RecolorService};

const RAMP_CONFIG: &str = r##"
defaults:
  source: ramp
  target: ramp_r
  xtol: 0.004

colormaps:
  ramp:
    stops: ["#000000", "#ffffff"]
"##;

#[test]
fn test_config_file_overrides_embedded() {
    let dir = TestDir::new();
    let path = dir.write_config(RAMP_CONFIG);
    let loader = AssetLoader::new(Some(path.clone()));

    assert_eq!(loader.config_source(), ConfigSource::File(path));

    let config = AppConfig::load_from_assets(&loader);
    assert_eq!(config.defaults.source, "ramp");
    assert_eq!(config.defaults.target, "ramp_r");
    assert_eq!(config.defaults.xtol, 0.004);
    // unset keys keep their defaults
    assert_eq!(config.defaults.value_range, (0.0, 1.0));
    assert!(!config.colormaps.contains_key("viridis"));
}

#[test]
fn test_missing_config_falls_back_to_embedded() {
    let dir = TestDir::new();
    let path = dir.path("nope.yaml");
    let loader = AssetLoader::new(Some(path.clone()));

    assert_eq!(loader.config_source(), ConfigSource::Missing(path));

    let config = AppConfig::load_from_assets(&loader);
    assert!(config.colormaps.contains_key("viridis"));
    assert_eq!(config.defaults.source, "jet");
}

#[test]
fn test_broken_config_falls_back_to_embedded() {
    let dir = TestDir::new();
    let path = dir.write_config("defaults: [this is not a mapping");

    let config = AppConfig::load_from_assets(&AssetLoader::new(Some(path)));
    assert!(config.colormaps.contains_key("magma"));
}

#[test]
fn test_catalog_colormap_used_by_defaults() {
    let dir = TestDir::new();
    let config_path = dir.write_config(RAMP_CONFIG);
    let config = AppConfig::load_from_assets(&AssetLoader::new(Some(config_path)));
    let service = RecolorService::new(&config).unwrap();

    assert_eq!(service.registry().get("ramp").unwrap().channels(), 3);
    assert_eq!(config.origin("ramp"), "config");
    assert_eq!(config.origin("bone"), "builtin");

    let input = dir.gray_ramp_rgb("in.png");
    let output = dir.path("out.png");
    let report = service
        .convert_file(&input, &output, &ConvertRequest::default())
        .unwrap();
    assert_eq!(report.masked, 0);

    let png = assert_png(&output, png::ColorType::Rgb, 2, 2);
    assert_gray_levels(&png, 3, &GRAY_RAMP_REVERSED);
}

#[test]
fn test_reversed_catalog_colormap_as_source() {
    let dir = TestDir::new();
    let config = AppConfig::from_yaml(RAMP_CONFIG).unwrap();
    let service = RecolorService::new(&config).unwrap();

    let input = dir.gray_ramp_rgb("in.png");
    let output = dir.path("out.png");
    service
        .convert_file(
            &input,
            &output,
            &ConvertRequest {
                source: Some("ramp_r".to_string()),
                target: Some("gray_r".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    // reversed on both sides cancels out
    let png = assert_png(&output, png::ColorType::Rgb, 2, 2);
    assert_gray_levels(&png, 3, &GRAY_RAMP);
}

#[test]
fn test_segment_colormap_entry() {
    let yaml = r#"
colormaps:
  redramp:
    segments:
      red:   [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]
      green: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]
      blue:  [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]
"#;
    let dir = TestDir::new();
    let config = AppConfig::from_yaml(yaml).unwrap();
    let service = RecolorService::new(&config).unwrap();

    let data: Vec<u8> = GRAY_RAMP.iter().flat_map(|&r| [r, 0, 0]).collect();
    let input = dir.write_png("in.png", 2, 2, png::ColorType::Rgb, &data);
    let output = dir.path("out.png");
    let report = service
        .convert_file(
            &input,
            &output,
            &ConvertRequest {
                source: Some("redramp".to_string()),
                target: Some("gray".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(report.masked, 0);

    let png = assert_png(&output, png::ColorType::Rgb, 2, 2);
    assert_gray_levels(&png, 3, &GRAY_RAMP);
}

#[test]
fn test_invalid_stop_color_is_rejected() {
    let config = AppConfig::from_yaml(
        r##"
colormaps:
  broken:
    stops: ["#000000", "#zzzzzz"]
"##,
    )
    .unwrap();

    match RecolorService::new(&config) {
        Err(CatalogError::InvalidColor { name, value, .. }) => {
            assert_eq!(name, "broken");
            assert_eq!(value, "#zzzzzz");
        }
        Err(other) => panic!("Unexpected error: {other}"),
        Ok(_) => panic!("Expected an invalid color error"),
    }
}

#[test]
fn test_init_writes_embedded_config() {
    let dir = TestDir::new();
    let target = dir.path("config.yaml");
    let loader = AssetLoader::new(Some(target.clone()));

    let report = loader.init(None, false).unwrap();
    assert_eq!(report.written.len(), 1);
    assert!(target.exists());

    // a second run leaves the file alone
    let report = loader.init(None, false).unwrap();
    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 1);

    let config = AppConfig::load_from_assets(&loader);
    assert!(config.colormaps.contains_key("bwr"));
}
