use std::collections::BTreeMap;

use cmap_invert::{Anchor, Colormap, Registry, Segmented, Stops, DEFAULT_XTOL};
use serde::Deserialize;

use crate::assets::AssetLoader;
use crate::error::{CatalogError, ParseColorError};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Fallbacks for command-line flags
    #[serde(default)]
    pub defaults: Defaults,

    /// Extra colormaps by name
    #[serde(default)]
    pub colormaps: BTreeMap<String, ColormapEntry>,
}

/// Default job parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Defaults {
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_target")]
    pub target: String,

    #[serde(default = "default_value_range")]
    pub value_range: (f64, f64),

    #[serde(default = "default_xtol")]
    pub xtol: f64,

    /// Recompress written PNGs with oxipng
    #[serde(default)]
    pub optimize: bool,
}

fn default_source() -> String {
    "jet".to_string()
}

fn default_target() -> String {
    "bone".to_string()
}

fn default_value_range() -> (f64, f64) {
    (0.0, 1.0)
}

fn default_xtol() -> f64 {
    DEFAULT_XTOL
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            source: default_source(),
            target: default_target(),
            value_range: default_value_range(),
            xtol: default_xtol(),
            optimize: false,
        }
    }
}

/// A colormap defined in the catalog
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColormapEntry {
    /// Hex colors, evenly spaced unless positions are given
    Stops {
        stops: Vec<String>,
        #[serde(default)]
        positions: Option<Vec<f64>>,
    },
    /// Per-channel `[x, below, above]` anchors
    Segments { segments: SegmentData },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SegmentData {
    pub red: Vec<[f64; 3]>,
    pub green: Vec<[f64; 3]>,
    pub blue: Vec<[f64; 3]>,
    #[serde(default)]
    pub alpha: Option<Vec<[f64; 3]>>,
}

impl ColormapEntry {
    /// Build the colormap this entry describes.
    pub fn to_colormap(&self, name: &str) -> Result<Colormap, CatalogError> {
        match self {
            ColormapEntry::Stops { stops, positions } => {
                let colors = stops
                    .iter()
                    .map(|s| {
                        parse_hex(s).map_err(|source| CatalogError::InvalidColor {
                            name: name.to_string(),
                            value: s.clone(),
                            source,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let stops = match positions {
                    Some(positions) => Stops::new(name, positions.clone(), colors, 1.0),
                    None => Stops::evenly(name, colors, 1.0),
                }
                .map_err(|e| CatalogError::entry(name, e))?;
                Ok(Colormap::new(name, stops))
            }
            ColormapEntry::Segments { segments } => {
                let anchors = |v: &[[f64; 3]]| -> Vec<Anchor> {
                    v.iter().copied().map(Anchor::from).collect()
                };
                let seg = Segmented::new(
                    name,
                    anchors(&segments.red),
                    anchors(&segments.green),
                    anchors(&segments.blue),
                    segments.alpha.as_deref().map(anchors),
                )
                .map_err(|e| CatalogError::entry(name, e))?;
                Ok(Colormap::new(name, seg))
            }
        }
    }
}

/// Parse a hex color into RGB channels in `0.0..=1.0`.
///
/// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive.
pub fn parse_hex(s: &str) -> Result<Vec<f64>, ParseColorError> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let d = s
        .chars()
        .map(|c| {
            c.to_digit(16)
                .map(|v| v as u8)
                .ok_or(ParseColorError::InvalidDigit(c))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    let bytes: [u8; 3] = match d.len() {
        // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
        3 => [d[0] * 17, d[1] * 17, d[2] * 17],
        6 => [(d[0] << 4) | d[1], (d[2] << 4) | d[3], (d[4] << 4) | d[5]],
        _ => return Err(ParseColorError::InvalidLength),
    };
    Ok(bytes.iter().map(|&b| f64::from(b) / 255.0).collect())
}

impl AppConfig {
    /// Parse a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from AssetLoader (external file or embedded)
    ///
    /// An unreadable or unparsable external file falls back to the embedded
    /// config; if even that fails, built-in defaults are used.
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string().map(|c| Self::from_yaml(&c)) {
            Ok(Ok(config)) => {
                tracing::info!(
                    colormaps = config.colormaps.len(),
                    source = %config.defaults.source,
                    target = %config.defaults.target,
                    "Loaded configuration"
                );
                return config;
            }
            Ok(Err(e)) => tracing::warn!(%e, "Failed to parse config, using embedded config"),
            Err(e) => tracing::warn!(%e, "Failed to read config, using embedded config"),
        }

        match AssetLoader::read_embedded_config_string().map(|c| Self::from_yaml(&c)) {
            Ok(Ok(config)) => config,
            Ok(Err(e)) => {
                tracing::warn!(%e, "Failed to parse embedded config, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to read embedded config, using defaults");
                Self::default()
            }
        }
    }

    /// Build the colormap registry: built-ins plus catalog entries.
    ///
    /// Catalog entries replace built-ins of the same name.
    pub fn build_registry(&self) -> Result<Registry, CatalogError> {
        let mut builder = Registry::builder().with_builtins();
        for (name, entry) in &self.colormaps {
            let cmap = entry.to_colormap(name)?;
            cmap.validate().map_err(|e| CatalogError::entry(name, e))?;
            tracing::debug!(name = %name, "Registered catalog colormap");
            builder = builder.insert(cmap);
        }
        Ok(builder.build())
    }

    /// Where a registered colormap name comes from, for listings.
    pub fn origin(&self, name: &str) -> &'static str {
        if self.colormaps.contains_key(name) {
            "config"
        } else {
            "builtin"
        }
    }
}
