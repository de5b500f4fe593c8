use std::fs;
use std::path::Path;

use cmap_invert::{Image, InvertedColorMap, MaskedField, Recolorer, Registry};
use serde::Serialize;

use crate::error::{CatalogError, CodecError, RecolorError};
use crate::models::{AppConfig, Defaults};
use crate::rendering::{encode_value_field, optimize_png, read_image, write_image};

/// Parameters for a recolor job; `None` falls back to the config defaults.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    pub source: Option<String>,
    pub target: Option<String>,
    pub value_range: Option<(f64, f64)>,
    pub xtol: Option<f64>,
    pub optimize: Option<bool>,
}

/// Parameters for a value-field export job.
#[derive(Debug, Clone, Default)]
pub struct InvertRequest {
    pub cmap: Option<String>,
    pub value_range: Option<(f64, f64)>,
    pub xtol: Option<f64>,
    pub optimize: Option<bool>,
}

/// Summary of a finished job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertReport {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    /// Pixels matched by the source colormap
    pub valid: usize,
    /// Pixels left unchanged (or transparent in a value field)
    pub masked: usize,
    /// Mean color distance over matched pixels
    pub mean_error: Option<f64>,
    /// Size of the written file
    pub bytes: usize,
}

impl ConvertReport {
    fn new(image: &Image, values: &MaskedField, bytes: usize) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            channels: image.channels(),
            valid: values.valid_count(),
            masked: values.masked_count(),
            mean_error: values.mean_error(),
            bytes,
        }
    }
}

/// Runs file-to-file recolor jobs against one colormap registry
pub struct RecolorService {
    registry: Registry,
    defaults: Defaults,
}

impl RecolorService {
    /// Build the registry from the config's catalog
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        Ok(Self::with_registry(
            config.build_registry()?,
            config.defaults.clone(),
        ))
    }

    pub fn with_registry(registry: Registry, defaults: Defaults) -> Self {
        Self { registry, defaults }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Read `input`, recolor it from the source to the target colormap and
    /// write the result to `output`.
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        request: &ConvertRequest,
    ) -> Result<ConvertReport, RecolorError> {
        let source = request.source.as_deref().unwrap_or(&self.defaults.source);
        let target = request.target.as_deref().unwrap_or(&self.defaults.target);
        let value_range = request.value_range.unwrap_or(self.defaults.value_range);
        let xtol = request.xtol.unwrap_or(self.defaults.xtol);
        let optimize = request.optimize.unwrap_or(self.defaults.optimize);

        tracing::info!(
            input = %input.display(),
            source,
            target,
            xtol,
            "Converting image"
        );

        let recolorer = Recolorer::new(&self.registry, source, target)?
            .value_range(value_range)
            .xtol(xtol);
        let scale = recolorer.source().scale();
        let image = read_image(input)?.map(|v| v * scale);

        let recolored = recolorer.recolor(&image)?;
        let bytes = write_image(&recolored.image, output, scale, optimize)?;

        let report = ConvertReport::new(&recolored.image, &recolored.values, bytes);
        tracing::info!(
            output = %output.display(),
            valid = report.valid,
            masked = report.masked,
            "Wrote recolored image"
        );
        Ok(report)
    }

    /// Read `input`, recover its value field through a colormap and write
    /// the field as a gray+alpha PNG to `output`.
    pub fn invert_file(
        &self,
        input: &Path,
        output: &Path,
        request: &InvertRequest,
    ) -> Result<ConvertReport, RecolorError> {
        let cmap = request.cmap.as_deref().unwrap_or(&self.defaults.source);
        let value_range = request.value_range.unwrap_or(self.defaults.value_range);
        let xtol = request.xtol.unwrap_or(self.defaults.xtol);
        let optimize = request.optimize.unwrap_or(self.defaults.optimize);

        tracing::info!(input = %input.display(), cmap, xtol, "Inverting image");

        let inverse = InvertedColorMap::new(&self.registry, cmap, value_range, xtol)?;
        let scale = inverse.colormap().scale();
        let image = read_image(input)?.map(|v| v * scale);
        let values = inverse.values(&image)?;

        let mut png_bytes = encode_value_field(&values, value_range)?;
        if optimize {
            png_bytes = optimize_png(png_bytes);
        }
        fs::write(output, &png_bytes).map_err(CodecError::from)?;

        let report = ConvertReport::new(&image, &values, png_bytes.len());
        tracing::info!(
            output = %output.display(),
            valid = report.valid,
            masked = report.masked,
            "Wrote value field"
        );
        Ok(report)
    }
}
