//! Immutable name → colormap mapping and colormap resolution.

use std::collections::BTreeMap;

use super::{builtin, Colormap};
use crate::error::InvertError;

/// Suffix selecting the reversed variant of a registered colormap.
const REVERSED_SUFFIX: &str = "_r";

/// A colormap identifier: either a registry name or a colormap value.
#[derive(Debug, Clone)]
pub enum CmapSpec {
    /// Look the colormap up by name.
    Name(String),
    /// Use this colormap directly.
    Function(Colormap),
}

impl From<&str> for CmapSpec {
    fn from(name: &str) -> Self {
        CmapSpec::Name(name.to_string())
    }
}

impl From<String> for CmapSpec {
    fn from(name: String) -> Self {
        CmapSpec::Name(name)
    }
}

impl From<Colormap> for CmapSpec {
    fn from(cmap: Colormap) -> Self {
        CmapSpec::Function(cmap)
    }
}

impl From<&Colormap> for CmapSpec {
    fn from(cmap: &Colormap) -> Self {
        CmapSpec::Function(cmap.clone())
    }
}

/// An immutable, deterministic mapping from names to colormaps.
///
/// Built once (from [`Registry::builtin()`] or a [`RegistryBuilder`]) and
/// passed explicitly wherever names must be resolved.
///
/// # Example
///
/// ```
/// use cmap_invert::{Colormap, InvertError, Registry};
///
/// let ramp = Colormap::from_fn("ramp", 3, 1.0, |t, out| out.fill(t));
/// let registry = Registry::builder().with_builtins().insert(ramp).build();
///
/// assert!(registry.resolve("ramp").is_ok());
/// assert!(registry.resolve("jet_r").is_ok());
/// assert!(matches!(
///     registry.resolve("nope"),
///     Err(InvertError::NotFound { .. })
/// ));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, Colormap>,
}

impl Registry {
    /// A registry holding only the built-in colormaps.
    pub fn builtin() -> Self {
        Self::builder().with_builtins().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up a colormap by exact name.
    pub fn get(&self, name: &str) -> Option<&Colormap> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Registered colormaps in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Colormap> {
        self.entries.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a colormap identifier into a validated colormap.
    ///
    /// Names are looked up exactly; `<name>_r` resolves to the reversed
    /// `<name>` when only the base is registered. Colormap values are used
    /// as given. Either way the result must pass [`Colormap::validate()`].
    ///
    /// # Errors
    ///
    /// - [`InvertError::NotFound`] for an unknown name
    /// - [`InvertError::InvalidColorFunction`] when validation fails
    pub fn resolve(&self, spec: impl Into<CmapSpec>) -> Result<Colormap, InvertError> {
        let cmap = match spec.into() {
            CmapSpec::Name(name) => self.lookup(&name)?,
            CmapSpec::Function(cmap) => cmap,
        };
        cmap.validate()?;
        Ok(cmap)
    }

    fn lookup(&self, name: &str) -> Result<Colormap, InvertError> {
        if let Some(cmap) = self.entries.get(name) {
            return Ok(cmap.clone());
        }
        name.strip_suffix(REVERSED_SUFFIX)
            .and_then(|base| self.entries.get(base))
            .map(Colormap::reversed)
            .ok_or_else(|| InvertError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Builder for [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<String, Colormap>,
}

impl RegistryBuilder {
    /// Add all built-in colormaps.
    pub fn with_builtins(mut self) -> Self {
        for cmap in builtin::all() {
            self.entries.insert(cmap.name().to_string(), cmap);
        }
        self
    }

    /// Add a colormap under its own name, replacing any previous entry.
    pub fn insert(mut self, cmap: Colormap) -> Self {
        if self.entries.contains_key(cmap.name()) {
            tracing::debug!(name = cmap.name(), "Replacing registered colormap");
        }
        self.entries.insert(cmap.name().to_string(), cmap);
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}
