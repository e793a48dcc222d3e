//! Merging presets, colorways and watermarks into one resolved style.
//!
//! Resolution starts from the mode's built-in table, overlays every field
//! the preset sets, then overlays explicit colorway and watermark overrides.
//! The merged result is validated as a whole before it is returned.

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::style::colorway::Colorway;
use crate::style::layout::{LegendPosition, TitleAlignment};
use crate::style::preset::{FontSizes, Mode, Preset};
use crate::style::validate;
use crate::style::watermark::WatermarkSpec;

/// The preset to resolve: a registered name or a preset value.
#[derive(Debug, Clone, PartialEq)]
pub enum PresetSource {
    /// Looked up in the registry.
    Named(String),
    /// Used as-is.
    Preset(Preset),
}

impl From<&str> for PresetSource {
    fn from(name: &str) -> Self {
        PresetSource::Named(name.to_string())
    }
}

impl From<String> for PresetSource {
    fn from(name: String) -> Self {
        PresetSource::Named(name)
    }
}

impl From<Mode> for PresetSource {
    fn from(mode: Mode) -> Self {
        PresetSource::Named(mode.name().to_string())
    }
}

impl From<Preset> for PresetSource {
    fn from(preset: Preset) -> Self {
        PresetSource::Preset(preset)
    }
}

/// A colorway reference: a registered name or an inline definition.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorwaySource {
    /// Looked up in the registry.
    Named(String),
    /// Used as-is.
    Inline(Colorway),
}

impl From<&str> for ColorwaySource {
    fn from(name: &str) -> Self {
        ColorwaySource::Named(name.to_string())
    }
}

impl From<String> for ColorwaySource {
    fn from(name: String) -> Self {
        ColorwaySource::Named(name)
    }
}

impl From<Colorway> for ColorwaySource {
    fn from(colorway: Colorway) -> Self {
        ColorwaySource::Inline(colorway)
    }
}

/// A watermark override: bare text or a full specification.
#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkSource {
    /// Promoted to a default text watermark.
    Text(String),
    /// Used as-is.
    Spec(WatermarkSpec),
}

impl WatermarkSource {
    /// Converts to a full specification.
    #[must_use]
    pub fn into_spec(self) -> WatermarkSpec {
        match self {
            WatermarkSource::Text(text) => WatermarkSpec::text(text),
            WatermarkSource::Spec(spec) => spec,
        }
    }
}

impl From<&str> for WatermarkSource {
    fn from(text: &str) -> Self {
        WatermarkSource::Text(text.to_string())
    }
}

impl From<String> for WatermarkSource {
    fn from(text: String) -> Self {
        WatermarkSource::Text(text)
    }
}

impl From<WatermarkSpec> for WatermarkSource {
    fn from(spec: WatermarkSpec) -> Self {
        WatermarkSource::Spec(spec)
    }
}

/// A fully merged, validated style. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    preset_name: String,
    mode: Mode,
    figure_size: (f64, f64),
    dpi: u32,
    font_family: String,
    font_sizes: FontSizes,
    line_width: f64,
    marker_size: f64,
    colorway: Colorway,
    watermark: Option<WatermarkSpec>,
    title_alignment: TitleAlignment,
    legend_position: LegendPosition,
}

impl ResolvedStyle {
    /// Name of the preset this style came from.
    #[must_use]
    pub fn preset_name(&self) -> &str {
        &self.preset_name
    }

    /// Publication mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Width and height in inches.
    #[must_use]
    pub fn figure_size(&self) -> (f64, f64) {
        self.figure_size
    }

    /// Dots per inch.
    #[must_use]
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Font family.
    #[must_use]
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Font sizes in points.
    #[must_use]
    pub fn font_sizes(&self) -> FontSizes {
        self.font_sizes
    }

    /// Line width in points.
    #[must_use]
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Marker size in points.
    #[must_use]
    pub fn marker_size(&self) -> f64 {
        self.marker_size
    }

    /// Resolved colorway.
    #[must_use]
    pub fn colorway(&self) -> &Colorway {
        &self.colorway
    }

    /// Watermark, if any.
    #[must_use]
    pub fn watermark(&self) -> Option<&WatermarkSpec> {
        self.watermark.as_ref()
    }

    /// Title alignment.
    #[must_use]
    pub fn title_alignment(&self) -> TitleAlignment {
        self.title_alignment
    }

    /// Legend position.
    #[must_use]
    pub fn legend_position(&self) -> LegendPosition {
        self.legend_position
    }
}

/// Resolves styles against one registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a Registry,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver reading from `registry`.
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Merges `preset` with the optional overrides.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownPreset`] or [`Error::UnknownColorway`] for names not
    /// in the registry, [`Error::ConfigValidation`] naming the first invalid
    /// field of the merged style.
    pub fn resolve(
        &self,
        preset: impl Into<PresetSource>,
        colorway: Option<ColorwaySource>,
        watermark: Option<WatermarkSource>,
    ) -> Result<ResolvedStyle> {
        let preset = match preset.into() {
            PresetSource::Preset(preset) => preset,
            PresetSource::Named(name) => match self.registry.preset(&name) {
                Some(preset) => preset.clone(),
                None => {
                    return Err(Error::UnknownPreset {
                        name,
                        available: self.registry.preset_names(),
                    })
                }
            },
        };

        let defaults = preset.mode.defaults();
        let colorway_source = colorway
            .or_else(|| preset.colorway.clone())
            .unwrap_or_else(|| ColorwaySource::Named(defaults.colorway.to_string()));
        let colorway = self.colorway(colorway_source)?;
        let watermark = watermark
            .map(WatermarkSource::into_spec)
            .or_else(|| preset.watermark.clone());

        let style = &preset.style;
        let resolved = ResolvedStyle {
            mode: preset.mode,
            figure_size: style.figure_size.unwrap_or(defaults.figure_size),
            dpi: style.dpi.unwrap_or(defaults.dpi),
            font_family: style
                .font_family
                .clone()
                .unwrap_or_else(|| defaults.font_family.to_string()),
            font_sizes: style.font_sizes.apply_to(defaults.font_sizes),
            line_width: style.line_width.unwrap_or(defaults.line_width),
            marker_size: style.marker_size.unwrap_or(defaults.marker_size),
            title_alignment: style.title_alignment.unwrap_or(defaults.title_alignment),
            legend_position: style.legend_position.unwrap_or(defaults.legend_position),
            colorway,
            watermark,
            preset_name: preset.name,
        };

        validate::ensure(&validate::validate_resolved(&resolved))?;
        crate::debug!(
            "resolve",
            "preset '{}' ({}) colorway '{}' watermark {}",
            resolved.preset_name,
            resolved.mode,
            resolved.colorway.name,
            if resolved.watermark.is_some() { "on" } else { "off" }
        );
        Ok(resolved)
    }

    /// Resolves a [`StyleRequest`].
    pub fn resolve_request(&self, request: &StyleRequest) -> Result<ResolvedStyle> {
        self.resolve(
            request.preset.clone(),
            request.colorway.clone(),
            request.watermark.clone(),
        )
    }

    fn colorway(&self, source: ColorwaySource) -> Result<Colorway> {
        match source {
            ColorwaySource::Inline(colorway) => Ok(colorway),
            ColorwaySource::Named(name) => match self.registry.colorway(&name) {
                Some(colorway) => Ok(colorway.clone()),
                None => Err(Error::UnknownColorway {
                    name,
                    available: self.registry.colorway_names(),
                }),
            },
        }
    }
}

/// Builder for a resolution request.
///
/// ```
/// use sane_figs::style::StyleRequest;
///
/// let style = StyleRequest::new("article")
///     .colorway("colorblind-safe")
///     .watermark("(c) 2025 My Lab")
///     .resolve()
///     .unwrap();
/// assert_eq!(style.dpi(), 300);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRequest {
    preset: PresetSource,
    colorway: Option<ColorwaySource>,
    watermark: Option<WatermarkSource>,
}

impl StyleRequest {
    /// Starts a request for `preset`.
    pub fn new(preset: impl Into<PresetSource>) -> Self {
        Self {
            preset: preset.into(),
            colorway: None,
            watermark: None,
        }
    }

    /// Overrides the colorway.
    #[must_use]
    pub fn colorway(mut self, colorway: impl Into<ColorwaySource>) -> Self {
        self.colorway = Some(colorway.into());
        self
    }

    /// Overrides the watermark.
    #[must_use]
    pub fn watermark(mut self, watermark: impl Into<WatermarkSource>) -> Self {
        self.watermark = Some(watermark.into());
        self
    }

    /// Resolves against the process-wide registry.
    pub fn resolve(&self) -> Result<ResolvedStyle> {
        let registry = crate::registry::read();
        Resolver::new(&registry).resolve_request(self)
    }

    /// Resolves against `registry`.
    pub fn resolve_with(&self, registry: &Registry) -> Result<ResolvedStyle> {
        Resolver::new(registry).resolve_request(self)
    }
}

/// Resolves against the process-wide registry.
///
/// ```
/// let style = sane_figs::style::resolve("presentation", None, None).unwrap();
/// assert_eq!(style.dpi(), 150);
/// ```
pub fn resolve(
    preset: impl Into<PresetSource>,
    colorway: Option<ColorwaySource>,
    watermark: Option<WatermarkSource>,
) -> Result<ResolvedStyle> {
    let registry = crate::registry::read();
    Resolver::new(&registry).resolve(preset, colorway, watermark)
}
