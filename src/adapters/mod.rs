//! Library adapters.
//!
//! An [`Adapter`] translates a [`ResolvedStyle`] into the configuration keys
//! of one plotting library and places watermarks on that library's figures.
//! Every `apply` records the prior value of each key it touches so the
//! session can undo exactly what it changed.
//!
//! Optional library features are gated by a declarative capability table of
//! `(Feature, minimum version)` pairs. A library whose version cannot be read
//! gets no optional features and takes the fallback path everywhere.

pub mod altair;
pub mod figure;
pub mod matplotlib;
pub mod plotly;
pub mod seaborn;

pub use altair::Altair;
pub use figure::{
    CoordinateSpace, DecodedImage, Figure, Mark, Overlay, OverlayContent, TextOverlay,
};
pub use matplotlib::Matplotlib;
pub use plotly::Plotly;
pub use seaborn::Seaborn;

use crate::error::Result;
use crate::library::{ConfigSurface, Library, ParamValue};
use crate::style::colorway::{Colorway, PaletteKind};
use crate::style::watermark::WatermarkSpec;
use crate::style::ResolvedStyle;
use crate::version::{Version, VersionInfo};
use std::fmt;

// ============================================================================
// Capabilities
// ============================================================================

/// Optional behavior that depends on the library version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// matplotlib `axes.prop_cycle` (else `axes.color_cycle`).
    PropCycle,
    /// matplotlib `figure.constrained_layout.use` (else `figure.autolayout`).
    ConstrainedLayout,
    /// matplotlib `legend.title_fontsize`.
    LegendTitleFontSize,
    /// matplotlib `axes.titlelocation`.
    TitleLocation,
    /// matplotlib colormap registry.
    ColormapRegistry,
    /// matplotlib `outside ...` legend locations.
    OutsideLegendLoc,
    /// seaborn `font` theme parameter.
    ThemeFontParam,
    /// seaborn objects interface theme.
    ObjectsTheme,
    /// plotly `templates.default`.
    TemplateDefault,
    /// plotly `xaxis.title.font` (else `xaxis.titlefont`).
    NestedTitleFont,
    /// plotly layout colorscales.
    LayoutColorscale,
    /// plotly `legend.title.font`.
    LegendTitleFont,
    /// altair `continuousWidth` / `continuousHeight`.
    ContinuousViewSize,
    /// altair `theme.enabled` (else `themes.active`).
    ThemeDecorator,
}

impl Feature {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Feature::PropCycle => "prop_cycle",
            Feature::ConstrainedLayout => "constrained_layout",
            Feature::LegendTitleFontSize => "legend_title_fontsize",
            Feature::TitleLocation => "title_location",
            Feature::ColormapRegistry => "colormap_registry",
            Feature::OutsideLegendLoc => "outside_legend_loc",
            Feature::ThemeFontParam => "theme_font_param",
            Feature::ObjectsTheme => "objects_theme",
            Feature::TemplateDefault => "template_default",
            Feature::NestedTitleFont => "nested_title_font",
            Feature::LayoutColorscale => "layout_colorscale",
            Feature::LegendTitleFont => "legend_title_font",
            Feature::ContinuousViewSize => "continuous_view_size",
            Feature::ThemeDecorator => "theme_decorator",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum library version for each optional feature.
pub type CapabilityTable = &'static [(Feature, Version)];

/// Features enabled for one detected library version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    enabled: Vec<Feature>,
}

impl Capabilities {
    /// No optional features.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Evaluates `table` against `info`.
    #[must_use]
    pub fn compute(table: CapabilityTable, info: &VersionInfo) -> Self {
        Self {
            enabled: table
                .iter()
                .filter(|(_, min)| info.at_least(*min))
                .map(|(feature, _)| *feature)
                .collect(),
        }
    }

    /// Returns true if `feature` is enabled.
    #[must_use]
    pub fn has(&self, feature: Feature) -> bool {
        self.enabled.contains(&feature)
    }

    /// Enabled features in table order.
    #[must_use]
    pub fn enabled(&self) -> &[Feature] {
        &self.enabled
    }
}

// ============================================================================
// Writes and undo tokens
// ============================================================================

/// Ordered configuration writes; a repeated key replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamWrites {
    entries: Vec<(String, ParamValue)>,
}

impl ParamWrites {
    /// No writes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the write for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value written to `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if `key` is written.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Written keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for ParamWrites {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Undo token for one `apply`: the prior value of every key written.
///
/// `None` means the key was unset before.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedHandle {
    library: Library,
    prior: Vec<(String, Option<ParamValue>)>,
}

impl AppliedHandle {
    /// Token for an `apply` that changed nothing.
    #[must_use]
    pub fn empty(library: Library) -> Self {
        Self {
            library,
            prior: Vec::new(),
        }
    }

    /// Library the token belongs to.
    #[must_use]
    pub fn library(&self) -> Library {
        self.library
    }

    /// Keys the `apply` wrote.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.prior.iter().map(|(k, _)| k.as_str())
    }

    /// Value `key` had before the `apply`.
    ///
    /// The outer `None` means `key` was not written; the inner one means it
    /// was unset.
    #[must_use]
    pub fn prior(&self, key: &str) -> Option<Option<&ParamValue>> {
        self.prior
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Number of keys written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prior.len()
    }

    /// Returns true if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prior.is_empty()
    }
}

// ============================================================================
// Color scales
// ============================================================================

/// A colorway palette in the form a library consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScale {
    /// Colors assigned to categories in order.
    Discrete(Vec<String>),
    /// Colors interpolated over `[0, 1]`.
    Continuous {
        /// `(position, color)` stops, positions ascending.
        stops: Vec<(f64, String)>,
        /// Neutral point for diverging scales.
        midpoint: Option<f64>,
    },
}

impl ColorScale {
    /// Colors of the scale, without positions.
    #[must_use]
    pub fn colors(&self) -> Vec<&str> {
        match self {
            ColorScale::Discrete(colors) => colors.iter().map(String::as_str).collect(),
            ColorScale::Continuous { stops, .. } => stops.iter().map(|(_, c)| c.as_str()).collect(),
        }
    }
}

impl From<ColorScale> for ParamValue {
    fn from(scale: ColorScale) -> Self {
        match scale {
            ColorScale::Discrete(colors) => ParamValue::List(colors),
            ColorScale::Continuous { stops, .. } => ParamValue::Stops(stops),
        }
    }
}

// ============================================================================
// Adapter trait
// ============================================================================

/// Translation of a resolved style into one plotting library.
pub trait Adapter: Send + Sync {
    /// Library this adapter drives.
    fn library(&self) -> Library;

    /// Minimum versions of the optional features this adapter uses.
    fn capability_table(&self) -> CapabilityTable;

    /// Every configuration write for `style` given the enabled features.
    fn style_writes(&self, style: &ResolvedStyle, caps: &Capabilities) -> ParamWrites;

    /// Adds a measured watermark to `figure` in the library's coordinates.
    fn place_watermark(&self, figure: &mut Figure, spec: &WatermarkSpec, mark: Mark);

    /// DPI of figures created for `style`.
    fn figure_dpi(&self, style: &ResolvedStyle) -> f64 {
        f64::from(style.dpi())
    }

    /// Enabled features for a detected version.
    fn capabilities(&self, info: &VersionInfo) -> Capabilities {
        Capabilities::compute(self.capability_table(), info)
    }

    /// Palette of `kind` as a discrete scale.
    fn discrete_scale(&self, colorway: &Colorway, kind: PaletteKind) -> ColorScale {
        ColorScale::Discrete(colorway.palette(kind).to_vec())
    }

    /// Palette of `kind` as evenly spaced continuous stops.
    fn continuous_scale(&self, colorway: &Colorway, kind: PaletteKind) -> ColorScale {
        ColorScale::Continuous {
            stops: colorway.continuous_stops(kind),
            midpoint: kind.midpoint(),
        }
    }

    /// Applies `style` to `surface`, returning the undo token.
    ///
    /// All writes are computed and all prior values captured before the
    /// first write. An absent library yields an empty token.
    ///
    /// # Errors
    ///
    /// [`crate::Error::WatermarkResource`] if the style's image watermark
    /// cannot be decoded. Nothing is written in that case.
    fn apply(
        &self,
        style: &ResolvedStyle,
        info: &VersionInfo,
        surface: &mut dyn ConfigSurface,
    ) -> Result<AppliedHandle> {
        let library = self.library();
        if !info.is_installed() {
            crate::debug!(library, "not installed, nothing to apply");
            return Ok(AppliedHandle::empty(library));
        }
        if let Some(path) = style.watermark().and_then(WatermarkSpec::image_path) {
            DecodedImage::load(path)?;
        }

        let caps = self.capabilities(info);
        let writes = self.style_writes(style, &caps);
        let prior: Vec<_> = writes
            .keys()
            .map(|key| (key.to_string(), surface.get(key)))
            .collect();
        for (key, value) in writes {
            surface.set(&key, value);
        }

        crate::debug!(
            library,
            "applied '{}': {} keys, features [{}]",
            style.preset_name(),
            prior.len(),
            caps.enabled()
                .iter()
                .map(|f| f.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(AppliedHandle { library, prior })
    }

    /// Restores every key recorded in `handle`, last write first.
    fn revert(&self, handle: &AppliedHandle, surface: &mut dyn ConfigSurface) {
        for (key, value) in handle.prior.iter().rev() {
            match value {
                Some(value) => surface.set(key, value.clone()),
                None => surface.unset(key),
            }
        }
        crate::trace!(handle.library, "reverted {} keys", handle.len());
    }

    /// Empty figure sized for `style`.
    fn new_figure(&self, style: &ResolvedStyle) -> Figure {
        Figure::new(self.library(), style.figure_size(), self.figure_dpi(style))
    }

    /// Adds `spec` to `figure`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::WatermarkResource`] if an image cannot be decoded.
    fn watermark(&self, figure: &mut Figure, spec: &WatermarkSpec) -> Result<()> {
        let mark = Mark::measure(spec, figure)?;
        self.place_watermark(figure, spec, mark);
        Ok(())
    }
}

static MATPLOTLIB: Matplotlib = Matplotlib;
static SEABORN: Seaborn = Seaborn;
static PLOTLY: Plotly = Plotly;
static ALTAIR: Altair = Altair;

/// Adapter for `library`.
#[must_use]
pub fn adapter_for(library: Library) -> &'static dyn Adapter {
    match library {
        Library::Matplotlib => &MATPLOTLIB,
        Library::Seaborn => &SEABORN,
        Library::Plotly => &PLOTLY,
        Library::Altair => &ALTAIR,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::registry::Registry;
    use crate::style::{ResolvedStyle, Resolver};

    pub(crate) fn style(preset: &str) -> ResolvedStyle {
        Resolver::new(&Registry::with_builtins())
            .resolve(preset, None, None)
            .unwrap()
    }

    pub(crate) fn style_with_watermark(preset: &str, text: &str) -> ResolvedStyle {
        Resolver::new(&Registry::with_builtins())
            .resolve(preset, None, Some(text.into()))
            .unwrap()
    }
}
