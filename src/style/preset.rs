//! Publication presets.
//!
//! A [`Preset`] names a [`Mode`] and overrides any subset of that mode's
//! built-in defaults. Unset fields fall back to [`Mode::defaults`] when the
//! preset is resolved.

use crate::error::{Error, Result};
use crate::style::layout::{LegendPosition, TitleAlignment};
use crate::style::resolve::ColorwaySource;
use crate::style::watermark::WatermarkSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication mode: selects the built-in default table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single-column journal figures.
    Article,
    /// Slides and posters.
    Presentation,
    /// Neutral starting point for user presets.
    Custom,
}

impl Mode {
    /// Every mode.
    pub const ALL: [Mode; 3] = [Mode::Article, Mode::Presentation, Mode::Custom];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Article => "article",
            Mode::Presentation => "presentation",
            Mode::Custom => "custom",
        }
    }

    /// Built-in default table of this mode.
    #[must_use]
    pub const fn defaults(self) -> ModeDefaults {
        match self {
            Mode::Article => ModeDefaults {
                figure_size: (3.5, 2.625),
                dpi: 300,
                font_family: "sans-serif",
                font_sizes: FontSizes {
                    title: 9.0,
                    label: 8.0,
                    legend: 7.0,
                    tick: 7.0,
                    annotation: 7.0,
                },
                line_width: 1.0,
                marker_size: 4.0,
                colorway: "default",
                title_alignment: TitleAlignment::Center,
                legend_position: LegendPosition::InsideUpperRight,
            },
            Mode::Presentation => ModeDefaults {
                figure_size: (13.33, 7.5),
                dpi: 150,
                font_family: "sans-serif",
                font_sizes: FontSizes {
                    title: 28.0,
                    label: 24.0,
                    legend: 20.0,
                    tick: 20.0,
                    annotation: 20.0,
                },
                line_width: 3.0,
                marker_size: 10.0,
                colorway: "vibrant",
                title_alignment: TitleAlignment::Center,
                legend_position: LegendPosition::InsideUpperRight,
            },
            Mode::Custom => ModeDefaults {
                figure_size: (6.4, 4.8),
                dpi: 300,
                font_family: "sans-serif",
                font_sizes: FontSizes {
                    title: 14.0,
                    label: 12.0,
                    legend: 10.0,
                    tick: 10.0,
                    annotation: 10.0,
                },
                line_width: 1.5,
                marker_size: 6.0,
                colorway: "default",
                title_alignment: TitleAlignment::Center,
                legend_position: LegendPosition::InsideUpperRight,
            },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| {
                Error::invalid(
                    "mode",
                    format!("invalid mode '{s}', expected article, presentation or custom"),
                )
            })
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    /// Axes titles.
    pub title: f64,
    /// Axis labels.
    pub label: f64,
    /// Legend entries.
    pub legend: f64,
    /// Tick labels.
    pub tick: f64,
    /// Free-standing annotations.
    pub annotation: f64,
}

impl FontSizes {
    /// `(field name, size)` pairs in document order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("title", self.title),
            ("label", self.label),
            ("legend", self.legend),
            ("tick", self.tick),
            ("annotation", self.annotation),
        ]
    }
}

/// A mode's complete built-in table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeDefaults {
    /// Width and height in inches.
    pub figure_size: (f64, f64),
    /// Dots per inch.
    pub dpi: u32,
    /// Font family.
    pub font_family: &'static str,
    /// Font sizes in points.
    pub font_sizes: FontSizes,
    /// Line width in points.
    pub line_width: f64,
    /// Marker size in points.
    pub marker_size: f64,
    /// Colorway used when nothing else names one.
    pub colorway: &'static str,
    /// Title alignment.
    pub title_alignment: TitleAlignment,
    /// Legend position.
    pub legend_position: LegendPosition,
}

/// Partial font sizes; `None` keeps the mode default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontSizeOverrides {
    /// Axes titles.
    pub title: Option<f64>,
    /// Axis labels.
    pub label: Option<f64>,
    /// Legend entries.
    pub legend: Option<f64>,
    /// Tick labels.
    pub tick: Option<f64>,
    /// Free-standing annotations.
    pub annotation: Option<f64>,
}

impl FontSizeOverrides {
    /// Overlays the set sizes on `base`.
    #[must_use]
    pub fn apply_to(&self, base: FontSizes) -> FontSizes {
        FontSizes {
            title: self.title.unwrap_or(base.title),
            label: self.label.unwrap_or(base.label),
            legend: self.legend.unwrap_or(base.legend),
            tick: self.tick.unwrap_or(base.tick),
            annotation: self.annotation.unwrap_or(base.annotation),
        }
    }
}

/// Style fields a preset may set. `None` keeps the mode default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    /// Width and height in inches.
    pub figure_size: Option<(f64, f64)>,
    /// Dots per inch.
    pub dpi: Option<u32>,
    /// Font family.
    pub font_family: Option<String>,
    /// Font sizes.
    pub font_sizes: FontSizeOverrides,
    /// Line width in points.
    pub line_width: Option<f64>,
    /// Marker size in points.
    pub marker_size: Option<f64>,
    /// Title alignment.
    pub title_alignment: Option<TitleAlignment>,
    /// Legend position.
    pub legend_position: Option<LegendPosition>,
}

/// A named, immutable publication style.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Unique registry key.
    pub name: String,
    /// Mode whose defaults fill unset fields.
    pub mode: Mode,
    /// Explicitly set style fields.
    pub style: StyleOverrides,
    /// Colorway reference, by name or inline.
    pub colorway: Option<ColorwaySource>,
    /// Watermark applied to every figure.
    pub watermark: Option<WatermarkSpec>,
}

impl Preset {
    /// Names of the built-in presets.
    pub const BUILT_IN_NAMES: [&'static str; 2] = ["article", "presentation"];

    /// Creates a preset that only names its mode.
    pub fn new(name: impl Into<String>, mode: Mode) -> Self {
        Self {
            name: name.into(),
            mode,
            style: StyleOverrides::default(),
            colorway: None,
            watermark: None,
        }
    }

    /// The built-in presets, in registration order.
    #[must_use]
    pub fn built_in() -> Vec<Preset> {
        vec![Self::article(), Self::presentation()]
    }

    /// Journal article preset.
    #[must_use]
    pub fn article() -> Preset {
        Preset::new("article", Mode::Article)
    }

    /// Slide deck preset.
    #[must_use]
    pub fn presentation() -> Preset {
        Preset::new("presentation", Mode::Presentation)
    }

    /// Sets the figure size in inches.
    #[must_use]
    pub fn with_figure_size(mut self, width: f64, height: f64) -> Self {
        self.style.figure_size = Some((width, height));
        self
    }

    /// Sets the DPI.
    #[must_use]
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.style.dpi = Some(dpi);
        self
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.style.font_family = Some(family.into());
        self
    }

    /// Sets the partial font sizes.
    #[must_use]
    pub fn with_font_sizes(mut self, sizes: FontSizeOverrides) -> Self {
        self.style.font_sizes = sizes;
        self
    }

    /// Sets the line width.
    #[must_use]
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.style.line_width = Some(width);
        self
    }

    /// Sets the marker size.
    #[must_use]
    pub fn with_marker_size(mut self, size: f64) -> Self {
        self.style.marker_size = Some(size);
        self
    }

    /// Sets the title alignment.
    #[must_use]
    pub fn with_title_alignment(mut self, alignment: TitleAlignment) -> Self {
        self.style.title_alignment = Some(alignment);
        self
    }

    /// Sets the legend position.
    #[must_use]
    pub fn with_legend_position(mut self, position: LegendPosition) -> Self {
        self.style.legend_position = Some(position);
        self
    }

    /// Sets the colorway reference.
    #[must_use]
    pub fn with_colorway(mut self, colorway: impl Into<ColorwaySource>) -> Self {
        self.colorway = Some(colorway.into());
        self
    }

    /// Sets the watermark.
    #[must_use]
    pub fn with_watermark(mut self, watermark: WatermarkSpec) -> Self {
        self.watermark = Some(watermark);
        self
    }
}
