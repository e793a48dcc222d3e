//! Named color palettes.
//!
//! A colorway bundles four palettes: categorical (distinct groups),
//! sequential (ordered values), diverging (values around a midpoint) and
//! qualitative (nominal categories).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four palettes carried by a [`Colorway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKind {
    /// Distinct categories.
    Categorical,
    /// Ordered low-to-high values.
    Sequential,
    /// Values with a meaningful midpoint.
    Diverging,
    /// Nominal categories.
    Qualitative,
}

impl PaletteKind {
    /// All palette kinds in document order.
    pub const ALL: [PaletteKind; 4] = [
        PaletteKind::Categorical,
        PaletteKind::Sequential,
        PaletteKind::Diverging,
        PaletteKind::Qualitative,
    ];

    /// Field name of the palette.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PaletteKind::Categorical => "categorical",
            PaletteKind::Sequential => "sequential",
            PaletteKind::Diverging => "diverging",
            PaletteKind::Qualitative => "qualitative",
        }
    }

    /// Fixed midpoint of a continuous scale built from this palette.
    #[must_use]
    pub const fn midpoint(self) -> Option<f64> {
        match self {
            PaletteKind::Diverging => Some(0.5),
            _ => None,
        }
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Informational accessibility tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accessibility {
    /// No claim made.
    #[default]
    Unspecified,
    /// Keeps contrast when printed in grayscale.
    PrintFriendly,
    /// Strong contrast for projection.
    HighContrast,
    /// Distinguishable under common color vision deficiencies.
    ColorblindSafe,
}

/// A named set of publication palettes.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorway {
    /// Unique registry key.
    pub name: String,
    /// Human readable description.
    pub description: String,
    /// Colors for distinct categories.
    pub categorical: Vec<String>,
    /// Colors for ordered values, light to dark.
    pub sequential: Vec<String>,
    /// Colors for values around a midpoint.
    pub diverging: Vec<String>,
    /// Colors for nominal categories.
    pub qualitative: Vec<String>,
    /// Accessibility tag.
    pub accessibility: Accessibility,
}

impl Colorway {
    /// Creates a colorway with empty palettes.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            categorical: Vec::new(),
            sequential: Vec::new(),
            diverging: Vec::new(),
            qualitative: Vec::new(),
            accessibility: Accessibility::Unspecified,
        }
    }

    /// Sets one palette.
    #[must_use]
    pub fn with_palette<I, S>(mut self, kind: PaletteKind, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.palette_mut(kind) = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the accessibility tag.
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Colors of one palette, in order.
    #[must_use]
    pub fn palette(&self, kind: PaletteKind) -> &[String] {
        match kind {
            PaletteKind::Categorical => &self.categorical,
            PaletteKind::Sequential => &self.sequential,
            PaletteKind::Diverging => &self.diverging,
            PaletteKind::Qualitative => &self.qualitative,
        }
    }

    fn palette_mut(&mut self, kind: PaletteKind) -> &mut Vec<String> {
        match kind {
            PaletteKind::Categorical => &mut self.categorical,
            PaletteKind::Sequential => &mut self.sequential,
            PaletteKind::Diverging => &mut self.diverging,
            PaletteKind::Qualitative => &mut self.qualitative,
        }
    }

    /// Evenly spaced `(position, color)` stops over `[0, 1]`.
    ///
    /// A single color yields two stops so the scale is still well formed.
    #[must_use]
    pub fn continuous_stops(&self, kind: PaletteKind) -> Vec<(f64, String)> {
        let colors = self.palette(kind);
        match colors {
            [] => Vec::new(),
            [only] => vec![(0.0, only.clone()), (1.0, only.clone())],
            _ => {
                let last = (colors.len() - 1) as f64;
                colors
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (i as f64 / last, c.clone()))
                    .collect()
            }
        }
    }

    /// The built-in colorways, in registration order.
    #[must_use]
    pub fn built_in() -> Vec<Colorway> {
        vec![
            Self::default_colorway(),
            Self::nature(),
            Self::vibrant(),
            Self::pastel(),
            Self::colorblind_safe(),
        ]
    }

    /// Names of the built-in colorways.
    pub const BUILT_IN_NAMES: [&'static str; 5] =
        ["default", "nature", "vibrant", "pastel", "colorblind-safe"];

    /// Print-oriented palette that survives grayscale reproduction.
    #[must_use]
    pub fn default_colorway() -> Colorway {
        Colorway::new(
            "default",
            "Publication-ready color palette optimized for print",
        )
        .with_palette(
            PaletteKind::Categorical,
            [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ],
        )
        .with_palette(
            PaletteKind::Sequential,
            [
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#081d58",
            ],
        )
        .with_palette(
            PaletteKind::Diverging,
            [
                "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0",
                "#92c5de", "#4393c3", "#2166ac", "#053061",
            ],
        )
        .with_palette(
            PaletteKind::Qualitative,
            [
                "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1",
                "#ff9da7", "#9c755f", "#bab0ac",
            ],
        )
        .with_accessibility(Accessibility::PrintFriendly)
    }

    /// Earth tones.
    #[must_use]
    pub fn nature() -> Colorway {
        Colorway::new("nature", "Earth tones inspired by nature")
            .with_palette(
                PaletteKind::Categorical,
                [
                    "#2d6a4f", "#d4a373", "#bc6c25", "#606c38", "#dda15e", "#283618", "#fefae0",
                    "#bc4749", "#6a994e", "#386641",
                ],
            )
            .with_palette(
                PaletteKind::Sequential,
                [
                    "#f0f4c3", "#dce775", "#cddc39", "#afb42b", "#9e9d24", "#827717", "#689f38",
                    "#558b2f", "#33691e", "#1b5e20",
                ],
            )
            .with_palette(
                PaletteKind::Diverging,
                [
                    "#8b4513", "#a0522d", "#cd853f", "#deb887", "#f5deb3", "#ffffff", "#e0f2f1",
                    "#b2dfdb", "#80cbc4", "#4db6ac", "#009688",
                ],
            )
            .with_palette(
                PaletteKind::Qualitative,
                [
                    "#264653", "#2a9d8f", "#e9c46a", "#f4a261", "#e76f51", "#6b705c", "#a5a58d",
                    "#cb997e", "#ddbea9", "#ffe8d6",
                ],
            )
    }

    /// Saturated colors for projection.
    #[must_use]
    pub fn vibrant() -> Colorway {
        Colorway::new("vibrant", "High contrast colors optimized for presentations")
            .with_palette(
                PaletteKind::Categorical,
                [
                    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#FF8000",
                    "#8000FF", "#00FF80", "#FF0080",
                ],
            )
            .with_palette(
                PaletteKind::Sequential,
                [
                    "#FFFFE0", "#FFFF00", "#FFD700", "#FFA500", "#FF8C00", "#FF4500", "#FF0000",
                    "#DC143C", "#B22222", "#8B0000",
                ],
            )
            .with_palette(
                PaletteKind::Diverging,
                [
                    "#0000FF", "#1E90FF", "#00BFFF", "#87CEEB", "#E0FFFF", "#FFFFFF", "#FFE4E1",
                    "#FFB6C1", "#FF69B4", "#FF1493", "#FF0000",
                ],
            )
            .with_palette(
                PaletteKind::Qualitative,
                [
                    "#E63946", "#F1FAEE", "#A8DADC", "#457B9D", "#1D3557", "#2A9D8F", "#E9C46A",
                    "#F4A261", "#E76F51", "#264653",
                ],
            )
            .with_accessibility(Accessibility::HighContrast)
    }

    /// Soft tones.
    #[must_use]
    pub fn pastel() -> Colorway {
        Colorway::new("pastel", "Soft, professional colors")
            .with_palette(
                PaletteKind::Categorical,
                [
                    "#AEC6CF", "#FFB347", "#77DD77", "#FF6961", "#C3B1E1", "#F49AC2", "#FDFD96",
                    "#B39EB5", "#FFB7B2", "#B5EAD7",
                ],
            )
            .with_palette(
                PaletteKind::Sequential,
                [
                    "#F0F8FF", "#E6F3FF", "#CCE7FF", "#99D6FF", "#66C5FF", "#33B4FF", "#00A3FF",
                    "#0092E6", "#0081CC", "#0070B3",
                ],
            )
            .with_palette(
                PaletteKind::Diverging,
                [
                    "#FFB3BA", "#FFDFBA", "#FFFFBA", "#BAFFC9", "#BAE1FF", "#FFFFFF", "#E0F2F1",
                    "#B2DFDB", "#80CBC4", "#4DB6AC", "#009688",
                ],
            )
            .with_palette(
                PaletteKind::Qualitative,
                [
                    "#FFB5E8", "#B5DEFF", "#DCD3FF", "#AFF8DB", "#FFC8A2", "#FFF5BA", "#FF9AA2",
                    "#E2F0CB", "#B5EAD7", "#C7CEEA",
                ],
            )
    }

    /// Okabe-Ito based palette for color vision deficiencies.
    #[must_use]
    pub fn colorblind_safe() -> Colorway {
        const OKABE_ITO: [&str; 8] = [
            "#E69F00", "#56B4E9", "#009E73", "#F0E442", "#0072B2", "#D55E00", "#CC79A7",
            "#000000",
        ];
        Colorway::new(
            "colorblind-safe",
            "Designed for colorblind accessibility using CUD principles",
        )
        .with_palette(PaletteKind::Categorical, OKABE_ITO)
        .with_palette(
            PaletteKind::Sequential,
            [
                "#F7FCF5", "#E5F5E0", "#C7E9C0", "#A1D99B", "#74C476", "#41AB5D", "#238B45",
                "#006D2C", "#00441B",
            ],
        )
        .with_palette(
            PaletteKind::Diverging,
            [
                "#B2182B", "#D6604D", "#F4A582", "#FDDBC7", "#F7F7F7", "#D1E5F0", "#92C5DE",
                "#4393C3", "#2166AC", "#053061",
            ],
        )
        .with_palette(PaletteKind::Qualitative, OKABE_ITO)
        .with_accessibility(Accessibility::ColorblindSafe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use approx::assert_relative_eq;

    #[test]
    fn test_built_in_names_and_order() {
        let names: Vec<String> = Colorway::built_in().into_iter().map(|c| c.name).collect();
        assert_eq!(names, Colorway::BUILT_IN_NAMES);
    }

    #[test]
    fn test_built_in_palettes_are_valid_hex() {
        for colorway in Colorway::built_in() {
            for kind in PaletteKind::ALL {
                let palette = colorway.palette(kind);
                assert!(!palette.is_empty(), "{} {kind} is empty", colorway.name);
                for color in palette {
                    assert!(Rgba::is_valid_hex(color), "{} {kind}: {color}", colorway.name);
                }
            }
        }
    }

    #[test]
    fn test_continuous_stops_evenly_spaced() {
        let colorway = Colorway::default_colorway();
        let stops = colorway.continuous_stops(PaletteKind::Sequential);
        assert_eq!(stops.len(), 9);
        assert_relative_eq!(stops[0].0, 0.0);
        assert_relative_eq!(stops[4].0, 0.5);
        assert_relative_eq!(stops[8].0, 1.0);
        assert_eq!(stops[8].1, "#081d58");
    }

    #[test]
    fn test_diverging_center_lands_on_midpoint() {
        let colorway = Colorway::default_colorway();
        let stops = colorway.continuous_stops(PaletteKind::Diverging);
        assert_relative_eq!(stops[5].0, 0.5);
        assert_eq!(stops[5].1, "#f7f7f7");
        assert_eq!(PaletteKind::Diverging.midpoint(), Some(0.5));
        assert_eq!(PaletteKind::Sequential.midpoint(), None);
    }

    #[test]
    fn test_continuous_stops_single_and_empty() {
        let single = Colorway::new("one", "single").with_palette(PaletteKind::Sequential, ["#000000"]);
        assert_eq!(
            single.continuous_stops(PaletteKind::Sequential),
            vec![(0.0, "#000000".to_string()), (1.0, "#000000".to_string())]
        );
        assert!(single.continuous_stops(PaletteKind::Diverging).is_empty());
    }

    #[test]
    fn test_accessibility_tags() {
        assert_eq!(
            Colorway::colorblind_safe().accessibility,
            Accessibility::ColorblindSafe
        );
        assert_eq!(Colorway::nature().accessibility, Accessibility::Unspecified);
    }
}
