//! Watermark specifications and placement math.
//!
//! Placement is computed in a bottom-left origin space: `y` grows upwards.
//! Adapters whose native space differs flip the result themselves.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default watermark opacity.
pub const DEFAULT_OPACITY: f64 = 0.3;
/// Default image scale relative to the figure width.
pub const DEFAULT_SCALE: f64 = 0.1;
/// Default margin as a fraction of the figure size.
pub const DEFAULT_MARGIN: (f64, f64) = (0.02, 0.02);
/// Default text size in points.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Corner (or center) a watermark is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    #[default]
    BottomRight,
    /// Figure center (margins ignored).
    Center,
}

/// Horizontal alignment of a mark relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    /// Anchor at the mark's left edge.
    Left,
    /// Anchor at the mark's center.
    Center,
    /// Anchor at the mark's right edge.
    Right,
}

impl HorizontalAnchor {
    /// Lowercase name used by every supported library.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HorizontalAnchor::Left => "left",
            HorizontalAnchor::Center => "center",
            HorizontalAnchor::Right => "right",
        }
    }
}

/// Vertical alignment of a mark relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    /// Anchor at the mark's top edge.
    Top,
    /// Anchor at the mark's vertical center.
    Middle,
    /// Anchor at the mark's bottom edge.
    Bottom,
}

impl VerticalAnchor {
    /// Lowercase name (`top`, `middle`, `bottom`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            VerticalAnchor::Top => "top",
            VerticalAnchor::Middle => "middle",
            VerticalAnchor::Bottom => "bottom",
        }
    }
}

impl Position {
    /// Every position.
    pub const ALL: [Position; 5] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
        Position::Center,
    ];

    /// Kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
            Position::Center => "center",
        }
    }

    /// How a mark aligns to [`Position::anchor_point`].
    #[must_use]
    pub const fn anchors(self) -> (HorizontalAnchor, VerticalAnchor) {
        match self {
            Position::TopLeft => (HorizontalAnchor::Left, VerticalAnchor::Top),
            Position::TopRight => (HorizontalAnchor::Right, VerticalAnchor::Top),
            Position::BottomLeft => (HorizontalAnchor::Left, VerticalAnchor::Bottom),
            Position::BottomRight => (HorizontalAnchor::Right, VerticalAnchor::Bottom),
            Position::Center => (HorizontalAnchor::Center, VerticalAnchor::Middle),
        }
    }

    /// Anchor point as a fraction of the figure, bottom-left origin.
    #[must_use]
    pub fn anchor_point(self, margin: (f64, f64)) -> (f64, f64) {
        let (mx, my) = margin;
        match self {
            Position::TopLeft => (mx, 1.0 - my),
            Position::TopRight => (1.0 - mx, 1.0 - my),
            Position::BottomLeft => (mx, my),
            Position::BottomRight => (1.0 - mx, my),
            Position::Center => (0.5, 0.5),
        }
    }

    /// Lower-left corner of a `mark_w` x `mark_h` mark inside a
    /// `fig_w` x `fig_h` figure, bottom-left origin, same units as the inputs.
    #[must_use]
    pub fn place(
        self,
        fig_w: f64,
        fig_h: f64,
        mark_w: f64,
        mark_h: f64,
        margin: (f64, f64),
    ) -> (f64, f64) {
        let margin_x = fig_w * margin.0;
        let margin_y = fig_h * margin.1;
        match self {
            Position::TopLeft => (margin_x, fig_h - mark_h - margin_y),
            Position::TopRight => (fig_w - mark_w - margin_x, fig_h - mark_h - margin_y),
            Position::BottomLeft => (margin_x, margin_y),
            Position::BottomRight => (fig_w - mark_w - margin_x, margin_y),
            Position::Center => ((fig_w - mark_w) / 2.0, (fig_h - mark_h) / 2.0),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Position::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Position::ALL.iter().map(|p| p.name()).collect();
                Error::invalid(
                    "watermark.position",
                    format!("invalid position '{s}', valid positions: {}", valid.join(", ")),
                )
            })
    }
}

/// Typography of a text watermark.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    /// Text to draw.
    pub text: String,
    /// Size in points.
    pub font_size: f64,
    /// Font family.
    pub font_family: String,
    /// Font weight (`normal`, `bold`, ...).
    pub font_weight: String,
    /// Hex color.
    pub color: String,
}

/// What a watermark draws.
#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkKind {
    /// A text label.
    Text(TextMark),
    /// A PNG image.
    Image {
        /// Path to the image resource.
        path: PathBuf,
    },
}

/// A text or image mark placed on every figure.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkSpec {
    /// Text or image payload.
    pub kind: WatermarkKind,
    /// Corner the mark is pinned to.
    pub position: Position,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Image width as a fraction of the figure width, in `(0, 1]`.
    pub scale: f64,
    /// Distance from the pinned edges as `(x, y)` fractions of the figure.
    pub margin: (f64, f64),
}

impl WatermarkSpec {
    /// Text watermark with default placement and typography.
    ///
    /// Values are checked when the style is resolved.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_kind(WatermarkKind::Text(TextMark {
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: "sans-serif".to_string(),
            font_weight: "normal".to_string(),
            color: "#000000".to_string(),
        }))
    }

    /// Image watermark with default placement.
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(WatermarkKind::Image { path: path.into() })
    }

    fn with_kind(kind: WatermarkKind) -> Self {
        Self {
            kind,
            position: Position::default(),
            opacity: DEFAULT_OPACITY,
            scale: DEFAULT_SCALE,
            margin: DEFAULT_MARGIN,
        }
    }

    /// Set the position.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the image scale.
    #[must_use]
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the margin.
    #[must_use]
    pub fn margin(mut self, x: f64, y: f64) -> Self {
        self.margin = (x, y);
        self
    }

    /// Set the font size of a text mark. Ignored for images.
    #[must_use]
    pub fn font_size(mut self, size: f64) -> Self {
        if let WatermarkKind::Text(mark) = &mut self.kind {
            mark.font_size = size;
        }
        self
    }

    /// Set the font family of a text mark. Ignored for images.
    #[must_use]
    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        if let WatermarkKind::Text(mark) = &mut self.kind {
            mark.font_family = family.into();
        }
        self
    }

    /// Set the font weight of a text mark. Ignored for images.
    #[must_use]
    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        if let WatermarkKind::Text(mark) = &mut self.kind {
            mark.font_weight = weight.into();
        }
        self
    }

    /// Set the color of a text mark. Ignored for images.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        if let WatermarkKind::Text(mark) = &mut self.kind {
            mark.color = color.into();
        }
        self
    }

    /// Text payload, if this is a text mark.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextMark> {
        match &self.kind {
            WatermarkKind::Text(mark) => Some(mark),
            WatermarkKind::Image { .. } => None,
        }
    }

    /// Image path, if this is an image mark.
    #[must_use]
    pub fn image_path(&self) -> Option<&Path> {
        match &self.kind {
            WatermarkKind::Image { path } => Some(path),
            WatermarkKind::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_text_defaults() {
        let spec = WatermarkSpec::text("(c) 2025 My Lab");
        assert_eq!(spec.position, Position::BottomRight);
        assert_relative_eq!(spec.opacity, 0.3);
        assert_relative_eq!(spec.scale, 0.1);
        assert_eq!(spec.margin, (0.02, 0.02));

        let mark = spec.as_text().unwrap();
        assert_relative_eq!(mark.font_size, 12.0);
        assert_eq!(mark.font_family, "sans-serif");
        assert_eq!(mark.font_weight, "normal");
        assert_eq!(mark.color, "#000000");
        assert!(spec.image_path().is_none());
    }

    #[test]
    fn test_builders() {
        let spec = WatermarkSpec::text("DRAFT")
            .position(Position::Center)
            .opacity(0.5)
            .font_weight("bold")
            .color("#ff0000");
        assert_eq!(spec.position, Position::Center);
        assert_eq!(spec.as_text().unwrap().font_weight, "bold");
        assert_eq!(spec.as_text().unwrap().color, "#ff0000");
    }

    #[test]
    fn test_text_builders_ignored_for_images() {
        let spec = WatermarkSpec::image("logo.png").font_size(30.0).scale(0.2);
        assert_eq!(spec.image_path(), Some(Path::new("logo.png")));
        assert!(spec.as_text().is_none());
        assert_relative_eq!(spec.scale, 0.2);
    }

    #[test]
    fn test_position_parse() {
        for position in Position::ALL {
            assert_eq!(position.name().parse::<Position>().unwrap(), position);
        }
        let err = "middle".parse::<Position>().unwrap_err();
        assert_eq!(err.field(), Some("watermark.position"));
    }

    #[test]
    fn test_place_corners() {
        let margin = (0.25, 0.25);
        assert_eq!(Position::BottomLeft.place(100.0, 50.0, 10.0, 5.0, margin), (25.0, 12.5));
        assert_eq!(Position::BottomRight.place(100.0, 50.0, 10.0, 5.0, margin), (65.0, 12.5));
        assert_eq!(Position::TopLeft.place(100.0, 50.0, 10.0, 5.0, margin), (25.0, 32.5));
        assert_eq!(Position::TopRight.place(100.0, 50.0, 10.0, 5.0, margin), (65.0, 32.5));
        assert_eq!(Position::Center.place(100.0, 50.0, 10.0, 5.0, margin), (45.0, 22.5));
    }

    #[test]
    fn test_anchor_point_and_anchors() {
        let (x, y) = Position::BottomRight.anchor_point((0.02, 0.02));
        assert_relative_eq!(x, 0.98);
        assert_relative_eq!(y, 0.02);
        assert_eq!(
            Position::TopLeft.anchors(),
            (HorizontalAnchor::Left, VerticalAnchor::Top)
        );
        assert_eq!(Position::Center.anchor_point((0.3, 0.3)), (0.5, 0.5));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_placed_mark_stays_inside_figure(
            fig_w in 10.0f64..2000.0,
            fig_h in 10.0f64..2000.0,
            frac_w in 0.01f64..0.5,
            frac_h in 0.01f64..0.5,
            mx in 0.0f64..0.25,
            my in 0.0f64..0.25,
            index in 0usize..5,
        ) {
            let position = Position::ALL[index];
            let (mark_w, mark_h) = (fig_w * frac_w, fig_h * frac_h);
            let (x, y) = position.place(fig_w, fig_h, mark_w, mark_h, (mx, my));
            prop_assert!(x >= -1e-9 && x + mark_w <= fig_w + 1e-9);
            prop_assert!(y >= -1e-9 && y + mark_h <= fig_h + 1e-9);
        }
    }
}
