//! Title alignment and legend placement.

use crate::error::{Error, Result};
use crate::style::watermark::{HorizontalAnchor, VerticalAnchor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizontal alignment of axes titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleAlignment {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

impl TitleAlignment {
    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TitleAlignment::Left => "left",
            TitleAlignment::Center => "center",
            TitleAlignment::Right => "right",
        }
    }

    /// Title x position as a fraction of the plot width.
    #[must_use]
    pub const fn fraction(self) -> f64 {
        match self {
            TitleAlignment::Left => 0.0,
            TitleAlignment::Center => 0.5,
            TitleAlignment::Right => 1.0,
        }
    }

    /// Anchor the title text aligns to at [`TitleAlignment::fraction`].
    #[must_use]
    pub const fn anchor(self) -> HorizontalAnchor {
        match self {
            TitleAlignment::Left => HorizontalAnchor::Left,
            TitleAlignment::Center => HorizontalAnchor::Center,
            TitleAlignment::Right => HorizontalAnchor::Right,
        }
    }
}

impl FromStr for TitleAlignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(TitleAlignment::Left),
            "center" => Ok(TitleAlignment::Center),
            "right" => Ok(TitleAlignment::Right),
            other => Err(Error::invalid(
                "layout.title_alignment",
                format!("invalid title alignment '{other}', expected left, center or right"),
            )),
        }
    }
}

/// Where the legend is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    /// Inside the axes, upper right corner.
    #[default]
    InsideUpperRight,
    /// Inside the axes, upper left corner.
    InsideUpperLeft,
    /// Inside the axes, lower right corner.
    InsideLowerRight,
    /// Inside the axes, lower left corner.
    InsideLowerLeft,
    /// Inside the axes, centered.
    InsideCenter,
    /// Outside the axes, to the right.
    OutsideRight,
    /// Outside the axes, to the left.
    OutsideLeft,
    /// Outside the axes, above.
    OutsideTop,
    /// Outside the axes, below.
    OutsideBottom,
}

impl LegendPosition {
    /// Every legend position.
    pub const ALL: [LegendPosition; 9] = [
        LegendPosition::InsideUpperRight,
        LegendPosition::InsideUpperLeft,
        LegendPosition::InsideLowerRight,
        LegendPosition::InsideLowerLeft,
        LegendPosition::InsideCenter,
        LegendPosition::OutsideRight,
        LegendPosition::OutsideLeft,
        LegendPosition::OutsideTop,
        LegendPosition::OutsideBottom,
    ];

    /// Snake-case name as written in preset documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LegendPosition::InsideUpperRight => "inside_upper_right",
            LegendPosition::InsideUpperLeft => "inside_upper_left",
            LegendPosition::InsideLowerRight => "inside_lower_right",
            LegendPosition::InsideLowerLeft => "inside_lower_left",
            LegendPosition::InsideCenter => "inside_center",
            LegendPosition::OutsideRight => "outside_right",
            LegendPosition::OutsideLeft => "outside_left",
            LegendPosition::OutsideTop => "outside_top",
            LegendPosition::OutsideBottom => "outside_bottom",
        }
    }

    /// Returns true for positions outside the axes.
    #[must_use]
    pub const fn is_outside(self) -> bool {
        matches!(
            self,
            LegendPosition::OutsideRight
                | LegendPosition::OutsideLeft
                | LegendPosition::OutsideTop
                | LegendPosition::OutsideBottom
        )
    }

    /// Legend anchor in plot-area fractions (bottom-left origin) and the
    /// side of the legend box attached to it.
    #[must_use]
    pub const fn plot_anchor(self) -> (f64, f64, HorizontalAnchor, VerticalAnchor) {
        use HorizontalAnchor as H;
        use VerticalAnchor as V;
        match self {
            LegendPosition::InsideUpperRight => (1.0, 1.0, H::Right, V::Top),
            LegendPosition::InsideUpperLeft => (0.0, 1.0, H::Left, V::Top),
            LegendPosition::InsideLowerRight => (1.0, 0.0, H::Right, V::Bottom),
            LegendPosition::InsideLowerLeft => (0.0, 0.0, H::Left, V::Bottom),
            LegendPosition::InsideCenter => (0.5, 0.5, H::Center, V::Middle),
            LegendPosition::OutsideRight => (1.02, 1.0, H::Left, V::Top),
            LegendPosition::OutsideLeft => (-0.02, 1.0, H::Right, V::Top),
            LegendPosition::OutsideTop => (0.5, 1.02, H::Center, V::Bottom),
            LegendPosition::OutsideBottom => (0.5, -0.15, H::Center, V::Top),
        }
    }
}

impl fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LegendPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LegendPosition::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                Error::invalid(
                    "layout.legend_position",
                    format!("invalid legend position '{s}'"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_alignment_parse() {
        assert_eq!("left".parse::<TitleAlignment>().unwrap(), TitleAlignment::Left);
        let err = "justify".parse::<TitleAlignment>().unwrap_err();
        assert_eq!(err.field(), Some("layout.title_alignment"));
    }

    #[test]
    fn test_title_alignment_fraction() {
        assert_eq!(TitleAlignment::default(), TitleAlignment::Center);
        assert!((TitleAlignment::Right.fraction() - 1.0).abs() < f64::EPSILON);
        assert_eq!(TitleAlignment::Left.anchor(), HorizontalAnchor::Left);
    }

    #[test]
    fn test_legend_names_roundtrip() {
        for position in LegendPosition::ALL {
            assert_eq!(position.name().parse::<LegendPosition>().unwrap(), position);
        }
        assert!("upper_right".parse::<LegendPosition>().is_err());
    }

    #[test]
    fn test_legend_outside_split() {
        let outside = LegendPosition::ALL.iter().filter(|p| p.is_outside()).count();
        assert_eq!(outside, 4);
        assert!(!LegendPosition::default().is_outside());
    }

    #[test]
    fn test_outside_anchors_leave_plot_area() {
        let (x, _, h, _) = LegendPosition::OutsideRight.plot_anchor();
        assert!(x > 1.0);
        assert_eq!(h, HorizontalAnchor::Left);
        let (_, y, _, v) = LegendPosition::OutsideBottom.plot_anchor();
        assert!(y < 0.0);
        assert_eq!(v, VerticalAnchor::Top);
    }
}
