//! altair adapter: a registered theme config and view-pixel layers.

use super::{Adapter, Capabilities, CapabilityTable, Feature, ParamWrites};
use crate::adapters::figure::{points_to_px, CoordinateSpace, Figure, Mark, Overlay};
use crate::library::Library;
use crate::style::colorway::PaletteKind;
use crate::style::layout::{LegendPosition, TitleAlignment};
use crate::style::watermark::{HorizontalAnchor, VerticalAnchor, WatermarkSpec};
use crate::style::ResolvedStyle;
use crate::version::Version;

/// Name of the registered theme.
pub const THEME: &str = "sane_figs";

/// Pixels per inch of a browser view.
pub const SCREEN_DPI: f64 = 100.0;

const CAPABILITIES: CapabilityTable = &[
    (Feature::ContinuousViewSize, Version::new(4, 0, 0)),
    (Feature::ThemeDecorator, Version::new(5, 5, 0)),
];

/// altair adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Altair;

fn title_anchor(alignment: TitleAlignment) -> &'static str {
    match alignment {
        TitleAlignment::Left => "start",
        TitleAlignment::Center => "middle",
        TitleAlignment::Right => "end",
    }
}

fn legend_orient(position: LegendPosition) -> &'static str {
    match position {
        LegendPosition::InsideUpperRight => "top-right",
        LegendPosition::InsideUpperLeft => "top-left",
        LegendPosition::InsideLowerRight => "bottom-right",
        LegendPosition::InsideLowerLeft => "bottom-left",
        LegendPosition::InsideCenter => "none",
        LegendPosition::OutsideRight => "right",
        LegendPosition::OutsideLeft => "left",
        LegendPosition::OutsideTop => "top",
        LegendPosition::OutsideBottom => "bottom",
    }
}

impl Adapter for Altair {
    fn library(&self) -> Library {
        Library::Altair
    }

    fn capability_table(&self) -> CapabilityTable {
        CAPABILITIES
    }

    fn figure_dpi(&self, _style: &ResolvedStyle) -> f64 {
        SCREEN_DPI
    }

    fn style_writes(&self, style: &ResolvedStyle, caps: &Capabilities) -> ParamWrites {
        let px = |points: f64| points_to_px(points, SCREEN_DPI);
        let sizes = style.font_sizes();
        let (width, height) = style.figure_size();
        let colorway = style.colorway();

        let mut writes = ParamWrites::new();
        let mut config = |key: &str, value: crate::library::ParamValue| {
            writes.set(format!("themes.{THEME}.config.{key}"), value);
        };

        let (width_key, height_key) = if caps.has(Feature::ContinuousViewSize) {
            ("view.continuousWidth", "view.continuousHeight")
        } else {
            ("view.width", "view.height")
        };
        config(width_key, ((width * SCREEN_DPI).round() as i64).into());
        config(height_key, ((height * SCREEN_DPI).round() as i64).into());

        config("font", style.font_family().into());
        config("title.fontSize", px(sizes.title).into());
        config("title.anchor", title_anchor(style.title_alignment()).into());
        config("axis.titleFontSize", px(sizes.label).into());
        config("axis.labelFontSize", px(sizes.tick).into());
        config("legend.titleFontSize", px(sizes.legend).into());
        config("legend.labelFontSize", px(sizes.legend).into());
        config("legend.orient", legend_orient(style.legend_position()).into());
        config("text.fontSize", px(sizes.annotation).into());

        config("line.strokeWidth", px(style.line_width()).into());
        // Vega point size is an area.
        config("point.size", px(style.marker_size()).powi(2).into());

        config(
            "range.category",
            self.discrete_scale(colorway, PaletteKind::Categorical).into(),
        );
        config(
            "range.ordinal",
            self.discrete_scale(colorway, PaletteKind::Qualitative).into(),
        );
        config(
            "range.heatmap",
            self.continuous_scale(colorway, PaletteKind::Sequential).into(),
        );
        config(
            "range.diverging",
            self.continuous_scale(colorway, PaletteKind::Diverging).into(),
        );

        if caps.has(Feature::ThemeDecorator) {
            writes.set("theme.enabled", THEME);
        } else {
            writes.set("themes.active", THEME);
        }
        writes
    }

    fn place_watermark(&self, figure: &mut Figure, spec: &WatermarkSpec, mark: Mark) {
        let (view_w, view_h) = figure.size_px();
        let mark = mark.with_font_px(figure.dpi());
        let (x, y_bottom) = spec
            .position
            .place(view_w, view_h, mark.width_px, mark.height_px, spec.margin);
        figure.push_overlay(Overlay {
            content: mark.content,
            space: CoordinateSpace::ViewPixels,
            x,
            y: view_h - y_bottom - mark.height_px,
            width: mark.width_px,
            height: mark.height_px,
            anchor: (HorizontalAnchor::Left, VerticalAnchor::Top),
            opacity: spec.opacity,
            z_order: 1,
        });
    }
}
