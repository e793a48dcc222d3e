//! plotly adapter: a registered layout template and paper-fraction images.

use super::{Adapter, Capabilities, CapabilityTable, Feature, ParamWrites};
use crate::adapters::figure::{points_to_px, CoordinateSpace, Figure, Mark, Overlay};
use crate::library::{Library, ParamValue};
use crate::style::colorway::PaletteKind;
use crate::style::watermark::WatermarkSpec;
use crate::style::ResolvedStyle;
use crate::version::Version;

/// Name of the registered template.
pub const TEMPLATE: &str = "sane_figs";

const CAPABILITIES: CapabilityTable = &[
    (Feature::TemplateDefault, Version::new(4, 0, 0)),
    (Feature::NestedTitleFont, Version::new(4, 0, 0)),
    (Feature::LayoutColorscale, Version::new(4, 0, 0)),
    (Feature::LegendTitleFont, Version::new(4, 5, 0)),
];

/// plotly adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plotly;

/// Writes under `templates.sane_figs.`.
struct Template<'a> {
    writes: &'a mut ParamWrites,
}

impl Template<'_> {
    fn layout(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.writes.set(format!("templates.{TEMPLATE}.layout.{key}"), value);
    }

    fn data(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.writes.set(format!("templates.{TEMPLATE}.data.{key}"), value);
    }
}

impl Adapter for Plotly {
    fn library(&self) -> Library {
        Library::Plotly
    }

    fn capability_table(&self) -> CapabilityTable {
        CAPABILITIES
    }

    fn style_writes(&self, style: &ResolvedStyle, caps: &Capabilities) -> ParamWrites {
        let dpi = f64::from(style.dpi());
        let px = |points: f64| points_to_px(points, dpi);
        let sizes = style.font_sizes();
        let (width, height) = style.figure_size();
        let colorway = style.colorway();

        let mut writes = ParamWrites::new();
        let mut t = Template {
            writes: &mut writes,
        };

        t.layout("width", (width * dpi).round() as i64);
        t.layout("height", (height * dpi).round() as i64);

        t.layout("font.family", style.font_family());
        t.layout("font.size", px(sizes.label));
        t.layout("title.font.size", px(sizes.title));
        t.layout("title.x", style.title_alignment().fraction());
        t.layout("title.xanchor", style.title_alignment().anchor().name());

        for axis in ["xaxis", "yaxis"] {
            if caps.has(Feature::NestedTitleFont) {
                t.layout(&format!("{axis}.title.font.size"), px(sizes.label));
            } else {
                t.layout(&format!("{axis}.titlefont.size"), px(sizes.label));
            }
            t.layout(&format!("{axis}.tickfont.size"), px(sizes.tick));
        }

        let (x, y, xanchor, yanchor) = style.legend_position().plot_anchor();
        t.layout("legend.font.size", px(sizes.legend));
        t.layout("legend.x", x);
        t.layout("legend.y", y);
        t.layout("legend.xanchor", xanchor.name());
        t.layout("legend.yanchor", yanchor.name());
        if caps.has(Feature::LegendTitleFont) {
            t.layout("legend.title.font.size", px(sizes.legend));
        }
        t.layout("annotationdefaults.font.size", px(sizes.annotation));

        t.layout(
            "colorway",
            self.discrete_scale(colorway, PaletteKind::Categorical),
        );
        let sequential = self.continuous_scale(colorway, PaletteKind::Sequential);
        if caps.has(Feature::LayoutColorscale) {
            t.layout("colorscale.sequential", sequential);
            t.layout(
                "colorscale.diverging",
                self.continuous_scale(colorway, PaletteKind::Diverging),
            );
        } else {
            t.data("heatmap.colorscale", sequential);
        }

        t.data("scatter.line.width", px(style.line_width()));
        t.data("scatter.marker.size", px(style.marker_size()));

        if caps.has(Feature::TemplateDefault) {
            writes.set("templates.default", TEMPLATE);
        }
        writes
    }

    fn place_watermark(&self, figure: &mut Figure, spec: &WatermarkSpec, mark: Mark) {
        let (fig_w, fig_h) = figure.size_px();
        let (x, y) = spec.position.anchor_point(spec.margin);
        let mark = mark.with_font_px(figure.dpi());
        figure.push_overlay(Overlay {
            content: mark.content,
            space: CoordinateSpace::PaperFraction,
            x,
            y,
            width: mark.width_px / fig_w,
            height: mark.height_px / fig_h,
            anchor: spec.position.anchors(),
            opacity: spec.opacity,
            z_order: 1,
        });
    }
}
