//! matplotlib adapter: rcParams and figure-fraction overlays.

use super::{Adapter, Capabilities, CapabilityTable, Feature, ParamWrites};
use crate::adapters::figure::{CoordinateSpace, Figure, Mark, Overlay};
use crate::library::{Library, ParamValue};
use crate::style::colorway::PaletteKind;
use crate::style::layout::LegendPosition;
use crate::style::watermark::{HorizontalAnchor, VerticalAnchor, WatermarkSpec};
use crate::style::ResolvedStyle;
use crate::version::Version;

/// Name of the registered sequential colormap.
pub const SEQUENTIAL_CMAP: &str = "sane-figs-sequential";
/// Name of the registered diverging colormap.
pub const DIVERGING_CMAP: &str = "sane-figs-diverging";
/// Colormap used when custom colormaps cannot be registered.
pub const FALLBACK_CMAP: &str = "viridis";

/// Overlays draw above every artist.
const WATERMARK_ZORDER: i32 = 100;

const CAPABILITIES: CapabilityTable = &[
    (Feature::PropCycle, Version::new(1, 5, 0)),
    (Feature::ConstrainedLayout, Version::new(2, 2, 0)),
    (Feature::LegendTitleFontSize, Version::new(3, 0, 0)),
    (Feature::TitleLocation, Version::new(3, 3, 0)),
    (Feature::ColormapRegistry, Version::new(3, 5, 0)),
    (Feature::OutsideLegendLoc, Version::new(3, 7, 0)),
];

/// matplotlib adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matplotlib;

impl Matplotlib {
    /// rcParams shared with seaborn's `rc` mapping.
    ///
    /// Keys are bare rcParam names; seaborn prefixes them.
    #[must_use]
    pub fn rc_params(style: &ResolvedStyle, caps: &Capabilities) -> ParamWrites {
        let sizes = style.font_sizes();
        let (width, height) = style.figure_size();
        let colorway = style.colorway();
        let mut rc = ParamWrites::new();

        rc.set("figure.figsize", (width, height));
        rc.set("figure.dpi", style.dpi());
        rc.set("savefig.dpi", style.dpi());

        rc.set("font.family", ParamValue::list([style.font_family()]));
        rc.set("font.size", sizes.label);
        rc.set("axes.titlesize", sizes.title);
        rc.set("axes.labelsize", sizes.label);
        rc.set("xtick.labelsize", sizes.tick);
        rc.set("ytick.labelsize", sizes.tick);
        rc.set("legend.fontsize", sizes.legend);
        if caps.has(Feature::LegendTitleFontSize) {
            rc.set("legend.title_fontsize", sizes.legend);
        }

        rc.set("lines.linewidth", style.line_width());
        rc.set("lines.markersize", style.marker_size());

        let cycle = ParamValue::list(colorway.palette(PaletteKind::Categorical));
        if caps.has(Feature::PropCycle) {
            rc.set("axes.prop_cycle", cycle);
        } else {
            rc.set("axes.color_cycle", cycle);
        }

        if caps.has(Feature::ConstrainedLayout) {
            rc.set("figure.constrained_layout.use", true);
        } else {
            rc.set("figure.autolayout", true);
        }

        if caps.has(Feature::TitleLocation) {
            rc.set("axes.titlelocation", style.title_alignment().name());
        }

        rc.set("legend.loc", legend_loc(style.legend_position(), caps));
        rc
    }
}

/// matplotlib `loc` string for a legend position.
fn legend_loc(position: LegendPosition, caps: &Capabilities) -> &'static str {
    if position.is_outside() && !caps.has(Feature::OutsideLegendLoc) {
        crate::warn!(
            Library::Matplotlib,
            "legend position {position} needs matplotlib 3.7, using 'best'"
        );
        return "best";
    }
    match position {
        LegendPosition::InsideUpperRight => "upper right",
        LegendPosition::InsideUpperLeft => "upper left",
        LegendPosition::InsideLowerRight => "lower right",
        LegendPosition::InsideLowerLeft => "lower left",
        LegendPosition::InsideCenter => "center",
        LegendPosition::OutsideRight => "outside right upper",
        LegendPosition::OutsideLeft => "outside left upper",
        LegendPosition::OutsideTop => "outside upper center",
        LegendPosition::OutsideBottom => "outside lower center",
    }
}

/// Figure-fraction overlay, lower-left anchored. Shared with seaborn.
pub(crate) fn figure_fraction_overlay(
    figure: &mut Figure,
    spec: &WatermarkSpec,
    mark: Mark,
) {
    let (fig_w, fig_h) = figure.size_px();
    let (x, y) = spec
        .position
        .place(fig_w, fig_h, mark.width_px, mark.height_px, spec.margin);
    figure.push_overlay(Overlay {
        content: mark.content,
        space: CoordinateSpace::FigureFraction,
        x: x / fig_w,
        y: y / fig_h,
        width: mark.width_px / fig_w,
        height: mark.height_px / fig_h,
        anchor: (HorizontalAnchor::Left, VerticalAnchor::Bottom),
        opacity: spec.opacity,
        z_order: WATERMARK_ZORDER,
    });
}

impl Adapter for Matplotlib {
    fn library(&self) -> Library {
        Library::Matplotlib
    }

    fn capability_table(&self) -> CapabilityTable {
        CAPABILITIES
    }

    fn style_writes(&self, style: &ResolvedStyle, caps: &Capabilities) -> ParamWrites {
        let mut writes = Self::rc_params(style, caps);
        let colorway = style.colorway();

        if caps.has(Feature::ColormapRegistry) {
            writes.set(
                format!("colormaps.{SEQUENTIAL_CMAP}"),
                self.continuous_scale(colorway, PaletteKind::Sequential),
            );
            writes.set(
                format!("colormaps.{DIVERGING_CMAP}"),
                self.continuous_scale(colorway, PaletteKind::Diverging),
            );
            writes.set("image.cmap", SEQUENTIAL_CMAP);
        } else {
            writes.set("image.cmap", FALLBACK_CMAP);
        }
        writes
    }

    fn place_watermark(&self, figure: &mut Figure, spec: &WatermarkSpec, mark: Mark) {
        figure_fraction_overlay(figure, spec, mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::figure::OverlayContent;
    use crate::adapters::test_support::{style, style_with_watermark};
    use crate::registry::Registry;
    use crate::style::{Preset, Resolver};
    use crate::version::VersionInfo;
    use approx::assert_relative_eq;

    fn writes(style: &ResolvedStyle, version: &str) -> ParamWrites {
        let info = VersionInfo::reported(Library::Matplotlib, version);
        Matplotlib.style_writes(style, &Matplotlib.capabilities(&info))
    }

    #[test]
    fn test_article_rc_params() {
        let w = writes(&style("article"), "3.8.0");
        assert_eq!(w.get("figure.dpi"), Some(&ParamValue::Int(300)));
        assert_eq!(w.get("figure.figsize"), Some(&ParamValue::Pair(3.5, 2.625)));
        assert_eq!(w.get("axes.titlesize"), Some(&ParamValue::Float(9.0)));
        assert_eq!(w.get("font.size"), Some(&ParamValue::Float(8.0)));
        assert_eq!(w.get("legend.loc"), Some(&ParamValue::from("upper right")));
        assert_eq!(w.get("image.cmap"), Some(&ParamValue::from(SEQUENTIAL_CMAP)));
        assert!(w.contains("colormaps.sane-figs-diverging"));
        assert!(w.contains("figure.constrained_layout.use"));
    }

    #[test]
    fn test_capability_branches() {
        let style = style("article");
        let new = writes(&style, "3.8.0");
        let old = writes(&style, "1.4.3");

        assert!(new.contains("axes.prop_cycle"));
        assert!(!new.contains("axes.color_cycle"));
        assert!(old.contains("axes.color_cycle"));
        assert!(!old.contains("axes.prop_cycle"));

        assert!(old.contains("figure.autolayout"));
        assert!(!old.contains("axes.titlelocation"));
        assert!(!old.contains("legend.title_fontsize"));
        assert_eq!(old.get("image.cmap"), Some(&ParamValue::from(FALLBACK_CMAP)));
    }

    #[test]
    fn test_outside_legend_falls_back_to_best() {
        let registry = Registry::with_builtins();
        let preset = Preset::article().with_legend_position(LegendPosition::OutsideRight);
        let style = Resolver::new(&registry).resolve(preset, None, None).unwrap();

        assert_eq!(
            writes(&style, "3.7.0").get("legend.loc"),
            Some(&ParamValue::from("outside right upper"))
        );
        assert_eq!(
            writes(&style, "3.6.3").get("legend.loc"),
            Some(&ParamValue::from("best"))
        );
    }

    #[test]
    fn test_text_watermark_bottom_right_fraction() {
        let style = style_with_watermark("article", "Draft");
        let mut fig = Matplotlib.new_figure(&style);
        let spec = style.watermark().unwrap();
        Matplotlib.watermark(&mut fig, spec).unwrap();

        let overlay = &fig.overlays()[0];
        assert_eq!(overlay.space, CoordinateSpace::FigureFraction);
        assert_eq!(overlay.z_order, WATERMARK_ZORDER);
        assert_relative_eq!(overlay.opacity, 0.3);
        assert_relative_eq!(overlay.y, 0.02);
        assert_relative_eq!(overlay.x + overlay.width, 0.98, epsilon = 1e-12);
        let OverlayContent::Text(text) = &overlay.content else {
            panic!("expected text");
        };
        assert_eq!(text.text, "Draft");
        assert_relative_eq!(text.font_size, 12.0);
    }
}
