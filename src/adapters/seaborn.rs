//! seaborn adapter: theme parameters over a matplotlib `rc` mapping.

use super::matplotlib::{figure_fraction_overlay, Matplotlib};
use super::{Adapter, Capabilities, CapabilityTable, Feature, ParamWrites};
use crate::adapters::figure::{Figure, Mark};
use crate::library::{Library, ParamValue};
use crate::style::colorway::PaletteKind;
use crate::style::watermark::WatermarkSpec;
use crate::style::{Mode, ResolvedStyle};
use crate::version::{Version, VersionInfo};

const CAPABILITIES: CapabilityTable = &[
    (Feature::ThemeFontParam, Version::new(0, 11, 0)),
    (Feature::ObjectsTheme, Version::new(0, 12, 0)),
];

/// Oldest matplotlib each seaborn release line requires, newest first.
const MATPLOTLIB_FLOOR: &[(Version, Version)] = &[
    (Version::new(0, 13, 0), Version::new(3, 4, 0)),
    (Version::new(0, 12, 0), Version::new(3, 1, 0)),
    (Version::new(0, 11, 0), Version::new(2, 2, 0)),
    (Version::new(0, 9, 0), Version::new(1, 5, 0)),
];

/// seaborn adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Seaborn;

impl Seaborn {
    /// matplotlib version guaranteed alongside this seaborn version.
    ///
    /// Unknown seaborn versions map to an unknown matplotlib version.
    #[must_use]
    pub fn matplotlib_floor(info: &VersionInfo) -> VersionInfo {
        MATPLOTLIB_FLOOR
            .iter()
            .find(|(seaborn, _)| info.at_least(*seaborn))
            .map_or_else(
                || VersionInfo::reported(Library::Matplotlib, ""),
                |(_, floor)| VersionInfo::reported(Library::Matplotlib, floor.to_string()),
            )
    }
}

fn theme_style(mode: Mode) -> &'static str {
    match mode {
        Mode::Presentation => "ticks",
        Mode::Article | Mode::Custom => "whitegrid",
    }
}

fn plotting_context(mode: Mode) -> &'static str {
    match mode {
        Mode::Article => "paper",
        Mode::Presentation => "talk",
        Mode::Custom => "notebook",
    }
}

impl Adapter for Seaborn {
    fn library(&self) -> Library {
        Library::Seaborn
    }

    fn capability_table(&self) -> CapabilityTable {
        CAPABILITIES
    }

    fn capabilities(&self, info: &VersionInfo) -> Capabilities {
        let own = Capabilities::compute(CAPABILITIES, info);
        let rc = Matplotlib.capabilities(&Self::matplotlib_floor(info));
        let mut enabled = own.enabled().to_vec();
        enabled.extend_from_slice(rc.enabled());
        Capabilities { enabled }
    }

    fn style_writes(&self, style: &ResolvedStyle, caps: &Capabilities) -> ParamWrites {
        let mut writes = ParamWrites::new();
        writes.set("style", theme_style(style.mode()));
        writes.set("context", plotting_context(style.mode()));
        writes.set(
            "palette",
            ParamValue::list(style.colorway().palette(PaletteKind::Categorical)),
        );
        if caps.has(Feature::ThemeFontParam) {
            writes.set("font", style.font_family());
        }

        let rc = Matplotlib::rc_params(style, caps);
        for (key, value) in rc.iter() {
            writes.set(format!("rc.{key}"), value.clone());
        }
        if caps.has(Feature::ObjectsTheme) {
            for (key, value) in rc {
                writes.set(format!("objects.theme.{key}"), value);
            }
        }
        writes
    }

    fn place_watermark(&self, figure: &mut Figure, spec: &WatermarkSpec, mark: Mark) {
        figure_fraction_overlay(figure, spec, mark);
    }
}
