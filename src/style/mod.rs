//! Style model: presets, colorways, watermarks, layout and resolution.
//!
//! Everything here is plain data. Nothing in this module touches a plotting
//! library; [`resolve`] turns a preset plus overrides into one validated
//! [`ResolvedStyle`] that the adapters consume.

pub mod colorway;
pub mod layout;
pub mod preset;
pub mod resolve;
pub mod validate;
pub mod watermark;

pub use colorway::{Accessibility, Colorway, PaletteKind};
pub use layout::{LegendPosition, TitleAlignment};
pub use preset::{FontSizeOverrides, FontSizes, Mode, ModeDefaults, Preset, StyleOverrides};
pub use resolve::{
    resolve, ColorwaySource, PresetSource, ResolvedStyle, Resolver, StyleRequest, WatermarkSource,
};
pub use validate::{Severity, ValidationIssue};
pub use watermark::{
    HorizontalAnchor, Position, TextMark, VerticalAnchor, WatermarkKind, WatermarkSpec,
};
