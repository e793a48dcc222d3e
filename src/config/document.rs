//! YAML preset and colorway documents.
//!
//! A document holds either one entry at the top level or a list under a
//! `presets:` / `colorways:` key. Loaders return values without touching
//! any registry. Parse errors carry the 1-based line of the problem.

use crate::error::{Error, Result};
use crate::style::colorway::{Accessibility, Colorway, PaletteKind};
use crate::style::layout::{LegendPosition, TitleAlignment};
use crate::style::preset::{FontSizeOverrides, Mode, Preset, StyleOverrides};
use crate::style::resolve::ColorwaySource;
use crate::style::validate;
use crate::style::watermark::{self, Position, WatermarkSpec};
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetDoc {
    name: String,
    mode: Mode,
    #[serde(default)]
    figure: FigureDoc,
    #[serde(default)]
    typography: TypographyDoc,
    #[serde(default)]
    elements: ElementsDoc,
    #[serde(default)]
    layout: LayoutDoc,
    colorway: Option<ColorwayRef>,
    watermark: Option<WatermarkDoc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FigureDoc {
    size: Option<(f64, f64)>,
    dpi: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypographyDoc {
    font_family: Option<String>,
    #[serde(default)]
    font_sizes: FontSizeOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementsDoc {
    line_width: Option<f64>,
    marker_size: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutDoc {
    title_alignment: Option<TitleAlignment>,
    legend_position: Option<LegendPosition>,
}

/// A colorway by name (`nature` or `{name: nature}`) or defined inline.
#[derive(Debug)]
enum ColorwayRef {
    Name(String),
    Inline(ColorwayDoc),
}

/// Fields of either mapping form; a bare `name` is a reference.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorwayEntry {
    name: String,
    description: Option<String>,
    colors: Option<ColorsDoc>,
    accessibility: Option<Accessibility>,
}

impl<'de> Deserialize<'de> for ColorwayRef {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RefVisitor;

        impl<'de> Visitor<'de> for RefVisitor {
            type Value = ColorwayRef;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a colorway name or a colorway mapping")
            }

            fn visit_str<E: de::Error>(self, name: &str) -> std::result::Result<ColorwayRef, E> {
                Ok(ColorwayRef::Name(name.to_string()))
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                map: A,
            ) -> std::result::Result<ColorwayRef, A::Error> {
                let entry = ColorwayEntry::deserialize(MapAccessDeserializer::new(map))?;
                match entry {
                    ColorwayEntry {
                        name,
                        description: None,
                        colors: None,
                        accessibility: None,
                    } => Ok(ColorwayRef::Name(name)),
                    ColorwayEntry {
                        name,
                        description: Some(description),
                        colors,
                        accessibility,
                    } => Ok(ColorwayRef::Inline(ColorwayDoc {
                        name,
                        description,
                        colors: colors.unwrap_or_default(),
                        accessibility: accessibility.unwrap_or_default(),
                    })),
                    ColorwayEntry {
                        description: None, ..
                    } => Err(de::Error::missing_field("description")),
                }
            }
        }

        deserializer.deserialize_any(RefVisitor)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorwayDoc {
    name: String,
    description: String,
    #[serde(default)]
    colors: ColorsDoc,
    #[serde(default)]
    accessibility: Accessibility,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorsDoc {
    #[serde(default)]
    categorical: Vec<String>,
    #[serde(default)]
    sequential: Vec<String>,
    #[serde(default)]
    diverging: Vec<String>,
    #[serde(default)]
    qualitative: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MarkType {
    #[default]
    Text,
    Image,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WatermarkDoc {
    #[serde(rename = "type", default)]
    kind: MarkType,
    text: Option<String>,
    image_path: Option<PathBuf>,
    #[serde(default)]
    position: Position,
    #[serde(default = "default_opacity")]
    opacity: f64,
    #[serde(default = "default_scale")]
    scale: f64,
    #[serde(default = "default_margin")]
    margin: (f64, f64),
    #[serde(default = "default_font_size")]
    font_size: f64,
    #[serde(default = "default_font_family")]
    font_family: String,
    #[serde(default = "default_font_weight")]
    font_weight: String,
    #[serde(default = "default_font_color")]
    font_color: String,
}

fn default_opacity() -> f64 {
    watermark::DEFAULT_OPACITY
}
fn default_scale() -> f64 {
    watermark::DEFAULT_SCALE
}
fn default_margin() -> (f64, f64) {
    watermark::DEFAULT_MARGIN
}
fn default_font_size() -> f64 {
    watermark::DEFAULT_FONT_SIZE
}
fn default_font_family() -> String {
    "sans-serif".to_string()
}
fn default_font_weight() -> String {
    "normal".to_string()
}
fn default_font_color() -> String {
    "#000000".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetBundle {
    presets: Vec<PresetDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorwayBundle {
    colorways: Vec<ColorwayDoc>,
}

fn missing(message: impl Into<String>) -> Error {
    Error::DocumentParse {
        line: 0,
        message: message.into(),
    }
}

fn from_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T> {
    serde_yaml_ng::from_str(yaml).map_err(|e| {
        let line = e.location().map(|l| l.line()).unwrap_or(0);
        Error::DocumentParse {
            line,
            message: e.to_string(),
        }
    })
}

/// Returns true when the top-level mapping has `key`.
fn is_bundle(yaml: &str, key: &str) -> Result<bool> {
    let value: serde_yaml_ng::Value = from_yaml(yaml)?;
    match value {
        serde_yaml_ng::Value::Null => Err(missing("document is empty")),
        serde_yaml_ng::Value::Mapping(map) => Ok(map.contains_key(key)),
        _ => Err(missing("document must be a mapping")),
    }
}

impl WatermarkDoc {
    fn into_spec(self, base_dir: &Path) -> Result<WatermarkSpec> {
        let spec = match self.kind {
            MarkType::Text => {
                let text = self
                    .text
                    .ok_or_else(|| missing("missing required field for text watermark: 'text'"))?;
                WatermarkSpec::text(text)
                    .font_size(self.font_size)
                    .font_family(self.font_family)
                    .font_weight(self.font_weight)
                    .color(self.font_color)
            }
            MarkType::Image => {
                let path = self.image_path.ok_or_else(|| {
                    missing("missing required field for image watermark: 'image_path'")
                })?;
                WatermarkSpec::image(base_dir.join(path))
            }
        };
        Ok(spec
            .position(self.position)
            .opacity(self.opacity)
            .scale(self.scale)
            .margin(self.margin.0, self.margin.1))
    }
}

impl ColorwayDoc {
    fn into_colorway(self) -> Colorway {
        Colorway::new(self.name, self.description)
            .with_palette(PaletteKind::Categorical, self.colors.categorical)
            .with_palette(PaletteKind::Sequential, self.colors.sequential)
            .with_palette(PaletteKind::Diverging, self.colors.diverging)
            .with_palette(PaletteKind::Qualitative, self.colors.qualitative)
            .with_accessibility(self.accessibility)
    }
}

impl PresetDoc {
    fn into_preset(self, base_dir: &Path) -> Result<Preset> {
        let colorway = self.colorway.map(|reference| match reference {
            ColorwayRef::Name(name) => ColorwaySource::Named(name),
            ColorwayRef::Inline(doc) => ColorwaySource::Inline(doc.into_colorway()),
        });
        let watermark = self
            .watermark
            .map(|doc| doc.into_spec(base_dir))
            .transpose()?;

        Ok(Preset {
            name: self.name,
            mode: self.mode,
            style: StyleOverrides {
                figure_size: self.figure.size,
                dpi: self.figure.dpi,
                font_family: self.typography.font_family,
                font_sizes: self.typography.font_sizes,
                line_width: self.elements.line_width,
                marker_size: self.elements.marker_size,
                title_alignment: self.layout.title_alignment,
                legend_position: self.layout.legend_position,
            },
            colorway,
            watermark,
        })
    }
}

/// Parses every preset in a YAML document and validates each one.
///
/// Relative watermark image paths are resolved against `base_dir`.
pub fn parse_presets(yaml: &str, base_dir: &Path) -> Result<Vec<Preset>> {
    let docs = if is_bundle(yaml, "presets")? {
        from_yaml::<PresetBundle>(yaml)?.presets
    } else {
        vec![from_yaml::<PresetDoc>(yaml)?]
    };

    let mut presets = Vec::with_capacity(docs.len());
    for doc in docs {
        let preset = doc.into_preset(base_dir)?;
        validate::ensure(&validate::validate_preset(&preset))?;
        presets.push(preset);
    }
    Ok(presets)
}

/// Parses every colorway in a YAML document and validates each one.
pub fn parse_colorways(yaml: &str) -> Result<Vec<Colorway>> {
    let docs = if is_bundle(yaml, "colorways")? {
        from_yaml::<ColorwayBundle>(yaml)?.colorways
    } else {
        vec![from_yaml::<ColorwayDoc>(yaml)?]
    };

    let mut colorways = Vec::with_capacity(docs.len());
    for doc in docs {
        let colorway = doc.into_colorway();
        validate::ensure(&validate::validate_colorway(&colorway))?;
        colorways.push(colorway);
    }
    Ok(colorways)
}

fn read(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::DocumentNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Loads every preset of a document.
///
/// # Errors
///
/// [`Error::DocumentNotFound`], [`Error::DocumentParse`] with the line of
/// the problem, or [`Error::ConfigValidation`] for invalid values.
pub fn load_presets(path: impl AsRef<Path>) -> Result<Vec<Preset>> {
    let path = path.as_ref();
    let yaml = read(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_presets(&yaml, base_dir)
}

/// Loads the first preset of a document.
pub fn load_preset(path: impl AsRef<Path>) -> Result<Preset> {
    load_presets(path)?
        .into_iter()
        .next()
        .ok_or_else(|| missing("no presets found in document"))
}

/// Loads every colorway of a document.
pub fn load_colorways(path: impl AsRef<Path>) -> Result<Vec<Colorway>> {
    parse_colorways(&read(path.as_ref())?)
}

/// Loads the first colorway of a document.
pub fn load_colorway(path: impl AsRef<Path>) -> Result<Colorway> {
    load_colorways(path)?
        .into_iter()
        .next()
        .ok_or_else(|| missing("no colorways found in document"))
}

const SAMPLE_PRESET: &str = r##"# Sample sane-figs preset.
# Edit the values below, then load it with
#   sane_figs::registry::load_presets_from_file("this_file.yaml")

# Required: unique preset name
name: "my-custom-preset"

# Required: article, presentation or custom
mode: "custom"

# Every field below is optional and falls back to the mode's default.
figure:
  # [width, height] in inches
  size: [6.4, 4.8]
  # 300 for print, 150 for slides
  dpi: 300

typography:
  font_family: "sans-serif"
  # Sizes in points
  font_sizes:
    title: 14.0
    label: 12.0
    legend: 10.0
    tick: 10.0
    annotation: 10.0

elements:
  line_width: 1.5
  marker_size: 6.0

layout:
  # left, center or right
  title_alignment: "center"
  # inside_upper_right, inside_upper_left, inside_lower_right,
  # inside_lower_left, inside_center, outside_right, outside_left,
  # outside_top, outside_bottom
  legend_position: "inside_upper_right"

# Reference a registered colorway by name:
#   default, nature, vibrant, pastel, colorblind-safe
colorway:
  name: "default"

# Or define one inline:
# colorway:
#   name: "my-colors"
#   description: "My custom color palette"
#   colors:
#     categorical: ["#E63946", "#457B9D", "#1D3557"]
#     sequential: ["#F1FAEE", "#A8DADC", "#457B9D", "#1D3557"]
#     diverging: ["#E63946", "#F4A261", "#E9C46A", "#2A9D8F", "#264653"]
#     qualitative: ["#E63946", "#A8DADC", "#457B9D", "#2A9D8F"]

# Remove this block to disable the watermark.
watermark:
  # text or image
  type: "text"
  text: "© 2025 My Lab"
  # For images, a PNG path relative to this file:
  # image_path: "logo.png"
  # top-left, top-right, bottom-left, bottom-right, center
  position: "bottom-right"
  # 0.0 to 1.0
  opacity: 0.3
  # Image width as a fraction of the figure width
  scale: 0.1
  # [x, y] distance from the edges as a fraction of the figure
  margin: [0.02, 0.02]
  font_size: 10.0
  font_family: "sans-serif"
  font_weight: "normal"
  font_color: "#000000"
"##;

const SAMPLE_COLORWAY: &str = r##"# Sample sane-figs colorway.
# Edit the values below, then load it with
#   sane_figs::registry::load_colorways_from_file("this_file.yaml")

colorways:
  # Required: unique colorway name
  - name: "my-lab-colors"
    # Required: short description
    description: "My lab's official color palette"
    # unspecified, print-friendly, high-contrast or colorblind-safe
    accessibility: "unspecified"
    colors:
      # Distinct groups (bars, lines). 6 to 10 colors work best.
      categorical:
        - "#E63946"
        - "#F1FAEE"
        - "#A8DADC"
        - "#457B9D"
        - "#1D3557"
        - "#2A9D8F"
      # Ordered values, light to dark.
      sequential:
        - "#F1FAEE"
        - "#A8DADC"
        - "#457B9D"
        - "#1D3557"
      # One extreme, through a neutral center, to the other extreme.
      diverging:
        - "#E63946"
        - "#F4A261"
        - "#E9C46A"
        - "#2A9D8F"
        - "#264653"
      # Nominal categories.
      qualitative:
        - "#E63946"
        - "#A8DADC"
        - "#457B9D"
        - "#1D3557"
        - "#2A9D8F"
        - "#E9C46A"
"##;

fn with_yaml_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => path.to_path_buf(),
        _ => path.with_extension("yaml"),
    }
}

/// Writes a commented preset template. Returns the path written, with a
/// `.yaml` extension added when missing.
pub fn create_sample_preset_yaml(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = with_yaml_extension(path.as_ref());
    std::fs::write(&path, SAMPLE_PRESET)?;
    Ok(path)
}

/// Writes a commented colorway template. Returns the path written, with a
/// `.yaml` extension added when missing.
pub fn create_sample_colorway_yaml(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = with_yaml_extension(path.as_ref());
    std::fs::write(&path, SAMPLE_COLORWAY)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_single_preset() {
        let yaml = r#"
name: thesis
mode: article
figure:
  dpi: 600
typography:
  font_sizes:
    title: 10
layout:
  legend_position: outside_right
colorway: nature
"#;
        let presets = parse_presets(yaml, Path::new(".")).unwrap();
        assert_eq!(presets.len(), 1);
        let preset = &presets[0];
        assert_eq!(preset.name, "thesis");
        assert_eq!(preset.mode, Mode::Article);
        assert_eq!(preset.style.dpi, Some(600));
        assert_eq!(preset.style.figure_size, None);
        assert_eq!(preset.style.font_sizes.title, Some(10.0));
        assert_eq!(preset.style.legend_position, Some(LegendPosition::OutsideRight));
        assert_eq!(preset.colorway, Some(ColorwaySource::Named("nature".into())));
    }

    #[test]
    fn test_parse_bundle_and_colorway_forms() {
        let yaml = r##"
presets:
  - name: by-reference
    mode: custom
    colorway:
      name: pastel
  - name: inline
    mode: presentation
    colorway:
      name: mono
      description: Monochrome
      colors:
        categorical: ["#000000"]
        sequential: ["#ffffff", "#000000"]
        diverging: ["#000000", "#ffffff", "#000000"]
        qualitative: ["#333333"]
"##;
        let presets = parse_presets(yaml, Path::new(".")).unwrap();
        assert_eq!(presets.len(), 2);
        assert_eq!(
            presets[0].colorway,
            Some(ColorwaySource::Named("pastel".into()))
        );
        match &presets[1].colorway {
            Some(ColorwaySource::Inline(colorway)) => {
                assert_eq!(colorway.name, "mono");
                assert_eq!(colorway.sequential, ["#ffffff", "#000000"]);
            }
            other => panic!("expected inline colorway, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_colorway_typo_names_field() {
        let yaml = r##"name: typo
mode: article
colorway:
  name: mono
  description: Monochrome
  colours:
    categorical: ["#000000"]
"##;
        match parse_presets(yaml, Path::new(".")).unwrap_err() {
            Error::DocumentParse { line, message } => {
                assert!(message.contains("colours"), "{message}");
                assert!((3..=6).contains(&line), "line {line}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_inline_colorway_without_description() {
        let yaml = "name: x\nmode: article\ncolorway:\n  name: mono\n  colors:\n    categorical: [\"#000000\"]\n";
        match parse_presets(yaml, Path::new(".")).unwrap_err() {
            Error::DocumentParse { message, .. } => {
                assert!(message.contains("description"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_watermark_defaults_to_text() {
        let yaml = r#"
name: marked
mode: article
watermark:
  text: "(c) 2025 My Lab"
  opacity: 0.2
"#;
        let preset = parse_presets(yaml, Path::new(".")).unwrap().remove(0);
        let spec = preset.watermark.unwrap();
        assert_eq!(spec.as_text().unwrap().text, "(c) 2025 My Lab");
        assert_relative_eq!(spec.opacity, 0.2);
        assert_eq!(spec.position, Position::BottomRight);
    }

    #[test]
    fn test_text_watermark_requires_text() {
        let yaml = "name: x\nmode: article\nwatermark:\n  opacity: 0.2\n";
        let err = parse_presets(yaml, Path::new(".")).unwrap_err();
        assert!(matches!(err, Error::DocumentParse { .. }));
    }

    #[test]
    fn test_image_path_relative_to_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), b"png bytes").unwrap();
        let yaml = "name: logo\nmode: article\nwatermark:\n  type: image\n  image_path: logo.png\n";
        let preset = parse_presets(yaml, dir.path()).unwrap().remove(0);
        assert_eq!(
            preset.watermark.unwrap().image_path(),
            Some(dir.path().join("logo.png").as_path())
        );
    }

    #[test]
    fn test_parse_error_reports_line() {
        let yaml = "name: thesis\nmode: article\nfigure:\n  dpi: lots\n";
        match parse_presets(yaml, Path::new(".")).unwrap_err() {
            Error::DocumentParse { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let yaml = "name: thesis\nmode: poster\n";
        assert!(matches!(
            parse_presets(yaml, Path::new(".")),
            Err(Error::DocumentParse { line: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let yaml = "name: x\nmode: article\nwatermark:\n  text: hi\n  opacity: 1.5\n";
        let err = parse_presets(yaml, Path::new(".")).unwrap_err();
        assert_eq!(err.field(), Some("watermark.opacity"));
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(
            parse_presets("", Path::new(".")),
            Err(Error::DocumentParse { line: 0, .. })
        ));
    }

    #[test]
    fn test_parse_colorways() {
        let yaml = r##"
name: ocean
description: Blues
accessibility: print-friendly
colors:
  categorical: ["#03045e", "#0077b6"]
  sequential: ["#caf0f8", "#03045e"]
  diverging: ["#03045e", "#ffffff", "#0077b6"]
  qualitative: ["#00b4d8"]
"##;
        let colorways = parse_colorways(yaml).unwrap();
        assert_eq!(colorways[0].name, "ocean");
        assert_eq!(colorways[0].accessibility, Accessibility::PrintFriendly);
    }

    #[test]
    fn test_colorway_bad_hex_names_index() {
        let yaml = "name: bad\ndescription: d\ncolors:\n  categorical: [\"#000000\", \"blue\"]\n  sequential: [\"#000000\"]\n  diverging: [\"#000000\"]\n  qualitative: [\"#000000\"]\n";
        let err = parse_colorways(yaml).unwrap_err();
        assert_eq!(err.field(), Some("categorical[1]"));
    }

    #[test]
    fn test_missing_document() {
        let err = load_presets("/no/such/dir/presets.yaml").unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(_)));
    }

    #[test]
    fn test_sample_templates_load_back() {
        let dir = tempfile::tempdir().unwrap();

        let preset_path = create_sample_preset_yaml(dir.path().join("preset")).unwrap();
        assert_eq!(preset_path.extension().unwrap(), "yaml");
        let preset = load_preset(&preset_path).unwrap();
        assert_eq!(preset.name, "my-custom-preset");
        assert_eq!(preset.mode, Mode::Custom);
        assert!(preset.watermark.is_some());

        let colorway_path = create_sample_colorway_yaml(dir.path().join("colors.yml")).unwrap();
        assert_eq!(colorway_path, dir.path().join("colors.yml"));
        let colorway = load_colorway(&colorway_path).unwrap();
        assert_eq!(colorway.name, "my-lab-colors");
    }
}
