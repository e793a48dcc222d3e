//! Preset and colorway documents: loading, validation and registration.
//!
//! Run: cargo test --test document_test

#![allow(clippy::unwrap_used)]

use sane_figs::config::{
    create_sample_colorway_yaml, create_sample_preset_yaml, load_preset, load_presets,
};
use sane_figs::registry::Registry;
use sane_figs::style::{LegendPosition, Mode, Resolver, WatermarkKind};
use sane_figs::Error;
use std::fs;

const LAB_COLORWAY: &str = r##"
colorways:
  - name: lab
    description: Lab palette
    accessibility: colorblind-safe
    colors:
      categorical: ["#0072B2", "#D55E00", "#009E73"]
      sequential: ["#F7FBFF", "#08306B"]
      diverging: ["#B2182B", "#F7F7F7", "#2166AC"]
      qualitative: ["#0072B2", "#D55E00"]
"##;

const LAB_PRESETS: &str = r##"
presets:
  - name: lab-paper
    mode: article
    figure:
      size: [7.0, 3.5]
    layout:
      legend_position: outside_right
    colorway: lab
  - name: lab-talk
    mode: presentation
    typography:
      font_family: Helvetica
    watermark:
      text: "Lab 2025"
      position: top-left
      opacity: 0.5
"##;

#[test]
fn documents_register_and_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let colorways = dir.path().join("colorways.yaml");
    let presets = dir.path().join("presets.yaml");
    fs::write(&colorways, LAB_COLORWAY).unwrap();
    fs::write(&presets, LAB_PRESETS).unwrap();

    let mut registry = Registry::with_builtins();
    assert_eq!(registry.load_colorways_from_file(&colorways).unwrap(), ["lab"]);
    assert_eq!(
        registry.load_presets_from_file(&presets).unwrap(),
        ["lab-paper", "lab-talk"]
    );

    let resolver = Resolver::new(&registry);
    let paper = resolver.resolve("lab-paper", None, None).unwrap();
    assert_eq!(paper.mode(), Mode::Article);
    assert_eq!(paper.dpi(), 300);
    assert_eq!(paper.figure_size(), (7.0, 3.5));
    assert_eq!(paper.colorway().name, "lab");
    assert_eq!(paper.legend_position(), LegendPosition::OutsideRight);

    let talk = resolver.resolve("lab-talk", None, None).unwrap();
    assert_eq!(talk.font_family(), "Helvetica");
    assert_eq!(talk.colorway().name, "vibrant");
    let mark = talk.watermark().unwrap();
    assert!((mark.opacity - 0.5).abs() < f64::EPSILON);
    assert!(matches!(&mark.kind, WatermarkKind::Text(t) if t.text == "Lab 2025"));
}

#[test]
fn preset_referencing_unknown_colorway_fails_at_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preset.yaml");
    fs::write(&path, "name: orphan\nmode: article\ncolorway: missing\n").unwrap();

    let mut registry = Registry::with_builtins();
    registry.load_presets_from_file(&path).unwrap();
    let err = Resolver::new(&registry)
        .resolve("orphan", None, None)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownColorway { ref name, .. } if name == "missing"));
}

#[test]
fn invalid_opacity_names_the_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preset.yaml");
    fs::write(
        &path,
        "name: loud\nmode: article\nwatermark:\n  text: Draft\n  opacity: 1.5\n",
    )
    .unwrap();

    let err = load_presets(&path).unwrap_err();
    assert_eq!(err.field(), Some("watermark.opacity"));
}

#[test]
fn image_paths_are_relative_to_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("logo.png");
    {
        let file = fs::File::create(&logo).unwrap();
        let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), 2, 2);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0; 16]).unwrap();
    }
    let path = dir.path().join("preset.yaml");
    fs::write(
        &path,
        "name: logo\nmode: custom\nwatermark:\n  type: image\n  image_path: logo.png\n",
    )
    .unwrap();

    let preset = load_preset(&path).unwrap();
    let spec = preset.watermark.unwrap();
    assert_eq!(spec.image_path(), Some(logo.as_path()));
}

#[test]
fn parse_errors_report_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preset.yaml");
    fs::write(&path, "name: broken\nmode: article\nfigure:\n  dpi: lots\n").unwrap();

    match load_presets(&path).unwrap_err() {
        Error::DocumentParse { line, .. } => assert_eq!(line, 4),
        other => panic!("unexpected error: {other}"),
    }

    let missing = dir.path().join("absent.yaml");
    assert!(matches!(
        load_presets(&missing),
        Err(Error::DocumentNotFound(_))
    ));
}

#[test]
fn sample_templates_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let preset_path = create_sample_preset_yaml(dir.path().join("preset")).unwrap();
    let colorway_path = create_sample_colorway_yaml(dir.path().join("colors.yml")).unwrap();
    assert_eq!(preset_path.extension().unwrap(), "yaml");
    assert_eq!(colorway_path.extension().unwrap(), "yml");

    let mut registry = Registry::with_builtins();
    registry.load_colorways_from_file(&colorway_path).unwrap();
    registry.load_presets_from_file(&preset_path).unwrap();
    let style = Resolver::new(&registry)
        .resolve("my-custom-preset", Some("my-lab-colors".into()), None)
        .unwrap();
    assert_eq!(style.colorway().categorical.len(), 6);
    assert!(style.watermark().is_some());
}
