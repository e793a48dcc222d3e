//! Field-level validation of presets, colorways and watermarks.
//!
//! Validators collect every issue instead of stopping at the first one, so
//! document authors see all problems at once. [`ensure`] turns the first
//! error-severity issue into [`Error::ConfigValidation`].

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::style::colorway::{Colorway, PaletteKind};
use crate::style::preset::{Preset, StyleOverrides};
use crate::style::resolve::{ColorwaySource, ResolvedStyle};
use crate::style::watermark::{WatermarkKind, WatermarkSpec};
use std::fmt;
use std::fs::File;

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The value is rejected.
    Error,
    /// The value is accepted but probably unintended.
    Warning,
}

/// A problem with one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the field, e.g. `watermark.opacity`.
    pub field: String,
    /// Human-readable description.
    pub message: String,
    /// Error or warning.
    pub severity: Severity,
}

impl ValidationIssue {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    fn prefixed(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }

    /// Returns true for error-severity issues.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{tag}: {}: {}", self.field, self.message)
    }
}

/// Fails with the first error-severity issue; warnings are logged.
pub fn ensure(issues: &[ValidationIssue]) -> Result<()> {
    for issue in issues.iter().filter(|i| !i.is_error()) {
        crate::warn!("validate", "{issue}");
    }
    match issues.iter().find(|i| i.is_error()) {
        Some(issue) => Err(Error::invalid(issue.field.clone(), issue.message.clone())),
        None => Ok(()),
    }
}

fn check_positive(issues: &mut Vec<ValidationIssue>, field: &str, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        issues.push(ValidationIssue::error(
            field,
            format!("must be a positive finite number, got {value}"),
        ));
    }
}

fn check_unit_interval(issues: &mut Vec<ValidationIssue>, field: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        issues.push(ValidationIssue::error(
            field,
            format!("must be within [0, 1], got {value}"),
        ));
    }
}

fn check_hex(issues: &mut Vec<ValidationIssue>, field: &str, color: &str) {
    if !Rgba::is_valid_hex(color) {
        issues.push(ValidationIssue::error(
            field,
            format!("invalid hex color '{color}', expected #RRGGBB or #RRGGBBAA"),
        ));
    }
}

fn check_non_empty(issues: &mut Vec<ValidationIssue>, field: &str, value: &str) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::error(field, "must be a non-empty string"));
    }
}

/// Validates a colorway's name, description and palettes.
#[must_use]
pub fn validate_colorway(colorway: &Colorway) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check_non_empty(&mut issues, "name", &colorway.name);
    if colorway.description.trim().is_empty() {
        issues.push(ValidationIssue::warning("description", "description is empty"));
    }

    for kind in PaletteKind::ALL {
        let palette = colorway.palette(kind);
        if palette.is_empty() {
            issues.push(ValidationIssue::error(
                kind.name(),
                "palette must contain at least one color",
            ));
        }
        for (i, color) in palette.iter().enumerate() {
            check_hex(&mut issues, &format!("{}[{i}]", kind.name()), color);
        }
    }
    issues
}

/// Validates placement, opacity, scale, typography and the image resource.
#[must_use]
pub fn validate_watermark(spec: &WatermarkSpec) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check_unit_interval(&mut issues, "opacity", spec.opacity);
    if !(spec.scale > 0.0 && spec.scale <= 1.0) {
        issues.push(ValidationIssue::error(
            "scale",
            format!("must be within (0, 1], got {}", spec.scale),
        ));
    }
    check_unit_interval(&mut issues, "margin.x", spec.margin.0);
    check_unit_interval(&mut issues, "margin.y", spec.margin.1);

    match &spec.kind {
        WatermarkKind::Text(mark) => {
            check_non_empty(&mut issues, "text", &mark.text);
            check_positive(&mut issues, "font_size", mark.font_size);
            check_non_empty(&mut issues, "font_family", &mark.font_family);
            check_non_empty(&mut issues, "font_weight", &mark.font_weight);
            check_hex(&mut issues, "color", &mark.color);
        }
        WatermarkKind::Image { path } => {
            if !path.is_file() {
                issues.push(ValidationIssue::error(
                    "image_path",
                    format!("image file not found: {}", path.display()),
                ));
            } else if let Err(e) = File::open(path) {
                issues.push(ValidationIssue::error(
                    "image_path",
                    format!("image file is not readable: {e}"),
                ));
            }
        }
    }
    issues
}

fn validate_overrides(style: &StyleOverrides) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if let Some((w, h)) = style.figure_size {
        check_positive(&mut issues, "figure_size.width", w);
        check_positive(&mut issues, "figure_size.height", h);
    }
    if style.dpi == Some(0) {
        issues.push(ValidationIssue::error("dpi", "must be a positive integer, got 0"));
    }
    if let Some(family) = &style.font_family {
        check_non_empty(&mut issues, "font_family", family);
    }
    let sizes = &style.font_sizes;
    for (name, value) in [
        ("title", sizes.title),
        ("label", sizes.label),
        ("legend", sizes.legend),
        ("tick", sizes.tick),
        ("annotation", sizes.annotation),
    ] {
        if let Some(value) = value {
            check_positive(&mut issues, &format!("font_sizes.{name}"), value);
        }
    }
    if let Some(width) = style.line_width {
        check_positive(&mut issues, "line_width", width);
    }
    if let Some(size) = style.marker_size {
        check_positive(&mut issues, "marker_size", size);
    }
    issues
}

/// Validates a preset's own fields, inline colorway and watermark.
///
/// A colorway referenced by name is checked when the preset is resolved.
#[must_use]
pub fn validate_preset(preset: &Preset) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check_non_empty(&mut issues, "name", &preset.name);
    issues.extend(validate_overrides(&preset.style));

    if let Some(ColorwaySource::Inline(colorway)) = &preset.colorway {
        issues.extend(
            validate_colorway(colorway)
                .into_iter()
                .map(|i| i.prefixed("colorway")),
        );
    }
    if let Some(watermark) = &preset.watermark {
        issues.extend(
            validate_watermark(watermark)
                .into_iter()
                .map(|i| i.prefixed("watermark")),
        );
    }
    issues
}

/// Validates a fully merged style.
#[must_use]
pub fn validate_resolved(style: &ResolvedStyle) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let (w, h) = style.figure_size();
    check_positive(&mut issues, "figure_size.width", w);
    check_positive(&mut issues, "figure_size.height", h);
    if style.dpi() == 0 {
        issues.push(ValidationIssue::error("dpi", "must be a positive integer, got 0"));
    }
    check_non_empty(&mut issues, "font_family", style.font_family());

    let sizes = style.font_sizes();
    for (name, value) in sizes.entries() {
        check_positive(&mut issues, &format!("font_sizes.{name}"), value);
    }
    if sizes.title < sizes.label {
        issues.push(ValidationIssue::warning(
            "font_sizes.title",
            format!(
                "title ({}) is smaller than axis labels ({})",
                sizes.title, sizes.label
            ),
        ));
    }
    check_positive(&mut issues, "line_width", style.line_width());
    check_positive(&mut issues, "marker_size", style.marker_size());

    issues.extend(
        validate_colorway(style.colorway())
            .into_iter()
            .map(|i| i.prefixed("colorway")),
    );
    if let Some(watermark) = style.watermark() {
        issues.extend(
            validate_watermark(watermark)
                .into_iter()
                .map(|i| i.prefixed("watermark")),
        );
    }
    issues
}
