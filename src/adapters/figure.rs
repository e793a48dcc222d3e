//! Figures and the overlays adapters draw on them.
//!
//! A [`Figure`] stands in for a library's figure object: a physical size, a
//! DPI and the overlays added to it. Each overlay records the coordinate
//! space it was placed in, since the four libraries disagree on origin and
//! units.

use crate::error::{Error, Result};
use crate::library::Library;
use crate::style::watermark::{HorizontalAnchor, VerticalAnchor, WatermarkKind, WatermarkSpec};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::io::Cursor;
use std::path::Path;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Converts a size in points to pixels at `dpi`.
#[must_use]
pub fn points_to_px(points: f64, dpi: f64) -> f64 {
    points * dpi / POINTS_PER_INCH
}

/// Where overlay coordinates live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSpace {
    /// Fractions of the figure, origin bottom-left (matplotlib, seaborn).
    FigureFraction,
    /// Fractions of the paper, origin bottom-left, positioned by anchors
    /// (plotly).
    PaperFraction,
    /// Pixels of the view, origin top-left (altair).
    ViewPixels,
}

/// A text overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    /// Text to draw.
    pub text: String,
    /// Font size in the library's unit (points or pixels).
    pub font_size: f64,
    /// Font family.
    pub font_family: String,
    /// Font weight.
    pub font_weight: String,
    /// Hex color.
    pub color: String,
}

/// What an overlay draws.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayContent {
    /// Text.
    Text(TextOverlay),
    /// An embedded PNG.
    Image {
        /// `data:image/png;base64,...` URI.
        data_uri: String,
        /// Source width in pixels.
        pixel_width: u32,
        /// Source height in pixels.
        pixel_height: u32,
    },
}

/// A mark placed on a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Payload.
    pub content: OverlayContent,
    /// Space of `x`, `y`, `width` and `height`.
    pub space: CoordinateSpace,
    /// Horizontal position of the anchor.
    pub x: f64,
    /// Vertical position of the anchor.
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
    /// Which side of the mark sits on `(x, y)`.
    pub anchor: (HorizontalAnchor, VerticalAnchor),
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stacking order; higher draws on top.
    pub z_order: i32,
}

/// A figure of one plotting library.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    library: Library,
    width_in: f64,
    height_in: f64,
    dpi: f64,
    overlays: Vec<Overlay>,
}

impl Figure {
    /// Creates an empty figure.
    #[must_use]
    pub fn new(library: Library, size_in: (f64, f64), dpi: f64) -> Self {
        Self {
            library,
            width_in: size_in.0,
            height_in: size_in.1,
            dpi,
            overlays: Vec::new(),
        }
    }

    /// Library the figure belongs to.
    #[must_use]
    pub fn library(&self) -> Library {
        self.library
    }

    /// Width and height in inches.
    #[must_use]
    pub fn size_inches(&self) -> (f64, f64) {
        (self.width_in, self.height_in)
    }

    /// Dots per inch.
    #[must_use]
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Width and height in pixels.
    #[must_use]
    pub fn size_px(&self) -> (f64, f64) {
        (self.width_in * self.dpi, self.height_in * self.dpi)
    }

    /// Overlays in insertion order.
    #[must_use]
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Adds an overlay.
    pub fn push_overlay(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }
}

/// Approximate pixel extent of `text` at `font_px`.
#[must_use]
pub fn estimate_text_px(text: &str, font_px: f64) -> (f64, f64) {
    let chars = text.chars().count() as f64;
    (chars * font_px * 0.6, font_px * 1.2)
}

/// A PNG watermark read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// The file embedded as a base64 data URI.
    pub data_uri: String,
}

impl DecodedImage {
    /// Reads and fully decodes the PNG at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::WatermarkResource`] if the file cannot be read or is not a
    /// valid PNG.
    pub fn load(path: &Path) -> Result<Self> {
        let resource_error = |message: String| Error::WatermarkResource {
            path: path.to_path_buf(),
            message,
        };

        let bytes = std::fs::read(path).map_err(|e| resource_error(e.to_string()))?;
        let decoder = png::Decoder::new(Cursor::new(&bytes));
        let mut reader = decoder
            .read_info()
            .map_err(|e| resource_error(e.to_string()))?;
        let mut pixels = vec![0; reader.output_buffer_size()];
        let frame = reader
            .next_frame(&mut pixels)
            .map_err(|e| resource_error(e.to_string()))?;
        if frame.width == 0 || frame.height == 0 {
            return Err(resource_error("image has no pixels".to_string()));
        }

        Ok(Self {
            width: frame.width,
            height: frame.height,
            data_uri: format!("data:image/png;base64,{}", STANDARD.encode(&bytes)),
        })
    }

    /// Height over width.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }
}

/// A watermark measured against a figure, before placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    /// Payload; text sizes are still in points.
    pub content: OverlayContent,
    /// Width in figure pixels.
    pub width_px: f64,
    /// Height in figure pixels.
    pub height_px: f64,
}

impl Mark {
    /// Sizes `spec` for `figure`.
    ///
    /// Text is measured from its font size at the figure DPI. Images are
    /// decoded and scaled to `scale` of the figure width, aspect preserved.
    ///
    /// # Errors
    ///
    /// [`Error::WatermarkResource`] if an image cannot be decoded.
    pub fn measure(spec: &WatermarkSpec, figure: &Figure) -> Result<Self> {
        match &spec.kind {
            WatermarkKind::Text(mark) => {
                let font_px = points_to_px(mark.font_size, figure.dpi());
                let (width_px, height_px) = estimate_text_px(&mark.text, font_px);
                Ok(Self {
                    content: OverlayContent::Text(TextOverlay {
                        text: mark.text.clone(),
                        font_size: mark.font_size,
                        font_family: mark.font_family.clone(),
                        font_weight: mark.font_weight.clone(),
                        color: mark.color.clone(),
                    }),
                    width_px,
                    height_px,
                })
            }
            WatermarkKind::Image { path } => {
                let image = DecodedImage::load(path)?;
                let width_px = figure.size_px().0 * spec.scale;
                Ok(Self {
                    width_px,
                    height_px: width_px * image.aspect(),
                    content: OverlayContent::Image {
                        data_uri: image.data_uri,
                        pixel_width: image.width,
                        pixel_height: image.height,
                    },
                })
            }
        }
    }

    /// Converts a text font size from points to pixels at `dpi`.
    #[must_use]
    pub fn with_font_px(mut self, dpi: f64) -> Self {
        if let OverlayContent::Text(text) = &mut self.content {
            text.font_size = points_to_px(text.font_size, dpi);
        }
        self
    }
}
