//! # sane-figs
//!
//! Publication-ready figure defaults for matplotlib, seaborn, plotly and
//! altair from one declarative style description.
//!
//! A [`Preset`](style::Preset) names a mode (article, presentation or
//! custom) with overrides; a [`Colorway`](style::Colorway) bundles
//! categorical, sequential, diverging and qualitative palettes; a
//! [`WatermarkSpec`](style::WatermarkSpec) places text or a PNG on every
//! figure. The resolver merges them into one validated
//! [`ResolvedStyle`](style::ResolvedStyle), and the session manager applies
//! it to every installed library, recording undo tokens so the previous
//! configuration can be restored exactly.
//!
//! ## Features
//!
//! - **Modes**: article (300 DPI, 3.5in wide, 9pt titles) and presentation
//!   (16:9, 150 DPI, 28pt titles) out of the box
//! - **Colorways**: default, nature, vibrant, pastel and colorblind-safe
//! - **Version aware**: each adapter consults a capability table and falls
//!   back gracefully on old or unreadable versions
//! - **Reversible**: scoped activations restore prior values on every exit
//!   path, panics included
//! - **Configurable**: YAML preset and colorway documents discovered in
//!   project and user locations
//!
//! ## Quick Start
//!
//! ```rust
//! use sane_figs::prelude::*;
//!
//! let mut env = Environment::new();
//! env.install(Library::Matplotlib, "3.8.2")
//!     .install(Library::Plotly, "5.18.0");
//!
//! let style = resolve(Mode::Article, Some("colorblind-safe".into()), Some("Draft".into()))?;
//! assert_eq!(style.dpi(), 300);
//!
//! let mut manager = StyleManager::new(env);
//! {
//!     let scope = manager.scope(style, Targets::Installed)?;
//!     let figure = scope.new_figure(Library::Plotly)?;
//!     assert_eq!(figure.overlays().len(), 1);
//! }
//! assert_eq!(manager.depth(), 0);
//! # Ok::<(), sane_figs::Error>(())
//! ```
//!
//! ## Logging
//!
//! Set `SANE_FIGS_DEBUG=1` or call [`debug::enable`] to trace resolution,
//! activation and document loading on stderr.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Debug logging macros and timing guards.
pub mod debug;

/// Hex color parsing and formatting.
pub mod color;

/// Supported libraries, their configuration surfaces and the environment.
pub mod library;

/// Library version detection.
pub mod version;

// ============================================================================
// Style Modules
// ============================================================================

/// Presets, colorways, watermarks and the resolver.
pub mod style;

/// Registered presets and colorways.
pub mod registry;

/// YAML documents and standard configuration locations.
pub mod config;

// ============================================================================
// Application Modules
// ============================================================================

/// Per-library translation of resolved styles.
pub mod adapters;

/// Activation stack and the process-wide manager.
pub mod session;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for sane-figs operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use sane_figs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::adapters::{adapter_for, Adapter, Figure};
    pub use crate::error::{Error, Result};
    pub use crate::library::{ConfigSurface, Environment, Library, ParamValue};
    pub use crate::registry::{list_colorways, list_presets, Registry};
    pub use crate::session::{ActivationHandle, StyleManager, Targets};
    pub use crate::style::{
        resolve, Colorway, LegendPosition, Mode, PaletteKind, Position, Preset, ResolvedStyle,
        StyleRequest, TitleAlignment, WatermarkSpec,
    };
    pub use crate::version::{Version, VersionInfo};
}
