//! User configuration: YAML documents and their standard locations.

pub mod discovery;
pub mod document;

pub use discovery::{load_config, load_config_from, LoadReport, SearchRoots};
pub use document::{
    create_sample_colorway_yaml, create_sample_preset_yaml, load_colorway, load_colorways,
    load_preset, load_presets, parse_colorways, parse_presets,
};
