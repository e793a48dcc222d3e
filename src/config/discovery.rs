//! Standard locations for user presets and colorways.
//!
//! Files are searched in precedence order, project first:
//!
//! | presets                             | colorways                             |
//! |-------------------------------------|---------------------------------------|
//! | `./sane_figs.yaml`                  | `./colorways.yaml`                    |
//! | `./.sane_figs/presets.yaml`         | `./.sane_figs/colorways.yaml`         |
//! | `<config dir>/sane-figs/presets.yaml` | `<config dir>/sane-figs/colorways.yaml` |
//! | `~/.sane_figs.yaml`                 | `~/.colorways.yaml`                   |
//!
//! When two files define the same name, the higher-precedence file wins.

use crate::config::document;
use crate::error::Error;
use crate::registry::Registry;
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory.
pub const APP_DIR: &str = "sane-figs";

/// Per-user configuration directory, e.g. `~/.config/sane-figs`.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Where to look, given a project directory, config directory and home.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRoots {
    /// Project directory (usually the working directory).
    pub project: Option<PathBuf>,
    /// Per-user configuration directory.
    pub config: Option<PathBuf>,
    /// Home directory.
    pub home: Option<PathBuf>,
}

impl SearchRoots {
    /// Roots of the running process.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            project: std::env::current_dir().ok(),
            config: config_dir(),
            home: dirs::home_dir(),
        }
    }

    /// Preset file candidates in precedence order, existing or not.
    #[must_use]
    pub fn preset_candidates(&self) -> Vec<PathBuf> {
        self.candidates("sane_figs.yaml", "presets.yaml", ".sane_figs.yaml")
    }

    /// Colorway file candidates in precedence order, existing or not.
    #[must_use]
    pub fn colorway_candidates(&self) -> Vec<PathBuf> {
        self.candidates("colorways.yaml", "colorways.yaml", ".colorways.yaml")
    }

    fn candidates(&self, project_file: &str, dir_file: &str, home_file: &str) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(4);
        if let Some(project) = &self.project {
            paths.push(project.join(project_file));
            paths.push(project.join(".sane_figs").join(dir_file));
        }
        if let Some(config) = &self.config {
            paths.push(config.join(dir_file));
        }
        if let Some(home) = &self.home {
            paths.push(home.join(home_file));
        }
        paths
    }
}

fn existing(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.into_iter().filter(|p| p.is_file()).collect()
}

/// Existing preset files, highest precedence first.
#[must_use]
pub fn discover_preset_files() -> Vec<PathBuf> {
    existing(SearchRoots::from_env().preset_candidates())
}

/// Existing colorway files, highest precedence first.
#[must_use]
pub fn discover_colorway_files() -> Vec<PathBuf> {
    existing(SearchRoots::from_env().colorway_candidates())
}

/// What [`load_config`] registered and skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Registered preset names.
    pub presets: Vec<String>,
    /// Registered colorway names.
    pub colorways: Vec<String>,
    /// Files or entries that were skipped, with the reason.
    pub skipped: Vec<(PathBuf, Error)>,
}

impl LoadReport {
    fn skip(&mut self, path: &Path, err: Error) {
        crate::warn!("config", "skipping {}: {err}", path.display());
        self.skipped.push((path.to_path_buf(), err));
    }
}

/// Registers everything found in the standard locations.
///
/// Colorways load first so presets may reference them by name.
pub fn load_config(registry: &mut Registry) -> LoadReport {
    load_config_from(registry, &SearchRoots::from_env())
}

/// Registers everything found under `roots`.
pub fn load_config_from(registry: &mut Registry, roots: &SearchRoots) -> LoadReport {
    crate::time_scope!("config", "load_config");
    let mut report = LoadReport::default();

    for path in existing(roots.colorway_candidates()) {
        match document::load_colorways(&path) {
            Ok(colorways) => {
                for colorway in colorways {
                    let name = colorway.name.clone();
                    match registry.register_colorway(colorway) {
                        Ok(()) => report.colorways.push(name),
                        Err(err) => report.skip(&path, err),
                    }
                }
            }
            Err(err) => report.skip(&path, err),
        }
    }

    for path in existing(roots.preset_candidates()) {
        match document::load_presets(&path) {
            Ok(presets) => {
                for preset in presets {
                    let name = preset.name.clone();
                    match registry.register_preset(preset) {
                        Ok(()) => report.presets.push(name),
                        Err(err) => report.skip(&path, err),
                    }
                }
            }
            Err(err) => report.skip(&path, err),
        }
    }

    crate::info!(
        "config",
        "loaded {} presets and {} colorways ({} skipped)",
        report.presets.len(),
        report.colorways.len(),
        report.skipped.len()
    );
    report
}
