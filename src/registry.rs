//! Named registries of presets and colorways.
//!
//! A [`Registry`] keeps entries in registration order. Existing names are
//! never overwritten silently: [`Registry::register_preset`] fails on a
//! duplicate and [`Registry::replace_preset`] must be called instead.
//! Built-in entries can be replaced but not unregistered.
//!
//! The process-wide registry starts with the built-ins and is reached
//! through [`read`], [`write`] and the free functions of this module.

use crate::config::document;
use crate::error::{Error, Result};
use crate::style::colorway::Colorway;
use crate::style::preset::Preset;
use crate::style::validate::{self, ValidationIssue};
use std::path::Path;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

const PRESET: &str = "preset";
const COLORWAY: &str = "colorway";

/// Presets and colorways by name, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    presets: Vec<Preset>,
    colorways: Vec<Colorway>,
}

fn check(kind: &str, name: &str, issues: &[ValidationIssue]) -> Result<()> {
    validate::ensure(issues).map_err(|err| match err {
        Error::ConfigValidation { field, message } => Error::ConfigValidation {
            field,
            message: format!("{kind} '{name}': {message}"),
        },
        other => other,
    })
}

impl Registry {
    /// Creates a registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in presets and colorways.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self {
            presets: Preset::built_in(),
            colorways: Colorway::built_in(),
        }
    }

    /// Looks up a preset.
    #[must_use]
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Looks up a colorway.
    #[must_use]
    pub fn colorway(&self, name: &str) -> Option<&Colorway> {
        self.colorways.iter().find(|c| c.name == name)
    }

    /// Preset names in registration order.
    #[must_use]
    pub fn preset_names(&self) -> Vec<String> {
        self.presets.iter().map(|p| p.name.clone()).collect()
    }

    /// Colorway names in registration order.
    #[must_use]
    pub fn colorway_names(&self) -> Vec<String> {
        self.colorways.iter().map(|c| c.name.clone()).collect()
    }

    /// Adds a preset.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyRegistered`] if the name is taken,
    /// [`Error::ConfigValidation`] if the preset is invalid.
    pub fn register_preset(&mut self, preset: Preset) -> Result<()> {
        self.register_presets(vec![preset]).map(|_| ())
    }

    /// Adds several presets, all or nothing. Returns their names.
    pub fn register_presets(&mut self, presets: Vec<Preset>) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::with_capacity(presets.len());
        for preset in &presets {
            check(PRESET, &preset.name, &validate::validate_preset(preset))?;
            if self.preset(&preset.name).is_some() || names.contains(&preset.name) {
                return Err(Error::AlreadyRegistered {
                    kind: PRESET,
                    name: preset.name.clone(),
                });
            }
            names.push(preset.name.clone());
        }
        for preset in presets {
            crate::info!("registry", "registered preset '{}'", preset.name);
            self.presets.push(preset);
        }
        Ok(names)
    }

    /// Adds or overwrites a preset, returning the entry it replaced.
    pub fn replace_preset(&mut self, preset: Preset) -> Result<Option<Preset>> {
        check(PRESET, &preset.name, &validate::validate_preset(&preset))?;
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(slot) => {
                crate::info!("registry", "replaced preset '{}'", preset.name);
                Ok(Some(std::mem::replace(slot, preset)))
            }
            None => {
                self.presets.push(preset);
                Ok(None)
            }
        }
    }

    /// Removes a user preset.
    ///
    /// # Errors
    ///
    /// [`Error::BuiltinProtected`] for built-ins, [`Error::UnknownPreset`]
    /// if the name is not registered.
    pub fn unregister_preset(&mut self, name: &str) -> Result<Preset> {
        if Preset::BUILT_IN_NAMES.contains(&name) {
            return Err(Error::BuiltinProtected {
                kind: PRESET,
                name: name.to_string(),
            });
        }
        match self.presets.iter().position(|p| p.name == name) {
            Some(index) => Ok(self.presets.remove(index)),
            None => Err(Error::UnknownPreset {
                name: name.to_string(),
                available: self.preset_names(),
            }),
        }
    }

    /// Adds a colorway.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyRegistered`] if the name is taken,
    /// [`Error::ConfigValidation`] if the colorway is invalid.
    pub fn register_colorway(&mut self, colorway: Colorway) -> Result<()> {
        self.register_colorways(vec![colorway]).map(|_| ())
    }

    /// Adds several colorways, all or nothing. Returns their names.
    pub fn register_colorways(&mut self, colorways: Vec<Colorway>) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::with_capacity(colorways.len());
        for colorway in &colorways {
            check(COLORWAY, &colorway.name, &validate::validate_colorway(colorway))?;
            if self.colorway(&colorway.name).is_some() || names.contains(&colorway.name) {
                return Err(Error::AlreadyRegistered {
                    kind: COLORWAY,
                    name: colorway.name.clone(),
                });
            }
            names.push(colorway.name.clone());
        }
        for colorway in colorways {
            crate::info!("registry", "registered colorway '{}'", colorway.name);
            self.colorways.push(colorway);
        }
        Ok(names)
    }

    /// Adds or overwrites a colorway, returning the entry it replaced.
    pub fn replace_colorway(&mut self, colorway: Colorway) -> Result<Option<Colorway>> {
        check(COLORWAY, &colorway.name, &validate::validate_colorway(&colorway))?;
        match self.colorways.iter_mut().find(|c| c.name == colorway.name) {
            Some(slot) => {
                crate::info!("registry", "replaced colorway '{}'", colorway.name);
                Ok(Some(std::mem::replace(slot, colorway)))
            }
            None => {
                self.colorways.push(colorway);
                Ok(None)
            }
        }
    }

    /// Removes a user colorway.
    pub fn unregister_colorway(&mut self, name: &str) -> Result<Colorway> {
        if Colorway::BUILT_IN_NAMES.contains(&name) {
            return Err(Error::BuiltinProtected {
                kind: COLORWAY,
                name: name.to_string(),
            });
        }
        match self.colorways.iter().position(|c| c.name == name) {
            Some(index) => Ok(self.colorways.remove(index)),
            None => Err(Error::UnknownColorway {
                name: name.to_string(),
                available: self.colorway_names(),
            }),
        }
    }

    /// Loads a preset document and registers every preset in it.
    pub fn load_presets_from_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let presets = document::load_presets(path)?;
        self.register_presets(presets)
    }

    /// Loads a colorway document and registers every colorway in it.
    pub fn load_colorways_from_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let colorways = document::load_colorways(path)?;
        self.register_colorways(colorways)
    }
}

static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();

fn global() -> &'static RwLock<Registry> {
    GLOBAL.get_or_init(|| {
        crate::debug::init_from_env();
        RwLock::new(Registry::with_builtins())
    })
}

/// Shared access to the process-wide registry.
pub fn read() -> RwLockReadGuard<'static, Registry> {
    global().read().unwrap_or_else(PoisonError::into_inner)
}

/// Exclusive access to the process-wide registry.
pub fn write() -> RwLockWriteGuard<'static, Registry> {
    global().write().unwrap_or_else(PoisonError::into_inner)
}

/// Names of every registered preset.
#[must_use]
pub fn list_presets() -> Vec<String> {
    read().preset_names()
}

/// Names of every registered colorway.
///
/// ```
/// let names = sane_figs::registry::list_colorways();
/// assert!(names.starts_with(&[
///     "default".to_string(),
///     "nature".to_string(),
///     "vibrant".to_string(),
///     "pastel".to_string(),
///     "colorblind-safe".to_string(),
/// ]));
/// ```
#[must_use]
pub fn list_colorways() -> Vec<String> {
    read().colorway_names()
}

/// Registers a preset in the process-wide registry.
pub fn register_preset(preset: Preset) -> Result<()> {
    write().register_preset(preset)
}

/// Registers a colorway in the process-wide registry.
pub fn register_colorway(colorway: Colorway) -> Result<()> {
    write().register_colorway(colorway)
}

/// Replaces (or adds) a preset in the process-wide registry.
pub fn replace_preset(preset: Preset) -> Result<Option<Preset>> {
    write().replace_preset(preset)
}

/// Replaces (or adds) a colorway in the process-wide registry.
pub fn replace_colorway(colorway: Colorway) -> Result<Option<Colorway>> {
    write().replace_colorway(colorway)
}

/// Loads a preset document into the process-wide registry.
pub fn load_presets_from_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let presets = document::load_presets(path)?;
    write().register_presets(presets)
}

/// Loads a colorway document into the process-wide registry.
pub fn load_colorways_from_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let colorways = document::load_colorways(path)?;
    write().register_colorways(colorways)
}
