//! Activation of resolved styles on installed libraries.
//!
//! A [`StyleManager`] owns the [`Environment`] and a stack of activation
//! layers. Each layer keeps one undo token per library, so deactivating a
//! layer restores exactly the values that were in place before it, whether
//! those were factory defaults or an outer activation.
//!
//! ```
//! use sane_figs::library::{Environment, Library, ParamValue};
//! use sane_figs::session::{StyleManager, Targets};
//! use sane_figs::style::Mode;
//!
//! let mut env = Environment::new();
//! env.install(Library::Matplotlib, "3.8.2");
//! let mut manager = StyleManager::new(env);
//!
//! let dpi = manager
//!     .publication_style(Mode::Article, Targets::Installed, None, None, |m| {
//!         m.environment().param(Library::Matplotlib, "figure.dpi")
//!     })
//!     .unwrap();
//! assert_eq!(dpi, Some(ParamValue::Int(300)));
//! assert_eq!(
//!     manager.environment().param(Library::Matplotlib, "figure.dpi"),
//!     Some(ParamValue::Int(100))
//! );
//! ```

use crate::adapters::{adapter_for, Adapter, AppliedHandle, Figure};
use crate::error::{Error, Result};
use crate::library::{Environment, Library};
use crate::style::{ColorwaySource, PresetSource, ResolvedStyle, StyleRequest, WatermarkSource};
use crate::version;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Figure size used when no style is active, in inches.
pub const DEFAULT_FIGURE_SIZE: (f64, f64) = (6.4, 4.8);
/// Figure DPI used when no style is active.
pub const DEFAULT_FIGURE_DPI: f64 = 100.0;

/// Which libraries an activation touches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Targets {
    /// Every installed library; absent ones are skipped.
    #[default]
    Installed,
    /// Exactly these libraries; every one must be installed.
    Only(Vec<Library>),
}

impl Targets {
    /// Libraries to apply to, in detection order.
    fn select(&self, env: &Environment) -> Result<Vec<Library>> {
        match self {
            Targets::Installed => Ok(env.installed()),
            Targets::Only(requested) => {
                let mut libraries = Vec::with_capacity(requested.len());
                for &library in requested {
                    if !env.is_installed(library) {
                        return Err(Error::LibraryNotAvailable(library));
                    }
                    if !libraries.contains(&library) {
                        libraries.push(library);
                    }
                }
                Ok(libraries)
            }
        }
    }
}

impl From<Library> for Targets {
    fn from(library: Library) -> Self {
        Targets::Only(vec![library])
    }
}

impl From<Vec<Library>> for Targets {
    fn from(libraries: Vec<Library>) -> Self {
        Targets::Only(libraries)
    }
}

impl From<&[Library]> for Targets {
    fn from(libraries: &[Library]) -> Self {
        Targets::Only(libraries.to_vec())
    }
}

/// Identifies one live activation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an activation stays in effect until its handle is deactivated"]
pub struct ActivationHandle {
    id: u64,
    libraries: Vec<Library>,
}

impl ActivationHandle {
    /// Unique id within the manager.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Libraries the activation was applied to.
    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }
}

struct Layer {
    id: u64,
    style: ResolvedStyle,
    handles: Vec<AppliedHandle>,
}

impl Layer {
    fn covers(&self, library: Library) -> bool {
        self.handles.iter().any(|h| h.library() == library)
    }
}

fn adapter_in(
    overrides: &BTreeMap<Library, Box<dyn Adapter>>,
    library: Library,
) -> &dyn Adapter {
    overrides
        .get(&library)
        .map_or_else(|| adapter_for(library), |adapter| adapter.as_ref())
}

/// Owner of the environment and the stack of active styles.
pub struct StyleManager {
    env: Environment,
    adapters: BTreeMap<Library, Box<dyn Adapter>>,
    layers: Vec<Layer>,
    next_id: u64,
}

impl StyleManager {
    /// Creates a manager over `env` with no active style.
    #[must_use]
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            adapters: BTreeMap::new(),
            layers: Vec::new(),
            next_id: 1,
        }
    }

    /// Uses `adapter` instead of the built-in one for its library.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Box<dyn Adapter>) -> Self {
        self.adapters.insert(adapter.library(), adapter);
        self
    }

    /// The managed environment.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Mutable access to the environment, e.g. to install a library.
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Adapter used for `library`.
    #[must_use]
    pub fn adapter(&self, library: Library) -> &dyn Adapter {
        adapter_in(&self.adapters, library)
    }

    /// Number of live activations.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if `handle` belongs to a live activation.
    #[must_use]
    pub fn is_active(&self, handle: &ActivationHandle) -> bool {
        self.layers.iter().any(|layer| layer.id == handle.id)
    }

    /// Style of the innermost activation.
    #[must_use]
    pub fn active_style(&self) -> Option<&ResolvedStyle> {
        self.layers.last().map(|layer| &layer.style)
    }

    /// Style of the innermost activation that touched `library`.
    #[must_use]
    pub fn active_style_for(&self, library: Library) -> Option<&ResolvedStyle> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.covers(library))
            .map(|layer| &layer.style)
    }

    /// Applies `style` to `targets` as a new innermost layer.
    ///
    /// # Errors
    ///
    /// [`Error::LibraryNotAvailable`] if an explicitly requested library is
    /// absent; nothing is changed then. If an adapter fails, the libraries
    /// already styled stay styled in a recorded layer that [`reset`] undoes,
    /// and the adapter's error is returned.
    ///
    /// [`reset`]: StyleManager::reset
    pub fn activate(
        &mut self,
        style: ResolvedStyle,
        targets: impl Into<Targets>,
    ) -> Result<ActivationHandle> {
        let libraries = targets.into().select(&self.env)?;
        let id = self.next_id;
        self.next_id += 1;

        let mut layer = Layer {
            id,
            style,
            handles: Vec::with_capacity(libraries.len()),
        };
        for &library in &libraries {
            let info = version::detect(&self.env, library);
            let adapter = adapter_in(&self.adapters, library);
            let Some(surface) = self.env.surface_mut(library) else {
                continue;
            };
            match adapter.apply(&layer.style, &info, surface) {
                Ok(handle) => layer.handles.push(handle),
                Err(err) => {
                    crate::error!(
                        "session",
                        "activation {id} failed on {library}: {err} ({} libraries left styled)",
                        layer.handles.len()
                    );
                    if !layer.handles.is_empty() {
                        self.layers.push(layer);
                    }
                    return Err(err);
                }
            }
        }

        crate::info!(
            "session",
            "activated '{}' as {id} on [{}]",
            layer.style.preset_name(),
            libraries
                .iter()
                .map(|l| l.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.layers.push(layer);
        Ok(ActivationHandle { id, libraries })
    }

    /// Reverts the activation of `handle`.
    ///
    /// Activations entered after it are reverted first, innermost first.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownActivation`] if `handle` is no longer active.
    pub fn deactivate(&mut self, handle: &ActivationHandle) -> Result<()> {
        let index = self
            .layers
            .iter()
            .position(|layer| layer.id == handle.id)
            .ok_or(Error::UnknownActivation(handle.id))?;
        self.unwind_to(index);
        Ok(())
    }

    /// Reverts every activation, innermost first.
    pub fn reset(&mut self) {
        if !self.layers.is_empty() {
            crate::info!("session", "resetting {} activations", self.layers.len());
        }
        self.unwind_to(0);
    }

    fn unwind_to(&mut self, depth: usize) {
        while self.layers.len() > depth {
            let Some(layer) = self.layers.pop() else {
                break;
            };
            for handle in layer.handles.iter().rev() {
                let library = handle.library();
                let adapter = adapter_in(&self.adapters, library);
                match self.env.surface_mut(library) {
                    Some(surface) => adapter.revert(handle, surface),
                    None => crate::warn!(
                        "session",
                        "{library} was uninstalled, cannot revert activation {}",
                        layer.id
                    ),
                }
            }
            crate::debug!("session", "deactivated {}", layer.id);
        }
    }

    /// Activates `style` until the returned guard is dropped.
    ///
    /// The guard dereferences to the manager, so scopes nest.
    ///
    /// # Errors
    ///
    /// As [`StyleManager::activate`], except that a partially applied style
    /// is reverted before the error is returned.
    pub fn scope(
        &mut self,
        style: ResolvedStyle,
        targets: impl Into<Targets>,
    ) -> Result<StyleScope<'_>> {
        let depth = self.depth();
        match self.activate(style, targets) {
            Ok(handle) => Ok(StyleScope {
                manager: self,
                handle,
            }),
            Err(err) => {
                self.unwind_to(depth);
                Err(err)
            }
        }
    }

    /// Runs `f` with `style` active, restoring the prior values afterwards,
    /// including when `f` panics.
    ///
    /// # Errors
    ///
    /// As [`StyleManager::scope`].
    pub fn scoped<T>(
        &mut self,
        style: ResolvedStyle,
        targets: impl Into<Targets>,
        f: impl FnOnce(&mut StyleManager) -> T,
    ) -> Result<T> {
        let mut scope = self.scope(style, targets)?;
        Ok(f(&mut scope))
    }

    /// Resolves against the process-wide registry and activates the result.
    ///
    /// # Errors
    ///
    /// Resolution errors (nothing is changed) or those of
    /// [`StyleManager::activate`].
    pub fn setup(
        &mut self,
        preset: impl Into<PresetSource>,
        targets: impl Into<Targets>,
        colorway: Option<ColorwaySource>,
        watermark: Option<WatermarkSource>,
    ) -> Result<ActivationHandle> {
        let style = request(preset, colorway, watermark).resolve()?;
        self.activate(style, targets)
    }

    /// Scoped form of [`StyleManager::setup`].
    ///
    /// # Errors
    ///
    /// Resolution errors or those of [`StyleManager::scope`].
    pub fn publication_style<T>(
        &mut self,
        preset: impl Into<PresetSource>,
        targets: impl Into<Targets>,
        colorway: Option<ColorwaySource>,
        watermark: Option<WatermarkSource>,
        f: impl FnOnce(&mut StyleManager) -> T,
    ) -> Result<T> {
        let style = request(preset, colorway, watermark).resolve()?;
        self.scoped(style, targets, f)
    }

    /// [`StyleManager::setup`] for matplotlib only.
    ///
    /// # Errors
    ///
    /// As [`StyleManager::setup`].
    pub fn setup_matplotlib(
        &mut self,
        preset: impl Into<PresetSource>,
        colorway: Option<ColorwaySource>,
        watermark: Option<WatermarkSource>,
    ) -> Result<ActivationHandle> {
        self.setup(preset, Library::Matplotlib, colorway, watermark)
    }

    /// [`StyleManager::setup`] for seaborn only.
    ///
    /// # Errors
    ///
    /// As [`StyleManager::setup`].
    pub fn setup_seaborn(
        &mut self,
        preset: impl Into<PresetSource>,
        colorway: Option<ColorwaySource>,
        watermark: Option<WatermarkSource>,
    ) -> Result<ActivationHandle> {
        self.setup(preset, Library::Seaborn, colorway, watermark)
    }

    /// [`StyleManager::setup`] for plotly only.
    ///
    /// # Errors
    ///
    /// As [`StyleManager::setup`].
    pub fn setup_plotly(
        &mut self,
        preset: impl Into<PresetSource>,
        colorway: Option<ColorwaySource>,
        watermark: Option<WatermarkSource>,
    ) -> Result<ActivationHandle> {
        self.setup(preset, Library::Plotly, colorway, watermark)
    }

    /// [`StyleManager::setup`] for altair only.
    ///
    /// # Errors
    ///
    /// As [`StyleManager::setup`].
    pub fn setup_altair(
        &mut self,
        preset: impl Into<PresetSource>,
        colorway: Option<ColorwaySource>,
        watermark: Option<WatermarkSource>,
    ) -> Result<ActivationHandle> {
        self.setup(preset, Library::Altair, colorway, watermark)
    }

    /// New figure for `library`, sized by the style active on it and
    /// carrying that style's watermark.
    ///
    /// # Errors
    ///
    /// [`Error::LibraryNotAvailable`] if `library` is absent, or
    /// [`Error::WatermarkResource`] if the watermark image is unusable.
    pub fn new_figure(&self, library: Library) -> Result<Figure> {
        if !self.env.is_installed(library) {
            return Err(Error::LibraryNotAvailable(library));
        }
        let adapter = self.adapter(library);
        let Some(style) = self.active_style_for(library) else {
            return Ok(Figure::new(library, DEFAULT_FIGURE_SIZE, DEFAULT_FIGURE_DPI));
        };
        let mut figure = adapter.new_figure(style);
        if let Some(spec) = style.watermark() {
            adapter.watermark(&mut figure, spec)?;
        }
        Ok(figure)
    }

    /// Adds the active watermark of the figure's library to `figure`.
    ///
    /// Does nothing when no watermark is active.
    ///
    /// # Errors
    ///
    /// [`Error::WatermarkResource`] if the watermark image is unusable.
    pub fn decorate(&self, figure: &mut Figure) -> Result<()> {
        let library = figure.library();
        match self.active_style_for(library).and_then(ResolvedStyle::watermark) {
            Some(spec) => self.adapter(library).watermark(figure, spec),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for StyleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleManager")
            .field("env", &self.env)
            .field(
                "layers",
                &self
                    .layers
                    .iter()
                    .map(|l| (l.id, l.style.preset_name()))
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

fn request(
    preset: impl Into<PresetSource>,
    colorway: Option<ColorwaySource>,
    watermark: Option<WatermarkSource>,
) -> StyleRequest {
    let mut request = StyleRequest::new(preset);
    if let Some(colorway) = colorway {
        request = request.colorway(colorway);
    }
    if let Some(watermark) = watermark {
        request = request.watermark(watermark);
    }
    request
}

/// Guard of a scoped activation; deactivates it on drop.
pub struct StyleScope<'m> {
    manager: &'m mut StyleManager,
    handle: ActivationHandle,
}

impl StyleScope<'_> {
    /// Handle of the scoped activation.
    pub fn handle(&self) -> &ActivationHandle {
        &self.handle
    }
}

impl Deref for StyleScope<'_> {
    type Target = StyleManager;

    fn deref(&self) -> &StyleManager {
        &*self.manager
    }
}

impl DerefMut for StyleScope<'_> {
    fn deref_mut(&mut self) -> &mut StyleManager {
        &mut *self.manager
    }
}

impl Drop for StyleScope<'_> {
    fn drop(&mut self) {
        if self.manager.is_active(&self.handle) {
            if let Err(err) = self.manager.deactivate(&self.handle) {
                crate::error!("session", "scope exit failed: {err}");
            }
        }
    }
}

// ============================================================================
// Process-wide manager
// ============================================================================

static GLOBAL: OnceLock<Mutex<StyleManager>> = OnceLock::new();

/// Exclusive access to the process-wide manager.
///
/// Its environment starts empty; install libraries through
/// [`StyleManager::environment_mut`].
pub fn global() -> MutexGuard<'static, StyleManager> {
    GLOBAL
        .get_or_init(|| {
            crate::debug::init_from_env();
            Mutex::new(StyleManager::new(Environment::new()))
        })
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// [`StyleManager::setup`] on the process-wide manager.
///
/// # Errors
///
/// As [`StyleManager::setup`].
pub fn setup(
    preset: impl Into<PresetSource>,
    targets: impl Into<Targets>,
    colorway: Option<ColorwaySource>,
    watermark: Option<WatermarkSource>,
) -> Result<ActivationHandle> {
    global().setup(preset, targets, colorway, watermark)
}

/// [`StyleManager::reset`] on the process-wide manager.
pub fn reset() {
    global().reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Capabilities, CapabilityTable, Mark, ParamWrites};
    use crate::library::{ConfigSurface, ParamTable, ParamValue};
    use crate::registry::Registry;
    use crate::style::watermark::WatermarkSpec;
    use crate::style::{Preset, Resolver};
    use crate::version::VersionInfo;

    fn env() -> Environment {
        let mut env = Environment::new();
        env.install(Library::Matplotlib, "3.8.2")
            .install(Library::Seaborn, "0.13.2")
            .install(Library::Plotly, "5.18.0")
            .install(Library::Altair, "5.2.0");
        env
    }

    fn style(preset: &str) -> ResolvedStyle {
        Resolver::new(&Registry::with_builtins())
            .resolve(preset, None, None)
            .unwrap()
    }

    fn snapshots(manager: &StyleManager) -> Vec<ParamTable> {
        Library::ALL
            .iter()
            .filter_map(|&l| manager.environment().snapshot(l))
            .collect()
    }

    fn param(manager: &StyleManager, key: &str) -> Option<ParamValue> {
        manager.environment().param(Library::Matplotlib, key)
    }

    /// Plotly adapter whose `apply` always fails.
    struct BrokenPlotly;

    impl Adapter for BrokenPlotly {
        fn library(&self) -> Library {
            Library::Plotly
        }

        fn capability_table(&self) -> CapabilityTable {
            &[]
        }

        fn style_writes(&self, _style: &ResolvedStyle, _caps: &Capabilities) -> ParamWrites {
            ParamWrites::new()
        }

        fn place_watermark(&self, _figure: &mut Figure, _spec: &WatermarkSpec, _mark: Mark) {}

        fn apply(
            &self,
            _style: &ResolvedStyle,
            _info: &VersionInfo,
            _surface: &mut dyn ConfigSurface,
        ) -> Result<AppliedHandle> {
            Err(Error::WatermarkResource {
                path: "logo.png".into(),
                message: "broken".to_string(),
            })
        }
    }

    #[test]
    fn test_activate_and_deactivate_restores() {
        let mut manager = StyleManager::new(env());
        let before = snapshots(&manager);

        let handle = manager.activate(style("article"), Targets::Installed).unwrap();
        assert_eq!(handle.libraries(), Library::ALL);
        assert_eq!(param(&manager, "figure.dpi"), Some(ParamValue::Int(300)));
        assert_ne!(snapshots(&manager), before);

        manager.deactivate(&handle).unwrap();
        assert_eq!(snapshots(&manager), before);
        assert!(!manager.is_active(&handle));
        assert!(matches!(
            manager.deactivate(&handle),
            Err(Error::UnknownActivation(_))
        ));
    }

    #[test]
    fn test_explicit_absent_library_fails_before_mutation() {
        let mut env = env();
        env.uninstall(Library::Altair);
        let mut manager = StyleManager::new(env);
        let before = snapshots(&manager);

        let err = manager
            .activate(style("article"), vec![Library::Matplotlib, Library::Altair])
            .unwrap_err();
        assert!(matches!(err, Error::LibraryNotAvailable(Library::Altair)));
        assert_eq!(snapshots(&manager), before);
        assert_eq!(manager.depth(), 0);

        let handle = manager.activate(style("article"), Targets::Installed).unwrap();
        assert!(!handle.libraries().contains(&Library::Altair));
    }

    #[test]
    fn test_only_targets_leave_others_untouched() {
        let mut manager = StyleManager::new(env());
        let plotly_before = manager.environment().snapshot(Library::Plotly);
        let _handle = manager
            .activate(style("presentation"), Library::Matplotlib)
            .unwrap();
        assert_eq!(manager.environment().snapshot(Library::Plotly), plotly_before);
        assert_eq!(param(&manager, "figure.dpi"), Some(ParamValue::Int(150)));
    }

    #[test]
    fn test_nested_scopes_restore_innermost_first() {
        let mut manager = StyleManager::new(env());
        let before = snapshots(&manager);
        {
            let mut outer = manager.scope(style("article"), Targets::Installed).unwrap();
            let after_outer = snapshots(&outer);
            {
                let inner = outer.scope(style("presentation"), Targets::Installed).unwrap();
                assert_eq!(param(&inner, "figure.dpi"), Some(ParamValue::Int(150)));
                assert_eq!(inner.depth(), 2);
            }
            assert_eq!(snapshots(&outer), after_outer);
            assert_eq!(param(&outer, "figure.dpi"), Some(ParamValue::Int(300)));
        }
        assert_eq!(snapshots(&manager), before);
        assert_eq!(manager.depth(), 0);
    }

    #[test]
    fn test_deactivating_outer_unwinds_inner() {
        let mut manager = StyleManager::new(env());
        let before = snapshots(&manager);
        let outer = manager.activate(style("article"), Targets::Installed).unwrap();
        let inner = manager.activate(style("presentation"), Targets::Installed).unwrap();

        manager.deactivate(&outer).unwrap();
        assert!(!manager.is_active(&inner));
        assert_eq!(snapshots(&manager), before);
    }

    #[test]
    fn test_scope_inside_global_restores_global_values() {
        let mut manager = StyleManager::new(env());
        let _global = manager.activate(style("article"), Targets::Installed).unwrap();
        let with_global = snapshots(&manager);

        manager
            .scoped(style("presentation"), Targets::Installed, |m| {
                assert_eq!(param(m, "figure.dpi"), Some(ParamValue::Int(150)));
            })
            .unwrap();
        assert_eq!(snapshots(&manager), with_global);
        assert_eq!(manager.depth(), 1);
    }

    #[test]
    fn test_scope_restores_on_panic() {
        let mut manager = StyleManager::new(env());
        let before = snapshots(&manager);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            manager
                .scoped(style("article"), Targets::Installed, |_| panic!("plot failed"))
                .unwrap();
        }));
        assert!(result.is_err());
        assert_eq!(snapshots(&manager), before);
        assert_eq!(manager.depth(), 0);
    }

    #[test]
    fn test_partial_failure_keeps_layer_until_reset() {
        let mut manager = StyleManager::new(env()).with_adapter(Box::new(BrokenPlotly));
        let before = snapshots(&manager);

        let err = manager.activate(style("article"), Targets::Installed).unwrap_err();
        assert!(matches!(err, Error::WatermarkResource { .. }));
        assert_eq!(manager.depth(), 1);
        assert_eq!(param(&manager, "figure.dpi"), Some(ParamValue::Int(300)));
        assert!(manager.active_style_for(Library::Seaborn).is_some());
        assert!(manager.active_style_for(Library::Altair).is_none());

        manager.reset();
        assert_eq!(snapshots(&manager), before);
    }

    #[test]
    fn test_partial_failure_in_scope_restores_immediately() {
        let mut manager = StyleManager::new(env()).with_adapter(Box::new(BrokenPlotly));
        let before = snapshots(&manager);

        let result = manager.scoped(style("article"), Targets::Installed, |_| ());
        assert!(result.is_err());
        assert_eq!(manager.depth(), 0);
        assert_eq!(snapshots(&manager), before);
    }

    #[test]
    fn test_reset_reverts_everything() {
        let mut manager = StyleManager::new(env());
        let before = snapshots(&manager);
        let _a = manager.activate(style("article"), Targets::Installed).unwrap();
        let _b = manager.activate(style("presentation"), Library::Plotly).unwrap();

        manager.reset();
        assert_eq!(manager.depth(), 0);
        assert!(manager.active_style().is_none());
        assert_eq!(snapshots(&manager), before);
    }

    #[test]
    fn test_new_figure_uses_active_style_and_watermark() {
        let mut manager = StyleManager::new(env());
        let fig = manager.new_figure(Library::Matplotlib).unwrap();
        assert_eq!(fig.size_inches(), DEFAULT_FIGURE_SIZE);
        assert!(fig.overlays().is_empty());

        let registry = Registry::with_builtins();
        let styled = Resolver::new(&registry)
            .resolve(Preset::article(), None, Some("Preprint".into()))
            .unwrap();
        let _handle = manager.activate(styled, Library::Matplotlib).unwrap();

        let fig = manager.new_figure(Library::Matplotlib).unwrap();
        assert_eq!(fig.size_inches(), (3.5, 2.625));
        assert_eq!(fig.overlays().len(), 1);

        let mut plotly_fig = Figure::new(Library::Plotly, (4.0, 3.0), 100.0);
        manager.decorate(&mut plotly_fig).unwrap();
        assert!(plotly_fig.overlays().is_empty());

        let mut env = Environment::new();
        env.install(Library::Plotly, "5.0");
        assert!(matches!(
            StyleManager::new(env).new_figure(Library::Altair),
            Err(Error::LibraryNotAvailable(Library::Altair))
        ));
    }

    #[test]
    fn test_malformed_version_still_activates() {
        let mut env = Environment::new();
        env.install(Library::Matplotlib, "unknown");
        let mut manager = StyleManager::new(env);

        let _handle = manager.activate(style("article"), Targets::Installed).unwrap();
        assert!(param(&manager, "axes.color_cycle").is_some());
        assert_eq!(
            param(&manager, "axes.prop_cycle").as_ref(),
            Library::Matplotlib.factory_defaults().value("axes.prop_cycle")
        );
        assert_eq!(param(&manager, "image.cmap"), Some(ParamValue::from("viridis")));
    }
}
