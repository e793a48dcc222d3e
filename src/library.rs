//! Plotting libraries and their configuration surfaces.
//!
//! A plotting library is consumed only through its global defaults: an
//! rc-parameter table (matplotlib), named theme defaults (seaborn), a
//! default template (plotly) or a theme registry (altair). All of these are
//! modelled as a keyed [`ConfigSurface`] whose keys follow the library's own
//! naming. An [`Environment`] records which libraries are installed, the
//! version each one reports, and its surface.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A supported plotting library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Library {
    /// matplotlib (rc-parameter table).
    Matplotlib,
    /// seaborn (theme, context, palette and rc overrides).
    Seaborn,
    /// plotly (template objects and the default template pointer).
    Plotly,
    /// altair (registered themes and the enabled theme pointer).
    Altair,
}

impl Library {
    /// Every supported library, in detection order.
    pub const ALL: [Library; 4] = [
        Library::Matplotlib,
        Library::Seaborn,
        Library::Plotly,
        Library::Altair,
    ];

    /// Import name of the library.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Library::Matplotlib => "matplotlib",
            Library::Seaborn => "seaborn",
            Library::Plotly => "plotly",
            Library::Altair => "altair",
        }
    }

    /// Global defaults of a freshly imported library.
    #[must_use]
    pub fn factory_defaults(self) -> ParamTable {
        let mut table = ParamTable::new();
        match self {
            Library::Matplotlib => {
                table.set("figure.figsize", ParamValue::Pair(6.4, 4.8));
                table.set("figure.dpi", ParamValue::Int(100));
                table.set("savefig.dpi", "figure".into());
                table.set("font.family", ParamValue::list(["sans-serif"]));
                table.set("font.size", ParamValue::Float(10.0));
                table.set("axes.titlesize", "large".into());
                table.set("axes.labelsize", "medium".into());
                table.set("axes.grid", ParamValue::Bool(false));
                table.set("axes.titlelocation", "center".into());
                table.set("legend.loc", "best".into());
                table.set("legend.fontsize", "medium".into());
                table.set("lines.linewidth", ParamValue::Float(1.5));
                table.set("lines.markersize", ParamValue::Float(6.0));
                table.set("image.cmap", "viridis".into());
                table.set(
                    "axes.prop_cycle",
                    ParamValue::list([
                        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
                        "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
                    ]),
                );
            }
            Library::Seaborn => {
                table.set("style", "darkgrid".into());
                table.set("context", "notebook".into());
                table.set("palette", "deep".into());
            }
            Library::Plotly => {
                table.set("templates.default", "plotly".into());
            }
            Library::Altair => {
                table.set("themes.active", "default".into());
                table.set("theme.enabled", "default".into());
            }
        }
        table
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Library {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Library::ALL
            .into_iter()
            .find(|lib| lib.name() == wanted)
            .ok_or_else(|| Error::UnknownLibrary(s.to_string()))
    }
}

/// A value stored in a configuration surface.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer (pixels, DPI).
    Int(i64),
    /// Floating point size.
    Float(f64),
    /// String (names, colors, enum tags).
    Str(String),
    /// Ordered list of strings (color cycles, font fallbacks).
    List(Vec<String>),
    /// Two floats (figure size).
    Pair(f64, f64),
    /// Continuous color stops as `(position in [0, 1], color)`.
    Stops(Vec<(f64, String)>),
}

impl ParamValue {
    /// Builds a [`ParamValue::List`] from anything yielding strings.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParamValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Numeric view of `Int` and `Float` values.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// String view of `Str` values.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// List view of `List` values.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::List(v)
    }
}

impl From<(f64, f64)> for ParamValue {
    fn from((a, b): (f64, f64)) -> Self {
        ParamValue::Pair(a, b)
    }
}

/// Global configuration mechanism of one plotting library.
///
/// Implementations forward to the real library (bindings) or keep the
/// values in memory ([`ParamTable`]).
pub trait ConfigSurface: Send {
    /// Current value of `key`, or `None` when unset.
    fn get(&self, key: &str) -> Option<ParamValue>;

    /// Sets `key` to `value`.
    fn set(&mut self, key: &str, value: ParamValue);

    /// Removes `key`, returning the library to its built-in fallback.
    fn unset(&mut self, key: &str);

    /// Every key currently set.
    fn keys(&self) -> Vec<String>;

    /// Copies every key/value pair into a [`ParamTable`].
    fn snapshot(&self) -> ParamTable {
        let mut table = ParamTable::new();
        for key in self.keys() {
            if let Some(value) = self.get(&key) {
                table.set(&key, value);
            }
        }
        table
    }
}

/// In-memory configuration surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamTable {
    params: BTreeMap<String, ParamValue>,
}

impl ParamTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrowing lookup.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Number of keys set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if no key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl ConfigSurface for ParamTable {
    fn get(&self, key: &str) -> Option<ParamValue> {
        self.params.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: ParamValue) {
        self.params.insert(key.to_string(), value);
    }

    fn unset(&mut self, key: &str) {
        self.params.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.params.keys().cloned().collect()
    }

    fn snapshot(&self) -> ParamTable {
        self.clone()
    }
}

struct Installation {
    version: String,
    surface: Box<dyn ConfigSurface>,
}

/// The set of installed plotting libraries and their global defaults.
#[derive(Default)]
pub struct Environment {
    installed: BTreeMap<Library, Installation>,
}

impl Environment {
    /// Creates an environment with no library installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `library` with an in-memory surface seeded with its
    /// factory defaults. Replaces any previous installation.
    pub fn install(&mut self, library: Library, version: impl Into<String>) -> &mut Self {
        self.install_surface(library, version, Box::new(library.factory_defaults()))
    }

    /// Installs `library` with a caller-provided surface.
    pub fn install_surface(
        &mut self,
        library: Library,
        version: impl Into<String>,
        surface: Box<dyn ConfigSurface>,
    ) -> &mut Self {
        self.installed.insert(
            library,
            Installation {
                version: version.into(),
                surface,
            },
        );
        self
    }

    /// Removes `library`. Returns true if it was installed.
    pub fn uninstall(&mut self, library: Library) -> bool {
        self.installed.remove(&library).is_some()
    }

    /// Returns true if `library` is installed.
    #[must_use]
    pub fn is_installed(&self, library: Library) -> bool {
        self.installed.contains_key(&library)
    }

    /// Installed libraries in detection order.
    #[must_use]
    pub fn installed(&self) -> Vec<Library> {
        self.installed.keys().copied().collect()
    }

    /// Version string reported by `library`, if installed.
    #[must_use]
    pub fn reported_version(&self, library: Library) -> Option<&str> {
        self.installed.get(&library).map(|i| i.version.as_str())
    }

    /// Read access to the surface of `library`.
    #[must_use]
    pub fn surface(&self, library: Library) -> Option<&dyn ConfigSurface> {
        self.installed.get(&library).map(|i| i.surface.as_ref())
    }

    /// Write access to the surface of `library`.
    pub fn surface_mut(&mut self, library: Library) -> Option<&mut (dyn ConfigSurface + 'static)> {
        self.installed
            .get_mut(&library)
            .map(|installation| installation.surface.as_mut())
    }

    /// Current value of `key` on `library`'s surface.
    #[must_use]
    pub fn param(&self, library: Library, key: &str) -> Option<ParamValue> {
        self.surface(library).and_then(|s| s.get(key))
    }

    /// Copy of every parameter of `library`.
    #[must_use]
    pub fn snapshot(&self, library: Library) -> Option<ParamTable> {
        self.surface(library).map(ConfigSurface::snapshot)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.installed
                    .iter()
                    .map(|(lib, inst)| (lib.name(), inst.version.as_str())),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_from_str() {
        assert_eq!("matplotlib".parse::<Library>().unwrap(), Library::Matplotlib);
        assert_eq!(" Plotly ".parse::<Library>().unwrap(), Library::Plotly);
        let err = "bokeh".parse::<Library>().unwrap_err();
        assert!(matches!(err, Error::UnknownLibrary(name) if name == "bokeh"));
    }

    #[test]
    fn test_library_display() {
        let names: Vec<String> = Library::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["matplotlib", "seaborn", "plotly", "altair"]);
    }

    #[test]
    fn test_param_table_set_get_unset() {
        let mut table = ParamTable::new();
        assert!(table.is_empty());

        table.set("font.size", 10.0.into());
        assert_eq!(table.get("font.size"), Some(ParamValue::Float(10.0)));
        assert_eq!(table.len(), 1);

        table.unset("font.size");
        assert_eq!(table.get("font.size"), None);
    }

    #[test]
    fn test_param_value_views() {
        assert_eq!(ParamValue::Int(300).as_f64(), Some(300.0));
        assert_eq!(ParamValue::from("bold").as_str(), Some("bold"));
        assert_eq!(
            ParamValue::list(["#000000"]).as_list(),
            Some(&["#000000".to_string()][..])
        );
        assert_eq!(ParamValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_environment_install_seeds_factory_defaults() {
        let mut env = Environment::new();
        env.install(Library::Matplotlib, "3.8.2");

        assert!(env.is_installed(Library::Matplotlib));
        assert!(!env.is_installed(Library::Plotly));
        assert_eq!(env.reported_version(Library::Matplotlib), Some("3.8.2"));
        assert_eq!(
            env.param(Library::Matplotlib, "figure.dpi"),
            Some(ParamValue::Int(100))
        );
    }

    #[test]
    fn test_environment_installed_order_and_uninstall() {
        let mut env = Environment::new();
        env.install(Library::Altair, "5.3.0")
            .install(Library::Matplotlib, "3.8.2");
        assert_eq!(env.installed(), vec![Library::Matplotlib, Library::Altair]);

        assert!(env.uninstall(Library::Altair));
        assert!(!env.uninstall(Library::Altair));
        assert_eq!(env.installed(), vec![Library::Matplotlib]);
    }

    #[test]
    fn test_surface_mut_writes_through() {
        let mut env = Environment::new();
        env.install(Library::Seaborn, "0.13.2");
        env.surface_mut(Library::Seaborn)
            .unwrap()
            .set("context", "paper".into());
        assert_eq!(env.param(Library::Seaborn, "context"), Some("paper".into()));
        assert!(env.surface_mut(Library::Plotly).is_none());
    }

    #[test]
    fn test_snapshot_equals_table() {
        let mut env = Environment::new();
        env.install(Library::Plotly, "5.18.0");
        let snap = env.snapshot(Library::Plotly).unwrap();
        assert_eq!(snap, Library::Plotly.factory_defaults());
    }
}
