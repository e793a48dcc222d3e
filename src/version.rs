//! Version detection for installed plotting libraries.
//!
//! Adapters branch on the version a library reports. Detection is
//! recomputed on every activation, so swapping an installation between two
//! activations is always observed.

use crate::library::{Environment, Library};
use std::fmt;

/// A `(major, minor, patch)` version, ordered lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Patch component.
    pub patch: u32,
}

impl Version {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a reported version string.
    ///
    /// Keeps the leading run of digits and dots, so `3.5.0rc1`, `2.2.0.dev0`
    /// and `5.18.0+local` parse as their release numbers. Missing components
    /// are zero. Returns `None` when the leading run is empty or a component
    /// does not fit in a `u32`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let end = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(trimmed.len());
        let numeric = trimmed[..end].trim_end_matches('.');
        if numeric.is_empty() {
            return None;
        }

        let mut parts = [0u32; 3];
        for (slot, part) in parts.iter_mut().zip(numeric.split('.')) {
            *slot = part.parse().ok()?;
        }
        Some(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// What the detector learned about one library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Library the information is about.
    pub library: Library,
    /// Version string as reported, `None` when the library is absent.
    pub raw: Option<String>,
    /// Parsed version, `None` when absent or malformed.
    pub version: Option<Version>,
}

impl VersionInfo {
    /// Information for a library that is not installed.
    #[must_use]
    pub const fn absent(library: Library) -> Self {
        Self {
            library,
            raw: None,
            version: None,
        }
    }

    /// Information derived from a reported version string.
    #[must_use]
    pub fn reported(library: Library, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let version = Version::parse(&raw);
        Self {
            library,
            raw: Some(raw),
            version,
        }
    }

    /// Returns true if the library is installed.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.raw.is_some()
    }

    /// Returns true if the library is installed but its version is unreadable.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.raw.is_some() && self.version.is_none()
    }

    /// Returns true if the parsed version is at least `min`.
    ///
    /// A malformed or absent version never satisfies a minimum.
    #[must_use]
    pub fn at_least(&self, min: Version) -> bool {
        self.version.is_some_and(|v| v >= min)
    }
}

/// Detects the installed version of `library` in `env`.
///
/// An absent library yields an absence marker, never an error.
#[must_use]
pub fn detect(env: &Environment, library: Library) -> VersionInfo {
    let info = match env.reported_version(library) {
        Some(raw) => VersionInfo::reported(library, raw),
        None => VersionInfo::absent(library),
    };
    if info.is_malformed() {
        crate::warn!(
            library,
            "reported unparseable version '{}'",
            info.raw.as_deref().unwrap_or_default()
        );
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(Version::parse("3.5.0"), Some(Version::new(3, 5, 0)));
        assert_eq!(Version::parse(" 0.13.2 "), Some(Version::new(0, 13, 2)));
    }

    #[test]
    fn test_parse_strips_suffixes() {
        assert_eq!(Version::parse("3.5.0rc1"), Some(Version::new(3, 5, 0)));
        assert_eq!(Version::parse("2.2.0.dev0"), Some(Version::new(2, 2, 0)));
        assert_eq!(Version::parse("5.18.0+local"), Some(Version::new(5, 18, 0)));
    }

    #[test]
    fn test_parse_missing_components_are_zero() {
        assert_eq!(Version::parse("4"), Some(Version::new(4, 0, 0)));
        assert_eq!(Version::parse("4.5"), Some(Version::new(4, 5, 0)));
        assert_eq!(Version::parse("1.2.3.4"), Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(Version::parse(""), None);
        assert_eq!(Version::parse("unknown"), None);
        assert_eq!(Version::parse("v3.5"), None);
        assert_eq!(Version::parse("1..2"), None);
        assert_eq!(Version::parse("99999999999.0"), None);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(Version::new(3, 10, 0) > Version::new(3, 9, 9));
        assert!(Version::new(4, 0, 0) > Version::new(3, 99, 99));
        assert!(Version::new(1, 5, 0) >= Version::new(1, 5, 0));
    }

    #[test]
    fn test_detect_absent_and_installed() {
        let mut env = Environment::new();
        env.install(Library::Matplotlib, "3.8.2");

        let mpl = detect(&env, Library::Matplotlib);
        assert!(mpl.is_installed());
        assert_eq!(mpl.version, Some(Version::new(3, 8, 2)));

        let plotly = detect(&env, Library::Plotly);
        assert!(!plotly.is_installed());
        assert_eq!(plotly, VersionInfo::absent(Library::Plotly));
    }

    #[test]
    fn test_detect_malformed_keeps_raw() {
        let mut env = Environment::new();
        env.install(Library::Altair, "nightly");
        let info = detect(&env, Library::Altair);
        assert!(info.is_malformed());
        assert_eq!(info.raw.as_deref(), Some("nightly"));
        assert!(!info.at_least(Version::new(0, 0, 0)));
    }

    #[test]
    fn test_detect_is_not_cached() {
        let mut env = Environment::new();
        env.install(Library::Seaborn, "0.10.1");
        assert!(!detect(&env, Library::Seaborn).at_least(Version::new(0, 11, 0)));

        env.install(Library::Seaborn, "0.13.2");
        assert!(detect(&env, Library::Seaborn).at_least(Version::new(0, 11, 0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::new(3, 7, 1).to_string(), "3.7.1");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_parse_display_roundtrip(major in 0u32..1000, minor in 0u32..1000, patch in 0u32..1000) {
            let v = Version::new(major, minor, patch);
            prop_assert_eq!(Version::parse(&v.to_string()), Some(v));
        }

        #[test]
        fn prop_suffix_does_not_change_version(
            major in 0u32..100,
            minor in 0u32..100,
            suffix in "(rc[0-9]|\\.dev[0-9]|\\+[a-z]{1,5}|a[0-9]|b[0-9])",
        ) {
            let raw = format!("{major}.{minor}{suffix}");
            prop_assert_eq!(Version::parse(&raw), Some(Version::new(major, minor, 0)));
        }

        #[test]
        fn prop_ordering_matches_tuple(a in any::<(u8, u8, u8)>(), b in any::<(u8, u8, u8)>()) {
            let va = Version::new(a.0.into(), a.1.into(), a.2.into());
            let vb = Version::new(b.0.into(), b.1.into(), b.2.into());
            prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
        }
    }
}
