//! The same style applied to two versions of a library writes different keys.
//!
//! Run: cargo test --test capability_test

#![allow(clippy::unwrap_used)]

use sane_figs::adapters::adapter_for;
use sane_figs::library::{Library, ParamTable};
use sane_figs::registry::Registry;
use sane_figs::style::Resolver;
use sane_figs::version::{Version, VersionInfo};
use std::collections::BTreeSet;

fn written_keys(library: Library, version: &str) -> BTreeSet<String> {
    let style = Resolver::new(&Registry::with_builtins())
        .resolve("article", None, None)
        .unwrap();
    let mut surface = ParamTable::new();
    let handle = adapter_for(library)
        .apply(&style, &VersionInfo::reported(library, version), &mut surface)
        .unwrap();
    handle.keys().map(str::to_string).collect()
}

#[test]
fn old_and_new_versions_diverge() {
    let cases = [
        (Library::Matplotlib, "1.4.3", "3.9.0", "axes.prop_cycle"),
        (Library::Seaborn, "0.10.1", "0.13.2", "objects.theme.font.size"),
        (Library::Plotly, "3.10.0", "5.18.0", "templates.default"),
        (Library::Altair, "4.2.2", "5.5.0", "theme.enabled"),
    ];
    for (library, old, new, key) in cases {
        let old_keys = written_keys(library, old);
        let new_keys = written_keys(library, new);
        assert_ne!(old_keys, new_keys, "{library}");
        assert!(new_keys.contains(key), "{library} {new} should write {key}");
        assert!(!old_keys.contains(key), "{library} {old} should not write {key}");
    }
}

#[test]
fn suffixed_versions_parse() {
    for (raw, expected) in [
        ("3.8.0rc1", Version::new(3, 8, 0)),
        ("0.13.2.dev0", Version::new(0, 13, 2)),
        ("5.18.0+local", Version::new(5, 18, 0)),
        ("5", Version::new(5, 0, 0)),
    ] {
        assert_eq!(Version::parse(raw), Some(expected), "{raw}");
    }
    assert!(Version::new(3, 10, 0) > Version::new(3, 9, 9));
}

#[test]
fn malformed_version_takes_fallbacks() {
    let keys = written_keys(Library::Matplotlib, "not-a-version");
    assert!(keys.contains("axes.color_cycle"));
    assert!(keys.contains("figure.autolayout"));
    assert!(!keys.contains("axes.titlelocation"));
}
