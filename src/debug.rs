//! Diagnostic logging for sane-figs.
//!
//! Every record carries a level and a tag naming where it came from: a
//! subsystem (`session`, `registry`, `config`, `resolve`) or the
//! [`Library`](crate::library::Library) an adapter was working on. Output
//! goes to stderr and is off until [`enable`], [`set_level`] or
//! `SANE_FIGS_DEBUG` turns it on.
//!
//! `SANE_FIGS_DEBUG` accepts `1`/`true`/`on` (everything) or a level name
//! (`error`, `warn`, `info`, `debug`, `trace`) as the most verbose level to
//! print.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// Environment variable read by [`init_from_env`].
pub const ENV_VAR: &str = "SANE_FIGS_DEBUG";

const OFF: u8 = 0;

/// Most verbose level printed; `OFF` prints nothing.
static MAX_LEVEL: AtomicU8 = AtomicU8::new(OFF);

static STARTED: OnceLock<Instant> = OnceLock::new();

/// Severity of a record, least verbose first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// An operation failed.
    Error = 1,
    /// A degraded path was taken or an input was skipped.
    Warn = 2,
    /// Registrations and activations.
    Info = 3,
    /// Per-library detail.
    Debug = 4,
    /// Timings and reverts.
    Trace = 5,
}

impl Level {
    /// Parses a level name, ignoring case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" | "1" | "true" | "yes" | "on" => Some(Self::Trace),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Prints every level.
pub fn enable() {
    set_level(Level::Trace);
}

/// Prints `level` and everything less verbose.
pub fn set_level(level: Level) {
    STARTED.get_or_init(Instant::now);
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Silences all output.
pub fn disable() {
    MAX_LEVEL.store(OFF, Ordering::Relaxed);
}

/// Applies `SANE_FIGS_DEBUG` when it holds a recognised value.
pub fn init_from_env() {
    if let Some(level) = std::env::var(ENV_VAR).ok().as_deref().and_then(Level::parse) {
        set_level(level);
    }
}

/// Most verbose level currently printed.
#[must_use]
pub fn level() -> Option<Level> {
    match MAX_LEVEL.load(Ordering::Relaxed) {
        1 => Some(Level::Error),
        2 => Some(Level::Warn),
        3 => Some(Level::Info),
        4 => Some(Level::Debug),
        5 => Some(Level::Trace),
        _ => None,
    }
}

/// Returns true when any output is enabled.
#[inline]
pub fn is_enabled() -> bool {
    MAX_LEVEL.load(Ordering::Relaxed) != OFF
}

/// Returns true when records at `level` are printed.
#[inline]
pub fn enabled(level: Level) -> bool {
    level as u8 <= MAX_LEVEL.load(Ordering::Relaxed)
}

fn render(level: Level, tag: &dyn fmt::Display, message: fmt::Arguments<'_>) -> String {
    let elapsed = STARTED.get().map_or(0, |start| start.elapsed().as_millis());
    format!("sane-figs +{elapsed:>5}ms {level:<5} {tag}: {message}")
}

/// Writes one record when `level` is enabled.
pub fn log(level: Level, tag: &dyn fmt::Display, message: fmt::Arguments<'_>) {
    if !enabled(level) {
        return;
    }
    let line = render(level, tag, message);
    let _ = writeln!(io::stderr().lock(), "{line}");
}

/// Logs at an explicit [`Level`]; `tag` is any `Display` value.
#[macro_export]
macro_rules! log_at {
    ($level:expr, $tag:expr, $($arg:tt)*) => {
        if $crate::debug::enabled($level) {
            $crate::debug::log($level, &$tag, format_args!($($arg)*));
        }
    };
}

/// Trace-level record.
#[macro_export]
macro_rules! trace {
    ($tag:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::debug::Level::Trace, $tag, $($arg)*)
    };
}

/// Debug-level record.
#[macro_export]
macro_rules! debug {
    ($tag:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::debug::Level::Debug, $tag, $($arg)*)
    };
}

/// Info-level record.
#[macro_export]
macro_rules! info {
    ($tag:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::debug::Level::Info, $tag, $($arg)*)
    };
}

/// Warn-level record.
#[macro_export]
macro_rules! warn {
    ($tag:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::debug::Level::Warn, $tag, $($arg)*)
    };
}

/// Error-level record.
#[macro_export]
macro_rules! error {
    ($tag:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::debug::Level::Error, $tag, $($arg)*)
    };
}

/// Logs how long an operation took when dropped.
#[must_use = "the duration is logged when the guard is dropped"]
pub struct TimingGuard {
    tag: &'static str,
    operation: String,
    start: Instant,
}

impl TimingGuard {
    /// Starts timing `operation`.
    pub fn new(tag: &'static str, operation: impl Into<String>) -> Self {
        Self {
            tag,
            operation: operation.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if enabled(Level::Trace) {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            log(
                Level::Trace,
                &self.tag,
                format_args!("{} took {ms:.2}ms", self.operation),
            );
        }
    }
}

/// Times the rest of the enclosing block.
#[macro_export]
macro_rules! time_scope {
    ($tag:expr, $operation:expr) => {
        let _timing = $crate::debug::TimingGuard::new($tag, $operation);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Library;

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("WARN"), Some(Level::Warn));
        assert_eq!(Level::parse(" info "), Some(Level::Info));
        assert_eq!(Level::parse("1"), Some(Level::Trace));
        assert_eq!(Level::parse("loud"), None);
    }

    #[test]
    fn test_levels_order_by_verbosity() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn test_render_uses_library_tag() {
        let line = render(
            Level::Warn,
            &Library::Matplotlib,
            format_args!("falling back to {}", "best"),
        );
        assert!(line.starts_with("sane-figs +"));
        assert!(line.ends_with("warn  matplotlib: falling back to best"));
    }

    // Level filtering and the macros share the global switch, so they run
    // in one test.
    #[test]
    fn test_level_filtering_and_macros() {
        disable();
        assert!(!is_enabled());
        assert_eq!(level(), None);
        assert!(!enabled(Level::Error));

        set_level(Level::Info);
        assert_eq!(level(), Some(Level::Info));
        assert!(enabled(Level::Warn));
        assert!(!enabled(Level::Debug));

        crate::info!("session", "activated {}", 1);
        crate::debug!(Library::Plotly, "hidden at info");
        crate::time_scope!("config", "load_config");

        enable();
        assert_eq!(level(), Some(Level::Trace));
        disable();
    }
}
