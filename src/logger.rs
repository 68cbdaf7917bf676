//! Logging capability with colored terminal output.
//!
//! The crate never logs on its own account: the bundler takes an injected
//! [`Logger`] so embedding applications decide where diagnostics go.
//! [`TermLogger`] writes colored prefixes to stderr, [`NullLogger`] drops
//! everything.

use owo_colors::OwoColorize;

/// Sink for render-time diagnostics.
///
/// `debug` carries progress detail (bundle written, cache reused) and is
/// usually suppressed. `warn` carries recoverable problems (minify
/// fallback, missing bundle file) and should stay visible.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Apply color to a level prefix.
#[inline]
fn colorize_prefix(level: &str) -> String {
    let prefix = format!("[{level}]");
    match level {
        "warning" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Terminal Logger
// ============================================================================

/// Terminal logger with a colored `[prefix]` per level.
///
/// Writes to stderr so emitted markup on stdout stays clean when the
/// embedding application pipes it somewhere.
#[derive(Debug, Clone, Copy)]
pub struct TermLogger {
    verbose: bool,
}

impl TermLogger {
    /// With `verbose: false`, debug messages are suppressed and warnings
    /// still print.
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Default for TermLogger {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Logger for TermLogger {
    fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {message}", colorize_prefix("assets"));
        }
    }

    fn warn(&self, message: &str) {
        eprintln!("{} {message}", colorize_prefix("warning"));
    }
}

// ============================================================================
// Null Logger
// ============================================================================

/// Logger that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}

// ============================================================================
// Tests
// ============================================================================
