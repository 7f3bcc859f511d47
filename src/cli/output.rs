//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying spinners, section headers,
//! and formatted messages to the user.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::defaults::SEPARATOR_WIDTH;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Switch quiet mode on or off for the whole process
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Whether only errors should be printed
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// `println!` that stays silent in quiet mode
macro_rules! say {
    ($($arg:tt)*) => {
        if !$crate::cli::output::is_quiet() {
            println!($($arg)*);
        }
    };
}
pub(crate) use say;

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Log level for a `-v` count
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, _) => Level::DEBUG,
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` directives take precedence over the `-v` level.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose, quiet).into())
        .from_env_lossy();

    // A subscriber may already be installed when running inside tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Section header followed by a separator line
pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("{title}");
    println!("{}", separator());
}

/// Horizontal rule
pub fn separator() -> String {
    "━".repeat(SEPARATOR_WIDTH)
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0, false), Level::WARN);
        assert_eq!(level_for(1, false), Level::INFO);
        assert_eq!(level_for(2, false), Level::DEBUG);
        assert_eq!(level_for(5, false), Level::DEBUG);
        assert_eq!(level_for(2, true), Level::ERROR);
    }

    #[test]
    fn test_quiet_mode_hides_spinner() {
        set_quiet(true);
        let spinner = create_spinner("working");
        let hidden = spinner.is_hidden();
        set_quiet(false);

        assert!(hidden);
        assert!(!is_quiet());
    }

    #[test]
    fn test_separator_width() {
        assert_eq!(separator().chars().count(), SEPARATOR_WIDTH);
    }
}
