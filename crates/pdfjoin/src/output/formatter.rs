//! Message formatting and display.
//!
//! Status lines go to stdout; warnings and errors go to stderr so that
//! machine-readable output (`ls --json`) stays clean when piped.
//!
//! # Examples
//!
//! ```
//! use pdfjoin::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Reading sources...");
//! formatter.success("Merged 3 documents");
//! ```

use crate::config::Config;
use std::io::{self, IsTerminal};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    /// Prefix and ANSI colour for this level.
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Info => ("", ""),
            Self::Success => ("✓ ", "\x1b[32m"),
            Self::Warning => ("⚠ ", "\x1b[33m"),
            Self::Error => ("✗ ", "\x1b[31m"),
            Self::Debug => ("→ ", "\x1b[36m"),
        }
    }

    /// Whether messages of this level belong on stderr.
    pub fn is_diagnostic(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - Suppress non-error output
    /// * `verbose` - Show verbose output
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
        }
    }

    /// Create a formatter from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Create a quiet formatter (only warnings and errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    fn should_use_color() -> bool {
        io::stdout().is_terminal() && std::env::var_os("TERM").is_some()
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print a message only shown in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    fn print_message(&self, level: MessageLevel, message: &str) {
        let line = self.render(level, message);
        if level.is_diagnostic() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Render a message with its prefix, coloured when writing to a terminal.
    pub fn render(&self, level: MessageLevel, message: &str) -> String {
        let (prefix, color_code) = level.style();

        if self.colored && !color_code.is_empty() {
            format!("{color_code}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        }
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a `label: value` line. Only shown in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print a numbered list item. Suppressed in quiet mode.
    ///
    /// # Arguments
    ///
    /// * `position` - Item position (1-based)
    /// * `message` - Item message
    pub fn list_item(&self, position: usize, message: &str) {
        if !self.quiet {
            println!("  {position}. {message}");
        }
    }

    /// Print a blank line. Suppressed in quiet mode.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Whether non-error output is shown.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Whether verbose output is shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn plain() -> OutputFormatter {
        OutputFormatter {
            quiet: false,
            verbose: false,
            colored: false,
        }
    }

    #[test]
    fn test_quiet_formatter() {
        let formatter = OutputFormatter::quiet();
        assert!(formatter.is_quiet());
        assert!(!formatter.is_verbose());
        assert!(!formatter.should_print());
    }

    #[test]
    fn test_verbose_formatter() {
        let formatter = OutputFormatter::verbose();
        assert!(!formatter.is_quiet());
        assert!(formatter.is_verbose());
        assert!(formatter.should_print());
    }

    #[rstest]
    #[case(MessageLevel::Info, "done")]
    #[case(MessageLevel::Success, "✓ done")]
    #[case(MessageLevel::Warning, "⚠ done")]
    #[case(MessageLevel::Error, "✗ done")]
    #[case(MessageLevel::Debug, "→ done")]
    fn test_render_without_colour(#[case] level: MessageLevel, #[case] expected: &str) {
        assert_eq!(plain().render(level, "done"), expected);
    }

    #[test]
    fn test_render_with_colour() {
        let formatter = OutputFormatter {
            colored: true,
            ..plain()
        };

        assert_eq!(
            formatter.render(MessageLevel::Error, "bad"),
            "\x1b[31m✗ bad\x1b[0m"
        );
        // Info has no colour code.
        assert_eq!(formatter.render(MessageLevel::Info, "ok"), "ok");
    }

    #[test]
    fn test_diagnostic_levels() {
        assert!(MessageLevel::Warning.is_diagnostic());
        assert!(MessageLevel::Error.is_diagnostic());
        assert!(!MessageLevel::Success.is_diagnostic());
    }

    #[test]
    fn test_quiet_suppresses_without_panicking() {
        let formatter = OutputFormatter::quiet();
        formatter.info("hidden");
        formatter.section("hidden");
        formatter.list_item(1, "hidden");
        formatter.warning("shown on stderr");
    }
}
