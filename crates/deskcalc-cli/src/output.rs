//! Output formatting

use console::{style, Term};

/// Terminal reporter for command output.
///
/// Results go to stdout and are always printed; decoration (headers and
/// section titles) is dropped in quiet mode, as are warnings, which go to
/// stderr.
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a result line
    pub fn line(&self, text: &str) {
        let _ = self.out.write_line(text);
    }

    /// Print a result line in the error color
    pub fn error_line(&self, text: &str) {
        let _ = self.out.write_line(&self.format_error(text));
    }

    /// Print a title
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }
        let _ = self.out.write_line(&self.format_header(title));
    }

    /// Print a blank line and a section title
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }
        let _ = self.out.write_line("");
        let _ = self.out.write_line(&self.format_section(title));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Formats a title
    #[must_use]
    pub fn format_header(&self, title: &str) -> String {
        if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        }
    }

    /// Formats a section title
    #[must_use]
    pub fn format_section(&self, title: &str) -> String {
        if self.use_color {
            style(title).cyan().bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Formats text in the error color
    #[must_use]
    pub fn format_error(&self, text: &str) -> String {
        if self.use_color {
            style(text).red().to_string()
        } else {
            text.to_string()
        }
    }
}
