//! Diagnostics with source location tracking.
//!
//! Three severities exist: ordinary [`Severity::Error`] and
//! [`Severity::Warning`] accumulate in a [`Diagnostics`] counter and never
//! stop a pass; [`Severity::Fatal`] is raised as a [`FatalError`] and
//! propagates with `?`, terminating the resolver immediately.
//!
//! Every diagnostic prints as `file:line:col : {error|warning|fatal} :
//! message`, the user-visible failure format the CLI driver forwards as-is.
//!
//! # Example
//!
//! ```
//! use msim_base::{Diagnostics, Location};
//!
//! let mut diags = Diagnostics::new();
//! diags.error(Location::new("model.mpp", 3, 1), "unknown symbol 'Sex'");
//! diags.warning(Location::new("model.mpp", 5, 1), "label missing, using short name");
//!
//! assert_eq!(diags.error_count(), 1);
//! assert_eq!(diags.warning_count(), 1);
//! assert!(diags.has_errors());
//! ```

use crate::span::Location;
use std::fmt;

/// The severity of one diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Fatal => "fatal",
        };
        write!(f, "{s}")
    }
}

/// One compiler diagnostic: a severity, a message, and where it came from.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Location,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} : {}", self.location, self.severity, self.message)
    }
}

/// A fatal resolver condition.
///
/// Raised with `?` from deep inside a pass; the caller is expected to log it
/// (it was already recorded as a [`Diagnostic`] of [`Severity::Fatal`] in the
/// [`Diagnostics`] that produced it) and stop running passes.
#[derive(Debug, Clone)]
pub struct FatalError(pub Diagnostic);

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for FatalError {}

/// Alias for `std::result::Result<T, FatalError>`, the return type of any
/// pass that can raise `pp_fatal`.
pub type Result<T> = std::result::Result<T, FatalError>;

/// Accumulates diagnostics across a compilation, as the resolver's running
/// error/warning counters do.
///
/// Warnings never abort; errors only abort code generation once all passes
/// have run, gated on `error_count() == 0`; a fatal diagnostic is also
/// recorded here before being raised as a [`FatalError`].
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, location: Location, message: impl Into<String>) {
        let message = message.into();
        log::error!("{location} : {message}");
        self.records.push(Diagnostic {
            severity: Severity::Error,
            message,
            location,
        });
    }

    pub fn warning(&mut self, location: Location, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{location} : {message}");
        self.records.push(Diagnostic {
            severity: Severity::Warning,
            message,
            location,
        });
    }

    /// Records a fatal diagnostic and returns it wrapped as a [`FatalError`]
    /// for the caller to propagate with `?`.
    pub fn fatal(&mut self, location: Location, message: impl Into<String>) -> FatalError {
        let message = message.into();
        log::error!("{location} : fatal : {message}");
        let diag = Diagnostic {
            severity: Severity::Fatal,
            message,
            location,
        };
        self.records.push(diag.clone());
        FatalError(diag)
    }

    pub fn error_count(&self) -> usize {
        self.records
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error | Severity::Fatal))
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.records
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// The summary line printed after all passes complete:
    /// `N errors in post-parse phase`.
    pub fn summary_line(&self) -> String {
        format!("{} errors in post-parse phase", self.error_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_display_format() {
        let diag = Diagnostic {
            severity: Severity::Error,
            message: "unknown symbol".to_string(),
            location: Location::new("model.mpp", 3, 1),
        };
        assert_eq!(format!("{diag}"), "model.mpp:3:1 : error : unknown symbol");
    }

    #[test]
    fn counts_errors_and_warnings_separately() {
        let mut diags = Diagnostics::new();
        diags.error(Location::synthetic(), "e1");
        diags.error(Location::synthetic(), "e2");
        diags.warning(Location::synthetic(), "w1");
        assert_eq!(diags.error_count(), 2);
        assert_eq!(diags.warning_count(), 1);
        assert!(diags.has_errors());
    }

    #[test]
    fn fatal_counts_as_error_and_returns_propagatable_error() {
        let mut diags = Diagnostics::new();
        let fatal = diags.fatal(Location::synthetic(), "unrecoverable");
        assert_eq!(diags.error_count(), 1);
        assert!(fatal.to_string().contains("unrecoverable"));
    }

    #[test]
    fn no_errors_reports_clean_summary() {
        let diags = Diagnostics::new();
        assert!(!diags.has_errors());
        assert_eq!(diags.summary_line(), "0 errors in post-parse phase");
    }
}
