//! Check trait and result types

use std::fmt;
use std::time::Duration;

use colored::{ColoredString, Colorize};

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    /// Not applicable in this environment (e.g. no display)
    Skip,
    Fail,
}

impl CheckStatus {
    /// Anything but `Fail` counts as healthy
    pub fn is_ok(self) -> bool {
        !self.is_fail()
    }

    pub fn is_fail(self) -> bool {
        self == CheckStatus::Fail
    }

    pub fn label(self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Skip => "SKIP",
            CheckStatus::Fail => "FAIL",
        }
    }

    pub fn colored_label(self) -> ColoredString {
        match self {
            CheckStatus::Pass => self.label().green(),
            CheckStatus::Warn => self.label().yellow(),
            CheckStatus::Skip => self.label().dimmed(),
            CheckStatus::Fail => self.label().red().bold(),
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a check found
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// One-line summary
    pub message: String,
    /// Extra lines printed below the report table
    pub details: Vec<String>,
    /// Filled in by the runner
    pub duration: Duration,
}

impl CheckResult {
    fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warn, message)
    }

    pub fn skip(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Skip, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Fail, message)
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// A diagnostic run before (or instead of) entering the main loop
pub trait SystemCheck {
    fn name(&self) -> &'static str;

    fn check(&self) -> CheckResult;

    fn description(&self) -> Option<&'static str> {
        None
    }
}
