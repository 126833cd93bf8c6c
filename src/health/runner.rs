//! Runs registered checks and aggregates their results

use std::time::Instant;

use tracing::{debug, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Result of one named check
#[derive(Debug)]
pub struct CheckEntry {
    pub name: &'static str,
    pub result: CheckResult,
}

/// Results of a full run
#[derive(Debug, Default)]
pub struct HealthCheckReport {
    pub entries: Vec<CheckEntry>,
}

impl HealthCheckReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Number of checks that ended with `status`
    pub fn count(&self, status: CheckStatus) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.result.status == status)
            .count()
    }

    pub fn is_healthy(&self) -> bool {
        self.count(CheckStatus::Fail) == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.count(CheckStatus::Warn) > 0
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.result)
    }

    /// Process exit code: 0 all ok, 1 any failure, 2 warnings only
    pub fn exit_code(&self) -> i32 {
        if !self.is_healthy() {
            1
        } else if self.has_warnings() {
            2
        } else {
            0
        }
    }
}

/// Ordered collection of checks
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Runs every check in registration order
    pub fn run(self) -> HealthCheckReport {
        let entries = self
            .checks
            .into_iter()
            .map(|check| {
                let start = Instant::now();
                let result = check.check().with_duration(start.elapsed());

                if result.status.is_fail() {
                    warn!(check = check.name(), message = %result.message, "Health check failed");
                } else {
                    debug!(
                        check = check.name(),
                        status = %result.status,
                        elapsed = ?result.duration,
                        "Health check finished"
                    );
                }

                CheckEntry {
                    name: check.name(),
                    result,
                }
            })
            .collect();

        HealthCheckReport { entries }
    }
}
