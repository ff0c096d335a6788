//! Runner that executes checks in order and collects a report

use std::time::Instant;

use tracing::debug;

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// One executed check
#[derive(Debug)]
pub struct CheckOutcome {
    pub name: String,
    pub description: Option<&'static str>,
    pub result: CheckResult,
}

/// Results from running a health check suite
#[derive(Debug, Default)]
pub struct HealthCheckReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl HealthCheckReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.status == status)
            .count()
    }

    pub fn passed(&self) -> usize {
        self.count(CheckStatus::Pass)
    }

    pub fn warned(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    pub fn failed(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    /// Worst status across all checks; an empty report is a pass
    pub fn overall(&self) -> CheckStatus {
        self.outcomes
            .iter()
            .map(|outcome| outcome.result.status)
            .max()
            .unwrap_or(CheckStatus::Pass)
    }

    /// Returns true if no check failed
    pub fn is_healthy(&self) -> bool {
        self.overall().is_ok()
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.name == name)
            .map(|outcome| &outcome.result)
    }

    /// Process exit code: 0 = all pass, 1 = any fail, 2 = warnings only
    pub fn exit_code(&self) -> i32 {
        match self.overall() {
            CheckStatus::Pass => 0,
            CheckStatus::Fail => 1,
            CheckStatus::Warn => 2,
        }
    }
}

/// Orchestrates running health checks and collecting results
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check; checks run in the order they were added
    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn run(self) -> HealthCheckReport {
        let outcomes = self
            .checks
            .into_iter()
            .map(|check| {
                let start = Instant::now();
                let result = check.check().with_duration(start.elapsed());
                debug!(check = check.name(), status = ?result.status, "Health check finished");

                CheckOutcome {
                    name: check.name().to_string(),
                    description: check.description(),
                    result,
                }
            })
            .collect();

        HealthCheckReport { outcomes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, CheckStatus);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self) -> CheckResult {
            match self.1 {
                CheckStatus::Pass => CheckResult::pass("ok"),
                CheckStatus::Warn => CheckResult::warn("meh"),
                CheckStatus::Fail => CheckResult::fail("broken"),
            }
        }
    }

    #[test]
    fn test_empty_report_is_healthy() {
        let report = HealthCheckRunner::new().run();
        assert_eq!(report.total(), 0);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_warnings_only_exit_with_two() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Pass))
            .add_check(Fixed("b", CheckStatus::Warn))
            .run();

        assert!(report.is_healthy());
        assert_eq!(report.warned(), 1);
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_any_failure_is_unhealthy() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Warn))
            .add_check(Fixed("b", CheckStatus::Fail))
            .add_check(Fixed("c", CheckStatus::Pass))
            .run();

        assert!(!report.is_healthy());
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.passed() + report.warned() + report.failed(), 3);
    }

    #[test]
    fn test_outcomes_keep_insertion_order() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("first", CheckStatus::Pass))
            .add_check(Fixed("second", CheckStatus::Fail))
            .run();

        let names: Vec<_> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(report.get("second").map(|r| r.status), Some(CheckStatus::Fail));
    }
}
