//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Reports build metadata; warns when git information was not captured
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (git, rustc, timestamps)")
    }

    fn check(&self) -> CheckResult {
        let details = build_info::detailed_info()
            .lines()
            .map(str::to_string)
            .chain(std::iter::once(format!(
                "Dirty tree: {}",
                build_info::is_git_dirty()
            )))
            .collect();

        if build_info::git_sha().is_none() {
            return CheckResult::warn("Built outside a git checkout").with_details(details);
        }

        CheckResult::pass(build_info::version_string()).with_details(details)
    }
}
