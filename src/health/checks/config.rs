//! Configuration system health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that configuration can be loaded for all profiles
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a new config check with default profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    /// Creates a config check with custom profiles
    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration loading from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failed = 0;

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => details.push(format!(
                    "✓ Profile '{}': \"{}\" {}x{}, formats {:?}",
                    profile,
                    config.window.title,
                    config.window.width,
                    config.window.height,
                    config.decoder.formats
                )),
                Err(e) => {
                    details.push(format!("✗ Profile '{}': {}", profile, e));
                    failed += 1;
                }
            }
        }

        let env_result = AppConfig::load_from_env();
        match &env_result {
            Ok(config) => details.push(format!("✓ Environment selects profile '{}'", config.profile)),
            Err(e) => details.push(format!("⚠ Environment config: {}", e)),
        }

        if failed > 0 {
            CheckResult::fail(format!("{} of {} profiles failed to load", failed, self.profiles.len()))
                .with_details(details)
        } else if env_result.is_err() {
            CheckResult::warn("Profiles load, environment overrides do not").with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details)
        }
    }
}
