//! Health check system for validating the viewer's environment
//!
//! Runs without opening a window, so it works in CI and over SSH:
//! - Configuration profiles load
//! - Scene images exist and decode
//! - A graphics adapter is available
//! - The overlay layout holds for the configured window
//!
//! # Example
//!
//! ```no_run
//! use triptych::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(SceneLayoutCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("Ready to show the scene");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{CheckOutcome, HealthCheckReport, HealthCheckRunner};

use crate::app::AppConfig;

/// Runs all default health checks against the given configuration
pub fn run_all_checks(config: &AppConfig) -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SceneLayoutCheck::from_config(config))
        .add_check(checks::AssetsCheck::from_config(config))
        .add_check(checks::GraphicsBackendCheck::new())
        .run()
}
