use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use triptych::app::{App, AppConfig};
use triptych::{build_info, health};

/// Shows a background image with two overlays until the window is closed
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration profile to load (defaults to APP_PROFILE, then "release")
    #[arg(long)]
    profile: Option<String>,

    /// Run the health check suite and exit with its status
    #[arg(long)]
    health: bool,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.profile {
        Some(profile) => AppConfig::load(profile),
        None => AppConfig::load_from_env(),
    };
    let filter = loaded
        .as_ref()
        .map(|config| config.logging.filter.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stdout)
        .init();

    let config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using default configuration");
        AppConfig::default()
    });

    if cli.health {
        let report = health::run_all_checks(&config);
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    info!(build = %build_info::version_string(), "triptych");

    if let Err(e) = App::new(config).run() {
        error!(error = %e, "Failed to initialize");
        std::process::exit(-1);
    }
}
