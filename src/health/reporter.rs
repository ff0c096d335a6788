//! Formatting and reporting for health check results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::check::CheckStatus;
use super::runner::HealthCheckReport;

/// Formats a health check report as a table followed by a summary
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["System", "Status", "Duration", "Message"]);

    for outcome in &report.outcomes {
        let duration = format!("{:.2?}", outcome.result.duration);
        builder.push_record([
            outcome.name.as_str(),
            &outcome.result.status.as_colored_str(),
            &duration,
            &outcome.result.message,
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{}\n{}", table, format_summary(report))
}

fn format_summary(report: &HealthCheckReport) -> String {
    let mut lines = vec![
        String::new(),
        "Summary".bold().underline().to_string(),
        format!("  Total checks: {}", report.total()),
        format!("  {} Passed: {}", "✓".green(), report.passed()),
    ];

    if report.warned() > 0 {
        lines.push(format!("  {} Warned: {}", "⚠".yellow(), report.warned()));
    }
    if report.failed() > 0 {
        lines.push(format!("  {} Failed: {}", "✗".red(), report.failed()));
    }

    let overall = match report.overall() {
        CheckStatus::Pass => "Overall: HEALTHY".green().bold(),
        CheckStatus::Warn => "Overall: HEALTHY (scene will be incomplete)".yellow().bold(),
        CheckStatus::Fail => "Overall: UNHEALTHY".red().bold(),
    };
    lines.push(String::new());
    lines.push(format!("  {}", overall));

    lines.join("\n") + "\n"
}

/// Prints a health check report, with per-check details, to stdout
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));

    for outcome in &report.outcomes {
        if outcome.result.details.is_empty() {
            continue;
        }
        match outcome.description {
            Some(description) => println!("\n{} ({}):", outcome.name.bold(), description),
            None => println!("\n{}:", outcome.name.bold()),
        }
        for line in &outcome.result.details {
            println!("  {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::runner::CheckOutcome;
    use crate::health::CheckResult;

    #[test]
    fn test_report_lists_each_check() {
        colored::control::set_override(false);
        let report = HealthCheckReport {
            outcomes: vec![
                CheckOutcome {
                    name: "Assets".to_string(),
                    description: None,
                    result: CheckResult::warn("1 of 3 images unavailable"),
                },
                CheckOutcome {
                    name: "Scene Layout".to_string(),
                    description: None,
                    result: CheckResult::pass("overlays placed"),
                },
            ],
        };

        let text = format_report(&report);
        assert!(text.contains("Assets"));
        assert!(text.contains("WARN"));
        assert!(text.contains("1 of 3 images unavailable"));
        assert!(text.contains("Total checks: 2"));
        assert!(text.contains("scene will be incomplete"));
    }
}
