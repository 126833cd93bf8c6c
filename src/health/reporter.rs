//! Terminal rendering of a health report

use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Alignment, Modify, Style};

use super::check::CheckStatus;
use super::runner::HealthCheckReport;

/// Table of results followed by a one-line summary
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Check", "Status", "Time", "Summary"]);

    for entry in &report.entries {
        builder.push_record([
            entry.name.to_string(),
            entry.result.status.colored_label().to_string(),
            format!("{:.1?}", entry.result.duration),
            entry.result.message.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format_summary(report));
    output
}

fn format_summary(report: &HealthCheckReport) -> String {
    let mut summary = format!(
        "{} checks: {} passed, {} warned, {} skipped, {} failed",
        report.total(),
        report.count(CheckStatus::Pass),
        report.count(CheckStatus::Warn),
        report.count(CheckStatus::Skip),
        report.count(CheckStatus::Fail),
    );

    let verdict = if !report.is_healthy() {
        "UNHEALTHY".red().bold()
    } else if report.has_warnings() {
        "HEALTHY (with warnings)".yellow().bold()
    } else {
        "HEALTHY".green().bold()
    };
    summary.push_str(&format!("\n{verdict}"));
    summary
}

/// Details of every check that reported any
pub fn format_details(report: &HealthCheckReport) -> String {
    let mut output = String::new();
    for entry in report.entries.iter().filter(|e| !e.result.details.is_empty()) {
        output.push_str(&format!("\n{}\n", entry.name.bold()));
        for line in &entry.result.details {
            output.push_str(&format!("  {line}\n"));
        }
    }
    output
}

pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));
    print!("{}", format_details(report));
}
