//! Terminal output utilities

use bridge_registry::{EntryStatus, RegistrationReport};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::{settings::Style, Table, Tabled};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Create a spinner; hidden when output is suppressed
pub fn spinner(msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[derive(Tabled)]
struct ReportRow {
    kind: String,
    name: String,
    namespace: String,
    status: String,
    error: String,
}

fn report_rows(report: &RegistrationReport) -> Vec<ReportRow> {
    report
        .entries
        .iter()
        .map(|e| ReportRow {
            kind: e.kind.clone(),
            name: e.name.clone(),
            namespace: e.namespace.clone(),
            status: e.status.to_string(),
            error: e.error.clone().unwrap_or_default(),
        })
        .collect()
}

fn summary_line(report: &RegistrationReport) -> String {
    format!(
        "{} registered, {} skipped, {} failed",
        report.registered(),
        report.skipped(),
        report.failed()
    )
}

/// Print a registration report as a table followed by a summary line
pub fn registration_report(report: &RegistrationReport) {
    header(&format!(
        "Release {} ({})",
        report.release, report.namespace
    ));

    if report.entries.is_empty() {
        info("No resources found in the release manifest");
        return;
    }

    let mut table = Table::new(report_rows(report));
    table.with(Style::sharp());
    println!("{}", table);

    let summary = summary_line(report);
    if report.failed() > 0 {
        warning(&summary);
    } else if report
        .entries
        .iter()
        .any(|e| e.status == EntryStatus::Registered)
    {
        success(&summary);
    } else {
        info(&summary);
    }
}
