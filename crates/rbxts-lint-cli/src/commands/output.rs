//! Shared output formatting for lint results.

use anyhow::Result;
use rbxts_lint_core::{LintResult, Violation};

use super::check::LoadedSnapshot;
use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(
    result: &LintResult,
    snapshots: &[LoadedSnapshot],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result, snapshots),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn source_of<'a>(snapshots: &'a [LoadedSnapshot], violation: &Violation) -> Option<&'a str> {
    snapshots
        .iter()
        .find(|l| l.snapshot.path == violation.location.file)
        .map(|l| l.snapshot.source.as_str())
}

fn print_text(result: &LintResult, snapshots: &[LoadedSnapshot]) {
    let (errors, warnings, infos) = result.count_by_severity();

    for violation in &result.violations {
        match source_of(snapshots, violation) {
            Some(source) => println!("{:?}", violation.to_report(source)),
            None => println!("{}", violation.format()),
        }
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}
