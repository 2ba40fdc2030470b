use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::AnalysisResult;

const NONE_LISTED: &str = "None listed";

/// Render analysis results as a flat, human-readable text report.
///
/// Per symptom: severity, condition names, solutions, products, devices,
/// tests and tips. Empty sections print "None listed".
pub fn format_report(results: &[AnalysisResult], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, results, generated_at);
    out
}

fn write_report(
    out: &mut String,
    results: &[AnalysisResult],
    generated_at: DateTime<Utc>,
) -> std::fmt::Result {
    writeln!(out, "Symptom Analysis Report")?;
    writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(out, "Symptoms analyzed: {}", results.len())?;

    for result in results {
        writeln!(out)?;
        writeln!(out, "== {} ({}) ==", result.name, result.category)?;
        writeln!(out, "Severity: {}", result.severity_label())?;

        section(out, "Possible conditions", result.conditions.iter().map(|c| {
            format!("{} (probability: {}, urgency: {})", c.condition, c.probability, c.urgency)
        }))?;
        section(out, "Solutions", result.conditions.iter().map(|c| c.solution.clone()))?;
        section(out, "Products", result.products.iter().cloned())?;
        section(out, "Devices", result.devices.iter().map(|d| d.name.clone()))?;
        section(out, "Tests", result.tests.iter().map(|t| t.test.clone()))?;
        section(out, "Tips", result.tips.iter().cloned())?;
    }

    Ok(())
}

fn section(
    out: &mut String,
    title: &str,
    items: impl Iterator<Item = String>,
) -> std::fmt::Result {
    writeln!(out, "{}:", title)?;
    let mut any = false;
    for item in items {
        writeln!(out, "  - {}", item)?;
        any = true;
    }
    if !any {
        writeln!(out, "  {}", NONE_LISTED)?;
    }
    Ok(())
}
