use crate::domain::model::{MigrationReport, OutputFormat};
use crate::utils::error::Result;
use std::fmt::Write as _;

pub fn render(report: &MigrationReport, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Text => Ok(render_text(report).into_bytes()),
        OutputFormat::Csv => render_csv(report),
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(report)?),
    }
}

fn render_text(report: &MigrationReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Region: {}", report.region);
    if let Some(key) = &report.recipe_key {
        let _ = writeln!(out, "Recipe: {}", key);
    }
    let _ = writeln!(
        out,
        "Migratable: {} of {} numbers",
        report.migratable_count(),
        report.total_numbers
    );
    for candidate in &report.candidates {
        let keys: Vec<String> = candidate.recipe_keys.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "  {} [{}]", candidate.raw, keys.join(", "));
    }
    if !report.unmatched.is_empty() {
        let _ = writeln!(out, "Not migratable: {}", report.unmatched.len());
        for raw in &report.unmatched {
            let _ = writeln!(out, "  {}", raw);
        }
    }
    out
}

fn render_csv(report: &MigrationReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Number", "Raw Input", "Migratable", "Recipe Keys"])?;
    for candidate in &report.candidates {
        let keys: Vec<String> = candidate.recipe_keys.iter().map(ToString::to_string).collect();
        writer.write_record([
            candidate.number.as_str(),
            candidate.raw.as_str(),
            "true",
            keys.join(" | ").as_str(),
        ])?;
    }
    for raw in &report.unmatched {
        writer.write_record(["", raw.as_str(), "false", ""])?;
    }
    writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()).into())
}
