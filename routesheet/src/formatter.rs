//! Output formatters for export summaries

use anyhow::Result;
use colored::*;
use routesheet_core::ExportSummary;

/// Print the export summary with colors
pub fn print_human(summary: &ExportSummary, preview: usize) {
    let envelope = &summary.envelope;

    println!(
        "{}",
        format!(
            "Exporting: {} (sheet: {})",
            summary.input.display(),
            summary.sheet_name
        )
        .bold()
    );
    println!();

    println!("{} {}", "Total routes:".bold(), envelope.routes.len());
    println!("{} {}", "Users:".bold(), envelope.users.join(", ").cyan());
    println!("{} {}", "Date columns:".bold(), summary.date_columns.len());

    if preview > 0 && !envelope.routes.is_empty() {
        println!();
        println!("{}", format!("First {} routes:", preview).bold().underline());
        for route in envelope.routes.iter().take(preview) {
            println!(
                "  {} - {}: {}",
                route.map.cyan(),
                route.route,
                route.length_miles.to_string().yellow()
            );
        }
    }

    println!();
    println!(
        "{} {}",
        "✓ Data exported to".green().bold(),
        summary.output.display()
    );
}

/// Print the export summary in JSON format
pub fn print_json(summary: &ExportSummary, preview: usize) -> Result<()> {
    let envelope = &summary.envelope;
    let output = serde_json::json!({
        "file": summary.input.display().to_string(),
        "sheet": summary.sheet_name,
        "output": summary.output.display().to_string(),
        "total_routes": envelope.routes.len(),
        "users": envelope.users,
        "date_columns": summary.date_columns,
        "preview": envelope.routes.iter().take(preview).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
