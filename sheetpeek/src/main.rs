use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use routesheet_core::reader::{self, CellValue, Sheet, Workbook};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetpeek")]
#[command(about = "Print sheet layout and leading rows of a spreadsheet")]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS file
    #[arg(value_name = "FILE", default_value = "zwift.xlsx")]
    file: PathBuf,

    /// Number of leading rows to print per sheet
    #[arg(short, long, default_value_t = 15)]
    rows: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[derive(Serialize)]
struct WorkbookReport {
    file: String,
    sheet_names: Vec<String>,
    active_sheet: Option<String>,
    sheets: Vec<SheetReport>,
}

#[derive(Serialize)]
struct SheetReport {
    name: String,
    dimensions: String,
    max_row: u32,
    max_column: usize,
    rows: Vec<Vec<CellValue>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workbook = reader::read_workbook(&cli.file)
        .with_context(|| format!("Failed to read file: {}", cli.file.display()))?;

    let report = build_report(&workbook, cli.rows);

    match cli.format {
        OutputFormat::Human => print_human(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "routesheet_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_report(workbook: &Workbook, preview_rows: usize) -> WorkbookReport {
    WorkbookReport {
        file: workbook.path.display().to_string(),
        sheet_names: workbook
            .sheet_names()
            .into_iter()
            .map(String::from)
            .collect(),
        active_sheet: workbook.active_sheet().map(|s| s.name.clone()),
        sheets: workbook
            .sheets
            .iter()
            .map(|sheet| sheet_report(sheet, preview_rows))
            .collect(),
    }
}

fn sheet_report(sheet: &Sheet, preview_rows: usize) -> SheetReport {
    SheetReport {
        name: sheet.name.clone(),
        dimensions: sheet.dimensions(),
        max_row: sheet.max_row(),
        max_column: sheet.max_column(),
        rows: sheet
            .rows()
            .take(preview_rows)
            .map(|(_, cells)| cells.to_vec())
            .collect(),
    }
}

fn render_row(cells: &[CellValue]) -> String {
    let rendered: Vec<String> = cells
        .iter()
        .map(|cell| match cell {
            CellValue::Empty => "-".to_string(),
            CellValue::Text(s) => format!("{:?}", s),
            other => other.to_string(),
        })
        .collect();
    format!("[{}]", rendered.join(", "))
}

fn print_human(report: &WorkbookReport) {
    println!("{} {}", "Sheet names:".bold(), report.sheet_names.join(", "));
    if let Some(active) = &report.active_sheet {
        println!("{} {}", "Active sheet:".bold(), active.cyan());
    }

    for sheet in &report.sheets {
        println!();
        println!("{}", format!("=== Sheet: {} ===", sheet.name).bold());
        println!("Dimensions: {}", sheet.dimensions);
        println!("Max row: {}, Max column: {}", sheet.max_row, sheet.max_column);

        if sheet.rows.is_empty() {
            println!("{}", "(empty sheet)".bright_black());
            continue;
        }

        println!();
        println!("First {} rows:", sheet.rows.len());
        for (i, row) in sheet.rows.iter().enumerate() {
            println!("{} {}", format!("Row {}:", i + 1).yellow(), render_row(row));
        }
    }
}

fn print_json(report: &WorkbookReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_workbook() -> Workbook {
        let rows = (1..=20)
            .map(|i| {
                vec![
                    CellValue::Text(format!("Route {}", i)),
                    CellValue::Number(i as f64 * 1.5),
                    CellValue::Empty,
                ]
            })
            .collect();
        Workbook {
            path: PathBuf::from("zwift.xlsx"),
            sheets: vec![
                Sheet::from_rows("Routes", rows),
                Sheet::from_rows("Empty", Vec::new()),
            ],
            active_index: 0,
        }
    }

    #[test]
    fn test_report_limits_rows() {
        let report = build_report(&sample_workbook(), 15);

        assert_eq!(report.sheet_names, vec!["Routes", "Empty"]);
        assert_eq!(report.active_sheet.as_deref(), Some("Routes"));
        assert_eq!(report.sheets[0].rows.len(), 15);
        assert_eq!(report.sheets[0].dimensions, "A1:C20");
        assert_eq!(report.sheets[0].max_row, 20);
        assert_eq!(report.sheets[0].max_column, 3);
        assert!(report.sheets[1].rows.is_empty());
    }

    #[test]
    fn test_render_row() {
        let row = vec![
            CellValue::Text("Watopia".to_string()),
            CellValue::Number(17.8),
            CellValue::Number(59.0),
            CellValue::Empty,
            CellValue::Boolean(true),
        ];
        assert_eq!(render_row(&row), r#"["Watopia", 17.8, 59, -, true]"#);
    }

    #[test]
    fn test_report_serializes() {
        let report = build_report(&sample_workbook(), 1);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["sheets"][0]["rows"][0][0], "Route 1");
        assert_eq!(value["sheets"][0]["rows"][0][1], 1.5);
        assert!(value["sheets"][0]["rows"][0][2].is_null());
    }
}
