//! Spreadsheet reading behind the [`TabularReader`] interface
//!
//! [`open_reader`] is the only place a concrete reader is chosen. The
//! extractor only ever sees a materialized [`Sheet`].

use crate::error::{Result, RouteSheetError};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod workbook;
pub mod xml_parser;

pub use workbook::{CellValue, Sheet, Workbook};

/// File extensions handled by [`CalamineReader`]
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Source of positionally indexed sheets
pub trait TabularReader {
    /// Path of the underlying document
    fn path(&self) -> &Path;

    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Index of the sheet selected when the document is opened
    fn active_sheet_index(&self) -> usize;

    /// Read one sheet completely
    fn read_sheet(&mut self, name: &str) -> Result<Sheet>;

    /// Read the active sheet, or the first sheet if the active index is stale
    fn read_active_sheet(&mut self) -> Result<Sheet> {
        let names = self.sheet_names();
        let name = names
            .get(self.active_sheet_index())
            .or_else(|| names.first())
            .cloned()
            .ok_or_else(|| RouteSheetError::EmptyWorkbook(self.path().to_path_buf()))?;
        self.read_sheet(&name)
    }
}

/// Open a reader for `path`, choosing the implementation from the file type
pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn TabularReader>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(RouteSheetError::MissingInputFile(path.to_path_buf()));
    }

    let extension = file_extension(path);
    if SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(Box::new(CalamineReader::open(path)?))
    } else {
        Err(RouteSheetError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        })
    }
}

/// Read every sheet of a workbook
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;

    let mut sheets = Vec::new();
    for name in reader.sheet_names() {
        sheets.push(reader.read_sheet(&name)?);
    }

    Ok(Workbook {
        path: path.to_path_buf(),
        sheets,
        active_index: reader.active_sheet_index(),
    })
}

/// Read only the active sheet of a workbook
pub fn read_active_sheet<P: AsRef<Path>>(path: P) -> Result<Sheet> {
    open_reader(path)?.read_active_sheet()
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Reader backed by calamine, covering Excel and OpenDocument formats
pub struct CalamineReader {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
    active_index: usize,
}

impl CalamineReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let workbook = open_workbook_auto(path)?;

        // calamine does not expose the active tab, read it from the archive
        let active_index = match file_extension(path).as_str() {
            "xlsx" | "xlsm" => {
                let file = File::open(path)?;
                let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
                xml_parser::extract_active_tab_from_xlsx(&mut archive)?
            }
            _ => 0,
        };
        debug!(path = %path.display(), active_index, "opened workbook");

        Ok(Self {
            path: path.to_path_buf(),
            workbook,
            active_index,
        })
    }
}

impl TabularReader for CalamineReader {
    fn path(&self) -> &Path {
        &self.path
    }

    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn active_sheet_index(&self) -> usize {
        self.active_index
    }

    fn read_sheet(&mut self, name: &str) -> Result<Sheet> {
        if !self.sheet_names().iter().any(|n| n == name) {
            return Err(RouteSheetError::SheetNotFound(name.to_string()));
        }
        let range = self.workbook.worksheet_range(name)?;
        Ok(parse_sheet(name, &range))
    }
}

/// Materialize a calamine range into a sheet anchored at A1
fn parse_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let Some((max_row, max_col)) = range.end() else {
        return Sheet::from_rows(name, Vec::new());
    };

    let rows = (0..=max_row)
        .map(|row| {
            (0..=max_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(parse_cell_value)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    Sheet::from_rows(name, rows)
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => match dt.as_datetime() {
            // Serials below 1 carry no calendar date, only a time of day
            Some(datetime) if (0.0..1.0).contains(&dt.as_f64()) => {
                CellValue::Time(datetime.time())
            }
            Some(datetime) => CellValue::Date(datetime),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::Date)
            .or_else(|| s.parse::<NaiveTime>().ok().map(CellValue::Time))
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| s.parse::<NaiveDate>().ok()?.and_hms_opt(0, 0, 0))
}
