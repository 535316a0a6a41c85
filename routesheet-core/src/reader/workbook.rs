//! Workbook data structures

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// Represents an opened workbook with its sheets fully read
#[derive(Debug, Clone)]
pub struct Workbook {
    pub path: PathBuf,
    pub sheets: Vec<Sheet>,
    /// Index into `sheets` of the sheet selected when the document opens
    pub active_index: usize,
}

impl Workbook {
    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// The active sheet, falling back to the first one
    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.sheets
            .get(self.active_index)
            .or_else(|| self.sheets.first())
    }
}

/// Represents a worksheet as a grid anchored at A1.
///
/// Rows read from a file are padded to `max_column` cells so positional
/// offsets behave the same for all of them. Sheets built with
/// [`Sheet::from_rows`] keep whatever row lengths they are given.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Build a sheet from rows starting at row 1. Rows may be ragged.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Get the cells of a row (1-based, like spreadsheet row numbers)
    pub fn row(&self, row: u32) -> Option<&[CellValue]> {
        if row == 0 {
            return None;
        }
        self.rows.get(row as usize - 1).map(Vec::as_slice)
    }

    /// Get a cell by 1-based row and 0-based column
    pub fn cell(&self, row: u32, col: usize) -> Option<&CellValue> {
        self.row(row).and_then(|cells| cells.get(col))
    }

    /// Iterate rows with their 1-based row numbers
    pub fn rows(&self) -> impl Iterator<Item = (u32, &[CellValue])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, cells)| (i as u32 + 1, cells.as_slice()))
    }

    /// Last row number (1-based), 0 for an empty sheet
    pub fn max_row(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Widest row length, 0 for an empty sheet
    pub fn max_column(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.max_row() == 0 || self.max_column() == 0
    }

    /// Used range in A1 notation, e.g. "A1:O120"
    pub fn dimensions(&self) -> String {
        if self.is_empty() {
            return "A1:A1".to_string();
        }
        format!(
            "A1:{}{}",
            col_to_letter(self.max_column() as u32 - 1),
            self.max_row()
        )
    }
}

/// Convert a 0-based column number to letters (0 -> A, 26 -> AA)
pub fn col_to_letter(mut col: u32) -> String {
    let mut result = String::new();
    loop {
        result.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result
}

/// Cell value types
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDateTime),
    /// Time of day without a calendar date
    Time(NaiveTime),
    Error(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell holds a calendar date or datetime
    pub fn is_date(&self) -> bool {
        matches!(self, CellValue::Date(_))
    }

    /// Text content, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell equals `marker`, ignoring case. Only text cells match.
    pub fn is_marker(&self, marker: &str) -> bool {
        self.as_text()
            .is_some_and(|s| s.to_lowercase() == marker.to_lowercase())
    }

    /// Render the cell as a non-blank label.
    ///
    /// Empty cells, empty strings, zero and `false` yield `None`.
    pub fn as_label(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.is_empty() => None,
            CellValue::Number(n) if *n == 0.0 => None,
            CellValue::Boolean(false) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Format a number the way a spreadsheet shows it: whole values without a
/// fractional part.
pub fn format_number(n: f64) -> String {
    match whole_number(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}

fn whole_number(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Number(n) => match whole_number(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            CellValue::Date(_) | CellValue::Time(_) | CellValue::Error(_) => {
                serializer.collect_str(self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_row_indexing_is_one_based() {
        let sheet = Sheet::from_rows(
            "Routes",
            vec![vec![text("title")], vec![text("Map"), text("Route")]],
        );

        assert!(sheet.row(0).is_none());
        assert_eq!(sheet.row(1).unwrap().len(), 1);
        assert_eq!(sheet.cell(2, 1), Some(&text("Route")));
        assert!(sheet.cell(3, 0).is_none());
        assert_eq!(sheet.max_row(), 2);
        assert_eq!(sheet.max_column(), 2);
    }

    #[test]
    fn test_dimensions() {
        let rows = vec![vec![CellValue::Empty; 15]; 120];
        let sheet = Sheet::from_rows("Routes", rows);
        assert_eq!(sheet.dimensions(), "A1:O120");

        let empty = Sheet::from_rows("Empty", Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.dimensions(), "A1:A1");
    }

    #[test]
    fn test_col_to_letter() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(14), "O");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
        assert_eq!(col_to_letter(701), "ZZ");
        assert_eq!(col_to_letter(702), "AAA");
    }

    #[test]
    fn test_marker_matching() {
        assert!(text("x").is_marker("x"));
        assert!(text("X").is_marker("x"));
        assert!(!text("y").is_marker("x"));
        assert!(!text("").is_marker("x"));
        assert!(!text("0").is_marker("x"));
        assert!(!text(" x").is_marker("x"));
        assert!(!CellValue::Empty.is_marker("x"));
        assert!(!CellValue::Number(0.0).is_marker("x"));
        assert!(!CellValue::Boolean(true).is_marker("x"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(text("Watopia").as_label().as_deref(), Some("Watopia"));
        assert_eq!(text("").as_label(), None);
        assert_eq!(CellValue::Empty.as_label(), None);
        assert_eq!(CellValue::Number(0.0).as_label(), None);
        assert_eq!(CellValue::Number(8.0).as_label().as_deref(), Some("8"));
        assert_eq!(CellValue::Number(12.5).as_label().as_deref(), Some("12.5"));
        assert_eq!(CellValue::Boolean(false).as_label(), None);
        let noon = CellValue::Time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert!(!noon.is_date());
        assert_eq!(noon.as_label().as_deref(), Some("12:00:00"));
    }

    #[test]
    fn test_serialization() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let cells = vec![
            CellValue::Empty,
            CellValue::Number(59.0),
            CellValue::Number(17.8),
            text("Watopia"),
            CellValue::Boolean(true),
            CellValue::Date(date),
            CellValue::Time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
            CellValue::Error("#DIV/0!".to_string()),
        ];

        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(
            json,
            r##"[null,59,17.8,"Watopia",true,"2025-12-01 00:00:00","12:00:00","#DIV/0!"]"##
        );
    }

    #[test]
    fn test_active_sheet_falls_back_to_first() {
        let workbook = Workbook {
            path: PathBuf::from("test.xlsx"),
            sheets: vec![
                Sheet::from_rows("First", Vec::new()),
                Sheet::from_rows("Second", Vec::new()),
            ],
            active_index: 7,
        };
        assert_eq!(workbook.active_sheet().unwrap().name, "First");
        assert_eq!(workbook.sheet_names(), vec!["First", "Second"]);
        assert!(workbook.get_sheet("Second").is_some());
    }
}
