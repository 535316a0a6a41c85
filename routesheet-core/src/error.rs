//! Error types for reading, extracting and exporting route sheets

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouteSheetError>;

#[derive(Error, Debug)]
pub enum RouteSheetError {
    #[error("Input file not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    /// No reader handles this kind of file
    #[error(
        "No spreadsheet reader available for '{}' (extension: {extension}). Supported formats: {}",
        .path.display(),
        crate::reader::SUPPORTED_EXTENSIONS.join(", ")
    )]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Row {row} has {width} columns, at least {required} are required")]
    MalformedRow {
        row: u32,
        width: usize,
        required: usize,
    },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Workbook has no sheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to read archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}
