//! routesheet-core: route record extraction from fixed-layout spreadsheets
//!
//! Reads the active sheet of a workbook, maps fixed column offsets to route
//! fields and exports the result as JSON.

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod reader;
pub mod writer;

use std::path::{Path, PathBuf};

pub use config::{ColumnLayout, ExtractConfig, GoalConfig};
pub use error::{Result, RouteSheetError};
pub use extract::Extractor;
pub use model::{DateColumn, ExtractionEnvelope, RouteRecord};

/// Result of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sheet_name: String,
    pub envelope: ExtractionEnvelope,
    pub date_columns: Vec<DateColumn>,
}

/// Main export interface
pub struct RouteExporter {
    extractor: Extractor,
}

impl RouteExporter {
    /// Create an exporter with the default layout
    pub fn new() -> Self {
        Self {
            extractor: Extractor::default(),
        }
    }

    /// Create an exporter with a validated custom configuration
    pub fn with_config(config: ExtractConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor: Extractor::new(config),
        })
    }

    pub fn config(&self) -> &ExtractConfig {
        self.extractor.config()
    }

    /// Read the active sheet of `path` and extract its routes
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionEnvelope> {
        let sheet = reader::read_active_sheet(path)?;
        self.extractor.extract(&sheet)
    }

    /// Extract routes from `input` and write them as JSON to `output`
    pub fn export_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ExportSummary> {
        let (input, output) = (input.as_ref(), output.as_ref());

        let sheet = reader::read_active_sheet(input)?;
        let envelope = self.extractor.extract(&sheet)?;
        let date_columns = self.extractor.date_columns(&sheet);
        writer::write_envelope(output, &envelope)?;

        Ok(ExportSummary {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            sheet_name: sheet.name,
            envelope,
            date_columns,
        })
    }
}

impl Default for RouteExporter {
    fn default() -> Self {
        Self::new()
    }
}
