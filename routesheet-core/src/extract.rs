//! Fixed-layout extraction of route records from a sheet

use crate::config::{ColumnLayout, ExtractConfig};
use crate::error::{Result, RouteSheetError};
use crate::model::{DateColumn, ExtractionEnvelope, RouteRecord};
use crate::reader::{CellValue, Sheet};
use indexmap::IndexMap;
use tracing::{debug, info};

/// Builds an [`ExtractionEnvelope`] from a sheet following an [`ExtractConfig`]
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract every route row, in row order
    pub fn extract(&self, sheet: &Sheet) -> Result<ExtractionEnvelope> {
        let layout = &self.config.layout;
        let mut routes = Vec::new();
        let mut skipped = 0usize;

        for row_number in layout.data_start_row..=sheet.max_row() {
            let cells = sheet.row(row_number).unwrap_or(&[]);
            match self.route_from_row(row_number, cells)? {
                Some(route) => routes.push(route),
                None => {
                    debug!(row = row_number, "skipping row without map or route");
                    skipped += 1;
                }
            }
        }

        info!(
            sheet = %sheet.name,
            routes = routes.len(),
            skipped,
            "extracted routes"
        );

        Ok(ExtractionEnvelope {
            goal_km: self.config.goal.km,
            goal_miles: self.config.goal.miles,
            users: self.config.users.clone(),
            routes,
        })
    }

    /// Build a record from one row; `None` if map or route is missing
    pub fn route_from_row(&self, row_number: u32, cells: &[CellValue]) -> Result<Option<RouteRecord>> {
        let layout = &self.config.layout;

        let (Some(map), Some(route)) = (
            label_at(cells, layout.map),
            label_at(cells, layout.route),
        ) else {
            return Ok(None);
        };

        let required = layout.required_width();
        if cells.len() < required {
            return Err(RouteSheetError::MalformedRow {
                row: row_number,
                width: cells.len(),
                required,
            });
        }

        let users = self
            .config
            .users
            .iter()
            .enumerate()
            .map(|(i, user)| {
                let marked = cells
                    .get(layout.user_column(i))
                    .is_some_and(|c| c.is_marker(&self.config.marker));
                (user.clone(), marked)
            })
            .collect::<IndexMap<_, _>>();

        let vote_winner = cells
            .get(layout.vote_winner)
            .map(|c| c.is_marker(&self.config.marker));

        Ok(Some(RouteRecord {
            map,
            route,
            length_km: cells[layout.length_km].clone(),
            length_miles: cells[layout.length_miles].clone(),
            elevation: cells[layout.elevation].clone(),
            lead_in: cells[layout.lead_in].clone(),
            badge_xp: cells[layout.badge_xp].clone(),
            users,
            vote_winner,
        }))
    }

    /// Header cells holding dates
    pub fn date_columns(&self, sheet: &Sheet) -> Vec<DateColumn> {
        detect_date_columns(&self.config.layout, sheet)
    }
}

/// Find header cells whose value is a date
pub fn detect_date_columns(layout: &ColumnLayout, sheet: &Sheet) -> Vec<DateColumn> {
    sheet
        .row(layout.header_row)
        .unwrap_or(&[])
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_date())
        .map(|(column, header)| DateColumn {
            column,
            header: header.clone(),
        })
        .collect()
}

fn label_at(cells: &[CellValue], col: usize) -> Option<String> {
    cells.get(col).and_then(CellValue::as_label)
}
