//! Exported records

use crate::reader::CellValue;
use indexmap::IndexMap;
use serde::Serialize;

/// One route row of the sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRecord {
    pub map: String,
    pub route: String,
    pub length_km: CellValue,
    pub length_miles: CellValue,
    pub elevation: CellValue,
    pub lead_in: CellValue,
    pub badge_xp: CellValue,
    /// Selection flag per user, in configured user order
    pub users: IndexMap<String, bool>,
    /// `None` when the row does not reach the vote column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_winner: Option<bool>,
}

/// Top-level export document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionEnvelope {
    pub goal_km: u32,
    pub goal_miles: f64,
    pub users: Vec<String>,
    pub routes: Vec<RouteRecord>,
}

/// Header cell holding a date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateColumn {
    /// 0-based column offset
    pub column: usize,
    pub header: CellValue,
}
