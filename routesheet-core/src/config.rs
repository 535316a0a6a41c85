//! Configuration for route extraction: column layout, users, goals and marker

use crate::error::{Result, RouteSheetError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Layout versions this build understands
pub const SUPPORTED_LAYOUT_VERSIONS: &[u32] = &[1];

/// Main extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Cell text that marks a selected flag, compared case-insensitively
    pub marker: String,
    /// User names in column order, starting at `layout.users_start`
    pub users: Vec<String>,
    pub goal: GoalConfig,
    pub layout: ColumnLayout,
}

impl ExtractConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ExtractConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(invalid("marker must not be empty"));
        }

        if self.users.is_empty() {
            return Err(invalid("users must list at least one name"));
        }
        let mut seen = HashSet::new();
        for user in &self.users {
            if !seen.insert(user.as_str()) {
                return Err(invalid(format!("duplicate user '{}'", user)));
            }
        }

        self.layout.validate()
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            marker: "x".to_string(),
            users: ["John", "Alex", "Karen", "Carol", "Ali"]
                .into_iter()
                .map(String::from)
                .collect(),
            goal: GoalConfig::default(),
            layout: ColumnLayout::default(),
        }
    }
}

/// Distance goals copied into every export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    pub km: u32,
    pub miles: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            km: 500,
            miles: 312.5,
        }
    }
}

/// Fixed positional column table.
///
/// Rows are 1-based spreadsheet row numbers; columns are 0-based offsets into
/// a row (0 = column A).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub version: u32,
    pub header_row: u32,
    pub data_start_row: u32,
    pub map: usize,
    pub route: usize,
    pub length_km: usize,
    pub length_miles: usize,
    pub elevation: usize,
    pub lead_in: usize,
    pub badge_xp: usize,
    /// Column of the first user flag; the rest follow contiguously
    pub users_start: usize,
    pub vote_winner: usize,
}

impl ColumnLayout {
    /// Offsets that every emitted row must reach
    pub fn required_columns(&self) -> [usize; 7] {
        [
            self.map,
            self.route,
            self.length_km,
            self.length_miles,
            self.elevation,
            self.lead_in,
            self.badge_xp,
        ]
    }

    /// Minimum row width holding all required columns
    pub fn required_width(&self) -> usize {
        self.required_columns().into_iter().max().unwrap_or(0) + 1
    }

    /// Column of the user at `index` in the user list
    pub fn user_column(&self, index: usize) -> usize {
        self.users_start + index
    }

    fn validate(&self) -> Result<()> {
        if !SUPPORTED_LAYOUT_VERSIONS.contains(&self.version) {
            return Err(invalid(format!(
                "unsupported layout version {} (supported: {:?})",
                self.version, SUPPORTED_LAYOUT_VERSIONS
            )));
        }
        if self.header_row == 0 || self.data_start_row == 0 {
            return Err(invalid("row numbers are 1-based, 0 is not a valid row"));
        }
        if self.data_start_row <= self.header_row {
            return Err(invalid(format!(
                "data_start_row ({}) must come after header_row ({})",
                self.data_start_row, self.header_row
            )));
        }
        Ok(())
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            version: 1,
            header_row: 2,
            data_start_row: 3,
            map: 0,
            route: 1,
            length_km: 2,
            length_miles: 3,
            elevation: 4,
            lead_in: 5,
            badge_xp: 6,
            users_start: 8,
            vote_winner: 14,
        }
    }
}

fn invalid(message: impl Into<String>) -> RouteSheetError {
    RouteSheetError::InvalidConfig(message.into())
}
