//! Grid geometry configuration.
//!
//! Callers usually supply a [`PartialConfigs`] and let [`resolve_configs`]
//! fill in the defaults. The layout engine only ever reads a fully resolved
//! and validated [`Configs`].

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::event::MAX_DAY;

pub const DEFAULT_START_HOUR: u32 = 8;
pub const DEFAULT_END_HOUR: u32 = 20;
pub const DEFAULT_CELL_WIDTH: f64 = 100.0;
pub const DEFAULT_CELL_HEIGHT: f64 = 60.0;
pub const DEFAULT_NUM_OF_DAYS: u32 = 5;
pub const DEFAULT_NUM_OF_DAYS_PER_PAGE: u32 = 5;
pub const DEFAULT_TIME_TICKS_WIDTH: f64 = 20.0;

/// Resolved grid geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configs {
    /// First hour shown on the grid.
    pub start_hour: u32,
    /// Last hour boundary of the grid; events may end exactly here.
    pub end_hour: u32,
    /// Pixel width of one day column.
    pub cell_width: f64,
    /// Pixel height of one hour row.
    pub cell_height: f64,
    pub num_of_days: u32,
    /// Presentation only: day columns visible without scrolling.
    pub num_of_days_per_page: u32,
    /// Presentation only: width of the hour tick gutter.
    pub time_ticks_width: f64,
}

impl Default for Configs {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            num_of_days: DEFAULT_NUM_OF_DAYS,
            num_of_days_per_page: DEFAULT_NUM_OF_DAYS_PER_PAGE,
            time_ticks_width: DEFAULT_TIME_TICKS_WIDTH,
        }
    }
}

impl Configs {
    /// Number of hour rows drawn, counting both boundary hours.
    pub fn num_of_hours(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour) + 1
    }

    /// Check the geometry invariants.
    pub fn validate(&self) -> Result<()> {
        if self.end_hour > 24 {
            return Err(invalid("endHour", self.end_hour, "must be at most 24"));
        }
        if self.end_hour <= self.start_hour {
            return Err(invalid(
                "endHour",
                self.end_hour,
                format!("must be greater than startHour {}", self.start_hour),
            ));
        }
        if !(self.cell_width.is_finite() && self.cell_width > 0.0) {
            return Err(invalid("cellWidth", self.cell_width, "must be positive"));
        }
        if !(self.cell_height.is_finite() && self.cell_height > 0.0) {
            return Err(invalid("cellHeight", self.cell_height, "must be positive"));
        }
        if self.num_of_days < 1 || self.num_of_days > MAX_DAY {
            return Err(invalid(
                "numOfDays",
                self.num_of_days,
                format!("must be between 1 and {MAX_DAY}"),
            ));
        }
        Ok(())
    }
}

/// Caller-supplied configuration; unset fields take the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialConfigs {
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
    pub cell_width: Option<f64>,
    pub cell_height: Option<f64>,
    pub num_of_days: Option<u32>,
    pub num_of_days_per_page: Option<u32>,
    pub time_ticks_width: Option<f64>,
}

/// Merge `partial` over the defaults and validate the result.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidConfig`] naming the first field that breaks
/// a geometry invariant.
pub fn resolve_configs(partial: &PartialConfigs) -> Result<Configs> {
    let defaults = Configs::default();
    let configs = Configs {
        start_hour: partial.start_hour.unwrap_or(defaults.start_hour),
        end_hour: partial.end_hour.unwrap_or(defaults.end_hour),
        cell_width: partial.cell_width.unwrap_or(defaults.cell_width),
        cell_height: partial.cell_height.unwrap_or(defaults.cell_height),
        num_of_days: partial.num_of_days.unwrap_or(defaults.num_of_days),
        num_of_days_per_page: partial
            .num_of_days_per_page
            .unwrap_or(defaults.num_of_days_per_page),
        time_ticks_width: partial.time_ticks_width.unwrap_or(defaults.time_ticks_width),
    };
    configs.validate()?;
    Ok(configs)
}

fn invalid(field: &'static str, value: impl ToString, reason: impl Into<String>) -> LayoutError {
    LayoutError::InvalidConfig {
        field,
        value: value.to_string(),
        reason: reason.into(),
    }
}
