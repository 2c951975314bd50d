//! Loaded table wrapper: the raw frame plus the derived gap column.

use crate::data::DataProcessor;
use crate::error::{DashboardError, Result};
use polars::prelude::*;
use tracing::warn;

/// The loaded country table with its derived gap column.
///
/// When the gap cannot be derived the raw table is kept so views that do not
/// need the gap still work, and the schema error is handed to those that do.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    gap_error: Option<DashboardError>,
}

impl Dataset {
    pub fn prepare(raw: DataFrame) -> Self {
        match DataProcessor::with_life_expectancy_gap(&raw) {
            Ok(frame) => Self {
                frame,
                gap_error: None,
            },
            Err(err) => {
                warn!("Gap column not derived: {}", err);
                Self {
                    frame: raw,
                    gap_error: Some(err),
                }
            }
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// The table, provided it carries `Life_Expectancy_Gap`.
    pub fn gap_frame(&self) -> Result<&DataFrame> {
        match &self.gap_error {
            Some(err) => Err(err.clone()),
            None => Ok(&self.frame),
        }
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }
}
