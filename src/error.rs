//! Dashboard error taxonomy.
//! Every failure is scoped to the section that hit it, so errors are cloneable
//! and can be handed out again from the loader cache.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Failed to load data from {path}: {reason}")]
    DataLoad { path: String, reason: String },
    #[error("Column `{column}` {problem}")]
    Schema { column: String, problem: String },
    #[error("Cannot render {chart}: {reason}")]
    Render { chart: String, reason: String },
}

impl DashboardError {
    pub fn missing_column(column: &str) -> Self {
        DashboardError::Schema {
            column: column.to_string(),
            problem: "is missing from the dataset".to_string(),
        }
    }

    pub fn wrong_type(column: &str, expected: &str, found: impl std::fmt::Display) -> Self {
        DashboardError::Schema {
            column: column.to_string(),
            problem: format!("must be {expected}, found {found}"),
        }
    }

    pub fn render(chart: &str, reason: impl Into<String>) -> Self {
        DashboardError::Render {
            chart: chart.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_column() {
        let err = DashboardError::missing_column("Predicted_Life_Expectancy");
        assert!(matches!(err, DashboardError::Schema { .. }));
        assert_eq!(
            err.to_string(),
            "Column `Predicted_Life_Expectancy` is missing from the dataset"
        );
    }

    #[test]
    fn render_errors_are_not_schema_errors() {
        let err = DashboardError::render("gap ranking", "no rows");
        assert!(matches!(err, DashboardError::Render { .. }));
        assert_eq!(err.to_string(), "Cannot render gap ranking: no rows");
    }
}
