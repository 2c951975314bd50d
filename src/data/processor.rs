//! Data Processor Module
//! Derived gap column, country filtering and gap ranking.

use crate::data::columns::{COUNTRY, FEMALE, GAP, MALE};
use crate::data::CountryFilter;
use crate::error::{DashboardError, Result};
use polars::prelude::*;
use std::collections::BTreeSet;

/// One row picked by the gap ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCountry {
    /// Position in the source table
    pub row: usize,
    pub country: String,
    pub gap: f64,
}

/// Countries with the largest and smallest gender gap.
#[derive(Debug, Clone, PartialEq)]
pub struct GapRanking {
    /// Largest gap first
    pub largest: Vec<RankedCountry>,
    /// Smallest gap first
    pub smallest: Vec<RankedCountry>,
}

/// Stateless operations over the country table.
pub struct DataProcessor;

impl DataProcessor {
    /// Return a copy of `df` with `Life_Expectancy_Gap = female - male`.
    ///
    /// An existing gap column is replaced, so applying this twice is the same
    /// as applying it once.
    pub fn with_life_expectancy_gap(df: &DataFrame) -> Result<DataFrame> {
        let female = Self::numeric_column(df, FEMALE)?;
        let male = Self::numeric_column(df, MALE)?;

        let gap: Vec<Option<f64>> = female
            .iter()
            .zip(male.iter())
            .map(|(f, m)| Some((*f)? - (*m)?))
            .collect();

        let mut out = df.clone();
        out.with_column(Series::new(GAP.into(), gap))
            .map_err(|e| DashboardError::Schema {
                column: GAP.to_string(),
                problem: e.to_string(),
            })?;
        Ok(out)
    }

    /// Keep only the rows the filter allows, in their original order.
    pub fn filter_countries(df: &DataFrame, filter: &CountryFilter) -> Result<DataFrame> {
        if filter.is_all() {
            return Ok(df.clone());
        }

        let countries = Self::country_column(df)?;
        let mask: BooleanChunked = countries
            .iter()
            .map(|c| c.as_deref().is_some_and(|c| filter.allows(c)))
            .collect();

        df.filter(&mask)
            .map_err(|e| DashboardError::render("country filter", e.to_string()))
    }

    /// Pick the `n` largest and `n` smallest gaps.
    ///
    /// Equal gaps keep their table order. Rows without a country or a gap are
    /// skipped. With fewer than `n` rankable rows both lists hold all of them.
    pub fn rank_by_gap(df: &DataFrame, n: usize) -> Result<GapRanking> {
        if n == 0 {
            return Err(DashboardError::render(
                "gap ranking",
                "ranking size must be at least 1",
            ));
        }

        let countries = Self::country_column(df)?;
        let gaps = Self::numeric_column(df, GAP)?;

        let mut rankable: Vec<RankedCountry> = countries
            .into_iter()
            .zip(gaps)
            .enumerate()
            .filter_map(|(row, (country, gap))| {
                Some(RankedCountry {
                    row,
                    country: country?,
                    gap: gap?,
                })
            })
            .collect();

        if rankable.is_empty() {
            return Err(DashboardError::render(
                "gap ranking",
                "no rows with both a country and a gap value",
            ));
        }

        rankable.sort_by(|a, b| a.gap.total_cmp(&b.gap).then(a.row.cmp(&b.row)));
        let smallest = rankable.iter().take(n).cloned().collect();

        rankable.sort_by(|a, b| b.gap.total_cmp(&a.gap).then(a.row.cmp(&b.row)));
        let largest = rankable.into_iter().take(n).collect();

        Ok(GapRanking { largest, smallest })
    }

    /// Sorted unique country names.
    pub fn unique_countries(df: &DataFrame) -> Result<Vec<String>> {
        let unique: BTreeSet<String> = Self::country_column(df)?.into_iter().flatten().collect();
        Ok(unique.into_iter().collect())
    }

    /// Read a numeric column as `f64`, with nulls and NaN as `None`.
    pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
        let column = df
            .column(name)
            .map_err(|_| DashboardError::missing_column(name))?;

        if !Self::is_numeric(column.dtype()) {
            return Err(DashboardError::wrong_type(name, "numeric", column.dtype()));
        }

        let values = column
            .cast(&DataType::Float64)
            .map_err(|e| DashboardError::wrong_type(name, "numeric", e))?;
        let values = values
            .as_materialized_series()
            .f64()
            .map_err(|e| DashboardError::wrong_type(name, "numeric", e))?;

        Ok(values
            .into_iter()
            .map(|v| v.filter(|v| !v.is_nan()))
            .collect())
    }

    /// Read the `Country` column.
    pub fn country_column(df: &DataFrame) -> Result<Vec<Option<String>>> {
        let column = df
            .column(COUNTRY)
            .map_err(|_| DashboardError::missing_column(COUNTRY))?;

        let names = column
            .as_materialized_series()
            .str()
            .map_err(|_| DashboardError::wrong_type(COUNTRY, "text", column.dtype()))?;

        Ok(names
            .into_iter()
            .map(|name| name.map(str::to_string))
            .collect())
    }

    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }
}
