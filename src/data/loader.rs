//! CSV Data Loader Module
//! Reads the country table once with Polars and memoizes the result.

use crate::data::columns::{BOTH, COUNTRY, FEMALE, MALE, PREDICTED};
use crate::data::Dataset;
use crate::error::{DashboardError, Result};
use polars::prelude::*;
use std::cell::{Cell, OnceCell};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Cell values read as missing, matching the usual spreadsheet and pandas markers.
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Loads the dataset from a fixed path, at most once.
///
/// Failures are cached as well: a broken file is reported on every render
/// without being read again.
pub struct DataLoader {
    path: PathBuf,
    cache: OnceCell<Result<Dataset>>,
    loads: Cell<usize>,
}

impl DataLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceCell::new(),
            loads: Cell::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The dataset, reading the file on first use.
    pub fn load(&self) -> Result<&Dataset> {
        if self.cache.get().is_some() {
            debug!("Dataset served from cache");
        }

        self.cache
            .get_or_init(|| {
                self.loads.set(self.loads.get() + 1);
                Self::read_csv(&self.path).map(Dataset::prepare)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// How many times the file has actually been read.
    pub fn load_count(&self) -> usize {
        self.loads.get()
    }

    fn read_csv(path: &Path) -> Result<DataFrame> {
        let load_error = |reason: String| DashboardError::DataLoad {
            path: path.display().to_string(),
            reason,
        };

        if !path.is_file() {
            return Err(load_error("file not found".to_string()));
        }

        // Header pass: only columns present in the file get a fixed type
        let header = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()
            .and_then(|mut lazy| lazy.collect_schema())
            .map_err(|e| load_error(e.to_string()))?;
        let overwrite: Schema = Self::known_columns()
            .iter_fields()
            .filter(|field| header.contains(field.name()))
            .collect();

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_dtype_overwrite(Some(Arc::new(overwrite)))
            .with_ignore_errors(true)
            .with_null_values(Some(NullValues::AllColumns(
                NULL_MARKERS.iter().map(|m| PlSmallStr::from(*m)).collect(),
            )))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| load_error(e.to_string()))?;

        info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        Ok(df)
    }

    /// Fixed types for the expected columns, so a stray marker or an empty
    /// table never turns a numeric column into text.
    fn known_columns() -> Schema {
        Schema::from_iter([
            Field::new(COUNTRY.into(), DataType::String),
            Field::new(MALE.into(), DataType::Float64),
            Field::new(FEMALE.into(), DataType::Float64),
            Field::new(BOTH.into(), DataType::Float64),
            Field::new(PREDICTED.into(), DataType::Float64),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::GAP;
    use crate::data::DataProcessor;
    use std::fs;

    fn write_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "life_expectancy_{}_{}.csv",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    const HEADER: &str = "Country,Male_Life_Expectancy,Female_Life_Expectancy,\
                          Life_Expectancy_Both,Predicted_Life_Expectancy\n";

    const FULL_CSV: &str = "\
Country,Male_Life_Expectancy,Female_Life_Expectancy,Life_Expectancy_Both,Predicted_Life_Expectancy
Japan,81.5,87.6,84.6,84.5
Russia,66.9,77.6,72.3,72.2
Qatar,79.0,80.1,79.3,79.4
";

    #[test]
    fn loads_and_derives_gap() {
        let path = write_csv("full", FULL_CSV);
        let loader = DataLoader::new(&path);
        let dataset = loader.load().unwrap();

        assert_eq!(dataset.row_count(), 3);
        let frame = dataset.gap_frame().unwrap();
        let gap = DataProcessor::numeric_column(frame, GAP).unwrap();
        assert!((gap[1].unwrap() - 10.7).abs() < 1e-9);
        fs::remove_file(path).ok();
    }

    #[test]
    fn file_is_read_once() {
        let path = write_csv("memo", FULL_CSV);
        let loader = DataLoader::new(&path);
        for _ in 0..3 {
            loader.load().unwrap();
        }
        assert_eq!(loader.load_count(), 1);
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_a_load_error_and_is_cached() {
        let loader = DataLoader::new("no/such/life_expectancy.csv");
        let err = loader.load().unwrap_err();
        assert!(matches!(err, DashboardError::DataLoad { .. }));
        assert!(err.to_string().contains("file not found"));

        assert_eq!(loader.load().unwrap_err(), err);
        assert_eq!(loader.load_count(), 1);
    }

    #[test]
    fn missing_prediction_column_still_loads() {
        let path = write_csv(
            "no_prediction",
            "Country,Male_Life_Expectancy,Female_Life_Expectancy,Life_Expectancy_Both\n\
             Chile,78.0,83.0,80.5\n",
        );
        let loader = DataLoader::new(&path);
        let dataset = loader.load().unwrap();

        assert!(dataset.gap_frame().is_ok());
        assert!(dataset.frame().column(BOTH).is_ok());
        assert_eq!(
            DataProcessor::numeric_column(dataset.frame(), PREDICTED).unwrap_err(),
            DashboardError::missing_column(PREDICTED)
        );
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_value_markers_drop_only_that_cell() {
        let csv = format!(
            "{HEADER}\
             Japan,81.5,87.6,84.6,84.5\n\
             Chad,NA,54.9,53.0,53.1\n\
             Qatar,79.0,N/A,79.3,\n"
        );
        let path = write_csv("markers", &csv);
        let loader = DataLoader::new(&path);
        let dataset = loader.load().unwrap();

        let male = DataProcessor::numeric_column(dataset.frame(), MALE).unwrap();
        assert_eq!(male, vec![Some(81.5), None, Some(79.0)]);
        let predicted = DataProcessor::numeric_column(dataset.frame(), PREDICTED).unwrap();
        assert_eq!(predicted, vec![Some(84.5), Some(53.1), None]);

        let gap = DataProcessor::numeric_column(dataset.gap_frame().unwrap(), GAP).unwrap();
        assert!(gap[0].is_some());
        assert_eq!(&gap[1..], &[None, None]);
        fs::remove_file(path).ok();
    }

    #[test]
    fn header_only_file_keeps_numeric_columns() {
        let path = write_csv("header_only", HEADER);
        let loader = DataLoader::new(&path);
        let dataset = loader.load().unwrap();

        assert_eq!(dataset.row_count(), 0);
        assert_eq!(dataset.frame().column(BOTH).unwrap().dtype(), &DataType::Float64);
        assert_eq!(dataset.frame().column(COUNTRY).unwrap().dtype(), &DataType::String);
        assert!(DataProcessor::numeric_column(dataset.gap_frame().unwrap(), GAP)
            .unwrap()
            .is_empty());
        fs::remove_file(path).ok();
    }
}
