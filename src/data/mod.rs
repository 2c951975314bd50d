//! Data module - CSV loading, derived columns and row selection

mod dataset;
mod filter;
mod loader;
mod processor;

pub use dataset::Dataset;
pub use filter::CountryFilter;
pub use loader::DataLoader;
pub use processor::{DataProcessor, GapRanking, RankedCountry};

/// CSV headers (case-sensitive) and the derived gap column.
pub mod columns {
    pub const COUNTRY: &str = "Country";
    pub const MALE: &str = "Male_Life_Expectancy";
    pub const FEMALE: &str = "Female_Life_Expectancy";
    pub const BOTH: &str = "Life_Expectancy_Both";
    pub const PREDICTED: &str = "Predicted_Life_Expectancy";
    pub const GAP: &str = "Life_Expectancy_Gap";
}
