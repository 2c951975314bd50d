//! Stats module - summary statistics for the section notes

mod calculator;

pub use calculator::StatsCalculator;
