//! Charts module - chart descriptions, builders and egui drawing

mod builder;
pub mod colors;
pub mod geo;
pub mod model;
pub mod outlines;
mod plotter;

pub use builder::ChartBuilder;
pub use model::Chart;
pub use plotter::ChartPlotter;
