//! Chart descriptions produced by the view builders.
//! They carry data and styling only; drawing them is up to the front end.

use crate::charts::colors::{ColorScale, Rgb};
use crate::charts::outlines::CountryShape;

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoint {
    /// Shown on hover
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Infinite straight line `y = slope * x + intercept`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub slope: f64,
    pub intercept: f64,
    pub label: String,
    pub color: Rgb,
    pub dashed: bool,
}

impl ReferenceLine {
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<LabeledPoint>,
    pub point_color: Rgb,
    pub reference_line: Option<ReferenceLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapRegion {
    pub country: String,
    pub value: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub color: Rgb,
    /// Outline to fill; drawn as a marker at the centroid when missing
    pub shape: Option<&'static CountryShape>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethChart {
    pub title: String,
    pub value_label: String,
    pub regions: Vec<MapRegion>,
    /// Countries with a value but no known location
    pub unresolved: Vec<String>,
    pub scale: ColorScale,
    pub value_range: (f64, f64),
}

impl ChoroplethChart {
    /// The region whose outline covers a map position.
    pub fn region_at(&self, longitude: f64, latitude: f64) -> Option<&MapRegion> {
        self.regions.iter().find(|region| {
            region
                .shape
                .is_some_and(|shape| shape.contains(longitude, latitude))
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

/// Horizontal bars, drawn top to bottom in `bars` order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DualBarChart {
    pub left: BarChart,
    pub right: BarChart,
    pub value_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Scatter(ScatterChart),
    Choropleth(ChoroplethChart),
    DualBar(DualBarChart),
}
