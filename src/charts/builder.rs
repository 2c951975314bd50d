//! View builders.
//! Pure functions from the country table to chart descriptions.

use crate::charts::colors::{palette_color, POINT_COLOR, REFERENCE_RED, VIRIDIS};
use crate::charts::geo::Gazetteer;
use crate::charts::outlines::WorldOutlines;
use crate::charts::model::{
    Bar, BarChart, ChoroplethChart, DualBarChart, LabeledPoint, MapRegion, ReferenceLine,
    ScatterChart,
};
use crate::data::columns::{BOTH, FEMALE, MALE, PREDICTED};
use crate::data::{DataProcessor, GapRanking, RankedCountry};
use crate::error::{DashboardError, Result};
use polars::prelude::DataFrame;

/// Builds the four dashboard charts.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Male vs. female life expectancy, one point per country.
    pub fn gender_scatter(df: &DataFrame) -> Result<ScatterChart> {
        Ok(ScatterChart {
            title: "Life Expectancy: Men vs Women".to_string(),
            x_label: "Male Life Expectancy".to_string(),
            y_label: "Female Life Expectancy".to_string(),
            points: Self::labeled_points(df, MALE, FEMALE, "gender scatter")?,
            point_color: POINT_COLOR,
            reference_line: None,
        })
    }

    /// Countries colored by overall life expectancy.
    ///
    /// The color scale spans the rows passed in, so a filtered table gets its
    /// own range.
    pub fn choropleth(df: &DataFrame) -> Result<ChoroplethChart> {
        let countries = DataProcessor::country_column(df)?;
        let values = DataProcessor::numeric_column(df, BOTH)?;
        let gazetteer = Gazetteer::builtin();
        let outlines = WorldOutlines::builtin();

        let mut located = Vec::new();
        let mut unresolved = Vec::new();
        for (country, value) in countries.into_iter().zip(values) {
            let (Some(country), Some(value)) = (country, value) else {
                continue;
            };
            match gazetteer.resolve(&country) {
                Some(point) => located.push((country, value, point)),
                None => unresolved.push(country),
            }
        }

        if located.is_empty() {
            return Err(DashboardError::render(
                "choropleth map",
                "no country in the selection has a known location and a value",
            ));
        }

        let min = located.iter().map(|(_, v, _)| *v).fold(f64::INFINITY, f64::min);
        let max = located
            .iter()
            .map(|(_, v, _)| *v)
            .fold(f64::NEG_INFINITY, f64::max);

        let regions = located
            .into_iter()
            .map(|(country, value, point)| MapRegion {
                shape: outlines.shape(&country),
                country,
                value,
                latitude: point.latitude,
                longitude: point.longitude,
                color: VIRIDIS.map(value, min, max),
            })
            .collect();

        Ok(ChoroplethChart {
            title: "Life Expectancy by Country".to_string(),
            value_label: BOTH.to_string(),
            regions,
            unresolved,
            scale: VIRIDIS,
            value_range: (min, max),
        })
    }

    /// Rank the table by gap and chart both ends.
    pub fn gap_ranking(df: &DataFrame, n: usize) -> Result<DualBarChart> {
        let ranking = DataProcessor::rank_by_gap(df, n)?;
        Ok(Self::gap_bars(&ranking))
    }

    /// Side-by-side bars: largest gaps descending, smallest gaps ascending.
    pub fn gap_bars(ranking: &GapRanking) -> DualBarChart {
        let bars = |rows: &[RankedCountry]| -> Vec<Bar> {
            rows.iter()
                .enumerate()
                .map(|(i, row)| Bar {
                    label: row.country.clone(),
                    value: row.gap,
                    color: palette_color(i),
                })
                .collect()
        };

        DualBarChart {
            left: BarChart {
                title: "🔺 Countries with the Largest Gap".to_string(),
                bars: bars(&ranking.largest),
            },
            right: BarChart {
                title: "🔻 Countries with the Smallest Gap".to_string(),
                bars: bars(&ranking.smallest),
            },
            value_label: "Life Expectancy Gap (years)".to_string(),
        }
    }

    /// Actual vs. predicted life expectancy with the line of perfect prediction.
    pub fn prediction_scatter(df: &DataFrame) -> Result<ScatterChart> {
        Ok(ScatterChart {
            title: "Actual vs Predicted Values".to_string(),
            x_label: "Actual Life Expectancy".to_string(),
            y_label: "Life Expectancy Predicted by the Model".to_string(),
            points: Self::labeled_points(df, BOTH, PREDICTED, "prediction scatter")?,
            point_color: POINT_COLOR,
            reference_line: Some(ReferenceLine {
                slope: 1.0,
                intercept: 0.0,
                label: "Perfect prediction".to_string(),
                color: REFERENCE_RED,
                dashed: true,
            }),
        })
    }

    /// Country-labeled (x, y) pairs, skipping rows with a missing value.
    fn labeled_points(
        df: &DataFrame,
        x_col: &str,
        y_col: &str,
        chart: &str,
    ) -> Result<Vec<LabeledPoint>> {
        let countries = DataProcessor::country_column(df)?;
        let xs = DataProcessor::numeric_column(df, x_col)?;
        let ys = DataProcessor::numeric_column(df, y_col)?;

        let points: Vec<LabeledPoint> = countries
            .into_iter()
            .zip(xs)
            .zip(ys)
            .filter_map(|((label, x), y)| {
                Some(LabeledPoint {
                    label: label?,
                    x: x?,
                    y: y?,
                })
            })
            .collect();

        if points.is_empty() {
            return Err(DashboardError::render(
                chart,
                format!("no rows with both {x_col} and {y_col}"),
            ));
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::{COUNTRY, GAP};
    use crate::data::CountryFilter;
    use polars::prelude::*;

    fn sample() -> DataFrame {
        let df = df!(
            COUNTRY => ["Japan", "Russia", "Qatar", "Atlantis"],
            MALE => [81.5, 66.9, 79.0, 70.0],
            FEMALE => [87.6, 77.6, 80.1, 71.0],
            BOTH => [Some(84.6), Some(72.3), Some(79.3), Some(70.5)],
            PREDICTED => [Some(84.5), None, Some(79.4), Some(70.6)],
        )
        .unwrap();
        DataProcessor::with_life_expectancy_gap(&df).unwrap()
    }

    #[test]
    fn gender_scatter_has_a_labeled_point_per_country() {
        let chart = ChartBuilder::gender_scatter(&sample()).unwrap();
        let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Japan", "Russia", "Qatar", "Atlantis"]);
        assert_eq!((chart.points[1].x, chart.points[1].y), (66.9, 77.6));
        assert!(chart.reference_line.is_none());
    }

    #[test]
    fn prediction_scatter_skips_missing_predictions_and_adds_diagonal() {
        let chart = ChartBuilder::prediction_scatter(&sample()).unwrap();
        assert_eq!(chart.points.len(), 3);
        assert!(chart.points.iter().all(|p| p.label != "Russia"));

        let line = chart.reference_line.unwrap();
        assert_eq!(line.y_at(0.0), 0.0);
        assert_eq!(line.y_at(73.0), 73.0);
    }

    #[test]
    fn prediction_scatter_without_prediction_column_is_a_schema_error() {
        let df = sample().drop(PREDICTED).unwrap();
        let err = ChartBuilder::prediction_scatter(&df).unwrap_err();
        assert_eq!(err, DashboardError::missing_column(PREDICTED));
    }

    #[test]
    fn scatter_of_empty_table_is_a_render_error() {
        let empty = sample().head(Some(0));
        assert!(matches!(
            ChartBuilder::gender_scatter(&empty),
            Err(DashboardError::Render { .. })
        ));
    }

    #[test]
    fn choropleth_places_known_countries_and_reports_the_rest() {
        let chart = ChartBuilder::choropleth(&sample()).unwrap();
        let names: Vec<&str> = chart.regions.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Japan", "Russia", "Qatar"]);
        assert_eq!(chart.unresolved, vec!["Atlantis"]);
        assert_eq!(chart.value_range, (72.3, 84.6));
        assert_eq!(chart.regions[0].color, VIRIDIS.sample(1.0));
        assert_eq!(chart.regions[1].color, VIRIDIS.sample(0.0));
    }

    #[test]
    fn choropleth_regions_carry_country_outlines() {
        let chart = ChartBuilder::choropleth(&sample()).unwrap();
        assert!(chart.regions.iter().all(|r| r.shape.is_some()));

        // Central Honshu, then open sea
        let hit = chart.region_at(138.5, 36.5).map(|r| r.country.as_str());
        assert_eq!(hit, Some("Japan"));
        assert!(chart.region_at(-30.0, 0.0).is_none());
    }

    #[test]
    fn choropleth_renders_a_filtered_subset() {
        let filter = CountryFilter::from_selection(["Qatar"]);
        let subset = DataProcessor::filter_countries(&sample(), &filter).unwrap();
        let chart = ChartBuilder::choropleth(&subset).unwrap();
        assert_eq!(chart.regions.len(), 1);
        assert_eq!(chart.regions[0].country, "Qatar");
        assert_eq!(chart.regions[0].color, VIRIDIS.sample(0.5));
    }

    #[test]
    fn choropleth_with_nothing_to_place_is_a_render_error() {
        let filter = CountryFilter::from_selection(["Atlantis"]);
        let subset = DataProcessor::filter_countries(&sample(), &filter).unwrap();
        assert!(matches!(
            ChartBuilder::choropleth(&subset),
            Err(DashboardError::Render { .. })
        ));
    }

    #[test]
    fn gap_bars_follow_ranking_order() {
        let chart = ChartBuilder::gap_ranking(&sample(), 2).unwrap();
        let left: Vec<&str> = chart.left.bars.iter().map(|b| b.label.as_str()).collect();
        let right: Vec<&str> = chart.right.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(left, vec!["Russia", "Japan"]);
        assert_eq!(right, vec!["Atlantis", "Qatar"]);
        assert!(chart.left.bars[0].value > chart.left.bars[1].value);
    }

    #[test]
    fn gap_ranking_needs_gap_column() {
        let df = sample().drop(GAP).unwrap();
        assert_eq!(
            ChartBuilder::gap_ranking(&df, 10).unwrap_err(),
            DashboardError::missing_column(GAP)
        );
    }

    #[test]
    fn builders_leave_the_table_untouched() {
        let df = sample();
        let before = df.clone();
        ChartBuilder::gender_scatter(&df).unwrap();
        ChartBuilder::choropleth(&df).unwrap();
        ChartBuilder::gap_ranking(&df, 10).unwrap();
        ChartBuilder::prediction_scatter(&df).unwrap();
        assert!(df.equals_missing(&before));
    }
}
