//! Page description.
//!
//! `build_page` turns the loaded data and the current widget state into
//! everything the window shows, in display order. It does no drawing, so any
//! front end can present the result.

use crate::charts::{Chart, ChartBuilder};
use crate::config::DEFAULT_RANKING_SIZE;
use crate::data::columns::{BOTH, GAP, PREDICTED};
use crate::data::{CountryFilter, DataProcessor, Dataset};
use crate::error::{DashboardError, Result};
use crate::stats::StatsCalculator;
use tracing::warn;

pub const PAGE_TITLE: &str = "🌍 Dashboard - Global Life Expectancy";

pub const INTRO: &str = "🔍 **What can you explore here?**
- 📊 **Male vs. female life expectancy**
- 🌍 **Interactive world map of life expectancy**
- 📉 **Countries with the largest and smallest gender gap**
- 📈 **Predicted vs. actual life expectancy**";

pub const MULTISELECT_LABEL: &str = "Select specific countries (optional)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    GenderComparison,
    WorldMap,
    GapRanking,
    PredictionAccuracy,
}

/// The country picker shown above the map.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryMultiSelect {
    pub label: String,
    /// Sorted unique countries of the full table
    pub options: Vec<String>,
    pub filter: CountryFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub multiselect: Option<CountryMultiSelect>,
    /// A failed chart only affects its own section
    pub chart: Result<Chart>,
    /// Markdown commentary under the chart
    pub note: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub intro: String,
    pub sections: Vec<Section>,
}

impl Page {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Swap in a rebuilt section, keeping its position.
    pub fn replace_section(&mut self, section: Section) {
        if let Some(slot) = self.sections.iter_mut().find(|s| s.kind == section.kind) {
            *slot = section;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub ranking_size: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            ranking_size: DEFAULT_RANKING_SIZE,
        }
    }
}

/// Build the whole page for the given data and map filter.
pub fn build_page(
    data: &Result<&Dataset>,
    filter: &CountryFilter,
    settings: &PageSettings,
) -> Page {
    Page {
        title: PAGE_TITLE.to_string(),
        intro: INTRO.to_string(),
        sections: vec![
            build_gender_section(data),
            build_map_section(data, filter),
            build_gap_section(data, settings.ranking_size),
            build_prediction_section(data),
        ],
    }
}

pub fn build_gender_section(data: &Result<&Dataset>) -> Section {
    let chart =
        with_dataset(data, |d| ChartBuilder::gender_scatter(d.frame())).map(Chart::Scatter);

    let mut note = String::from(concat!(
        "📌 **Observation:** In practically every country, ",
        "women's life expectancy is higher than men's."
    ));
    let summary = with_dataset(data, |d| DataProcessor::numeric_column(d.gap_frame()?, GAP))
        .ok()
        .and_then(|gaps| StatsCalculator::gap_summary(&gaps));
    if let Some(summary) = summary {
        note.push_str(&format!(
            "\n- Women outlive men in **{} of {}** countries ({:.0}%), \
             by **{:.1} years** on average.",
            summary.female_longer,
            summary.count,
            summary.female_longer_share() * 100.0,
            summary.mean_gap
        ));
    }

    section(
        SectionKind::GenderComparison,
        "📊 Life Expectancy Comparison by Gender",
        None,
        chart,
        note,
    )
}

/// The only section that depends on widget state.
pub fn build_map_section(data: &Result<&Dataset>, filter: &CountryFilter) -> Section {
    let options =
        with_dataset(data, |d| DataProcessor::unique_countries(d.frame())).unwrap_or_default();

    let chart = with_dataset(data, |d| {
        let subset = DataProcessor::filter_countries(d.frame(), filter)?;
        ChartBuilder::choropleth(&subset)
    });
    if let Ok(map) = &chart {
        if !map.unresolved.is_empty() {
            warn!(
                "{} countries have no map location: {}",
                map.unresolved.len(),
                map.unresolved.join(", ")
            );
        }
    }

    section(
        SectionKind::WorldMap,
        "🌍 Global Life Expectancy Map",
        Some(CountryMultiSelect {
            label: MULTISELECT_LABEL.to_string(),
            options,
            filter: filter.clone(),
        }),
        chart.map(Chart::Choropleth),
        concat!(
            "📌 **Did you know?** Countries such as Japan and Switzerland have the highest ",
            "life expectancy, while African countries show lower values."
        )
        .to_string(),
    )
}

pub fn build_gap_section(data: &Result<&Dataset>, ranking_size: usize) -> Section {
    let chart = with_dataset(data, |d| ChartBuilder::gap_ranking(d.gap_frame()?, ranking_size))
        .map(Chart::DualBar);

    section(
        SectionKind::GapRanking,
        &format!(
            "📉 Top {ranking_size} Countries with the Largest and Smallest Life Expectancy Gap"
        ),
        None,
        chart,
        concat!(
            "📌 **What does this mean?**",
            "\n- 🔺 **Countries such as Russia and Ukraine show the largest gaps**, probably ",
            "because of smoking, alcohol consumption and male working conditions.",
            "\n- 🔻 **Arab countries such as Qatar and the United Arab Emirates show minimal ",
            "gaps**, possibly because of more balanced lifestyles."
        )
        .to_string(),
    )
}

pub fn build_prediction_section(data: &Result<&Dataset>) -> Section {
    let chart =
        with_dataset(data, |d| ChartBuilder::prediction_scatter(d.frame())).map(Chart::Scatter);

    let mut note = String::from("📌 **Machine learning model results**");
    let accuracy = with_dataset(data, |d| {
        let actual = DataProcessor::numeric_column(d.frame(), BOTH)?;
        let predicted = DataProcessor::numeric_column(d.frame(), PREDICTED)?;
        Ok(StatsCalculator::prediction_accuracy(&actual, &predicted))
    })
    .ok()
    .flatten();
    if let Some(accuracy) = accuracy {
        // Undefined when every actual value is the same
        if accuracy.r_squared.is_finite() {
            note.push_str(&format!(
                "\n- ✅ **Accuracy:** the model reaches an **R² of {:.2}%** over {} countries, \
                 so it predicts life expectancy very closely.",
                accuracy.r_squared * 100.0,
                accuracy.count
            ));
        }
        note.push_str(&format!(
            "\n- ✅ **Error:** mean absolute error of **{:.2} years**, \
             mean bias of **{:+.2} years**.",
            accuracy.mean_absolute_error, accuracy.mean_bias
        ));
    }
    note.push_str(concat!(
        "\n- ✅ **Conclusion:** a country's overall life expectancy **is practically a ",
        "weighted average of male and female life expectancy**."
    ));

    section(
        SectionKind::PredictionAccuracy,
        "📈 Comparison: Actual vs Model Life Expectancy",
        None,
        chart,
        note,
    )
}

fn with_dataset<T>(
    data: &Result<&Dataset>,
    f: impl FnOnce(&Dataset) -> Result<T>,
) -> Result<T> {
    match data {
        Ok(dataset) => f(dataset),
        Err(err) => Err(err.clone()),
    }
}

fn section(
    kind: SectionKind,
    title: &str,
    multiselect: Option<CountryMultiSelect>,
    chart: Result<Chart>,
    note: String,
) -> Section {
    if let Err(err) = &chart {
        warn!("Section '{}' failed: {}", title, err);
    }

    Section {
        kind,
        title: title.to_string(),
        multiselect,
        chart,
        note,
    }
}

/// True if every section failed with the same load error.
pub fn is_load_failure(page: &Page) -> bool {
    page.sections
        .iter()
        .all(|s| matches!(s.chart, Err(DashboardError::DataLoad { .. })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::{COUNTRY, FEMALE, MALE};
    use polars::prelude::*;

    fn dataset(with_prediction: bool) -> Dataset {
        let mut df = df!(
            COUNTRY => ["Chile", "Peru"],
            MALE => [70.0, 75.0],
            FEMALE => [80.0, 74.0],
            BOTH => [75.0, 74.5],
            PREDICTED => [75.0, 74.5],
        )
        .unwrap();
        if !with_prediction {
            df = df.drop(PREDICTED).unwrap();
        }
        Dataset::prepare(df)
    }

    fn chart_ok(page: &Page, kind: SectionKind) -> bool {
        page.section(kind).is_some_and(|s| s.chart.is_ok())
    }

    #[test]
    fn sections_come_in_fixed_order() {
        let dataset = dataset(true);
        let page = build_page(&Ok(&dataset), &CountryFilter::All, &PageSettings::default());
        let kinds: Vec<SectionKind> = page.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::GenderComparison,
                SectionKind::WorldMap,
                SectionKind::GapRanking,
                SectionKind::PredictionAccuracy
            ]
        );
        assert!(page.sections.iter().all(|s| s.chart.is_ok()));
        assert_eq!(page.title, PAGE_TITLE);
    }

    #[test]
    fn missing_prediction_only_breaks_its_section() {
        let dataset = dataset(false);
        let page = build_page(&Ok(&dataset), &CountryFilter::All, &PageSettings::default());

        let prediction = page.section(SectionKind::PredictionAccuracy).unwrap();
        assert_eq!(
            prediction.chart.as_ref().unwrap_err(),
            &DashboardError::missing_column(PREDICTED)
        );
        assert!(chart_ok(&page, SectionKind::GenderComparison));
        assert!(chart_ok(&page, SectionKind::WorldMap));
        assert!(chart_ok(&page, SectionKind::GapRanking));
    }

    #[test]
    fn load_failure_shows_in_every_section() {
        let err = DashboardError::DataLoad {
            path: "life_expectancy_cleaned.csv".to_string(),
            reason: "file not found".to_string(),
        };
        let page = build_page(&Err(err), &CountryFilter::All, &PageSettings::default());

        assert_eq!(page.sections.len(), 4);
        assert!(is_load_failure(&page));
        let map = page.section(SectionKind::WorldMap).unwrap();
        assert!(map.multiselect.as_ref().unwrap().options.is_empty());
    }

    #[test]
    fn map_section_offers_every_country_and_follows_filter() {
        let dataset = dataset(true);
        let filter = CountryFilter::from_selection(["Peru"]);
        let section = build_map_section(&Ok(&dataset), &filter);

        let multiselect = section.multiselect.unwrap();
        assert_eq!(multiselect.options, vec!["Chile", "Peru"]);
        assert_eq!(multiselect.filter, filter);
        match section.chart.unwrap() {
            Chart::Choropleth(map) => {
                assert_eq!(map.regions.len(), 1);
                assert_eq!(map.regions[0].country, "Peru");
            }
            other => panic!("unexpected chart {other:?}"),
        }
    }

    #[test]
    fn gap_section_title_uses_ranking_size() {
        let dataset = dataset(true);
        let section = build_gap_section(&Ok(&dataset), 5);
        assert!(section.title.contains("Top 5"));
        match section.chart.unwrap() {
            Chart::DualBar(chart) => {
                assert_eq!(chart.left.bars[0].label, "Chile");
                assert_eq!(chart.right.bars[0].label, "Peru");
            }
            other => panic!("unexpected chart {other:?}"),
        }
    }

    #[test]
    fn notes_quote_computed_statistics() {
        let dataset = dataset(true);
        let page = build_page(&Ok(&dataset), &CountryFilter::All, &PageSettings::default());

        let gender = page.section(SectionKind::GenderComparison).unwrap();
        assert!(gender.note.contains("**1 of 2**"));
        let prediction = page.section(SectionKind::PredictionAccuracy).unwrap();
        assert!(prediction.note.contains("R² of 100.00%"));
    }

    #[test]
    fn undefined_r_squared_is_left_out_of_the_note() {
        let df = df!(
            COUNTRY => ["Chile", "Peru"],
            MALE => [70.0, 72.0],
            FEMALE => [80.0, 78.0],
            BOTH => [75.0, 75.0],
            PREDICTED => [74.0, 76.0],
        )
        .unwrap();
        let dataset = Dataset::prepare(df);
        let section = build_prediction_section(&Ok(&dataset));

        assert!(!section.note.contains("NaN"));
        assert!(!section.note.contains("R²"));
        assert!(section.note.contains("mean absolute error of **1.00 years**"));
        assert!(section.note.contains("**Conclusion:**"));
    }

    #[test]
    fn replace_section_keeps_position() {
        let dataset = dataset(true);
        let mut page = build_page(&Ok(&dataset), &CountryFilter::All, &PageSettings::default());
        let filter = CountryFilter::from_selection(["Chile"]);
        page.replace_section(build_map_section(&Ok(&dataset), &filter));

        assert_eq!(page.sections[1].kind, SectionKind::WorldMap);
        assert_eq!(
            page.sections[1].multiselect.as_ref().unwrap().filter,
            filter
        );
    }
}
