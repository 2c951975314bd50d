//! Page View
//! Lays out a built page top to bottom: title, intro, then each section.

use crate::charts::ChartPlotter;
use crate::gui::country_filter::CountryFilterWidget;
use crate::gui::markdown;
use crate::page::{Page, Section};
use egui::RichText;

pub struct PageView;

impl PageView {
    /// Draw the page. Returns true if the country selection changed.
    pub fn show(ui: &mut egui::Ui, page: &Page, country_filter: &mut CountryFilterWidget) -> bool {
        ui.add_space(8.0);
        ui.label(RichText::new(&page.title).size(26.0).strong());
        ui.add_space(8.0);
        markdown::show(ui, &page.intro, 14.0);

        let mut changed = false;
        for (index, section) in page.sections.iter().enumerate() {
            ui.add_space(12.0);
            ui.separator();
            ui.add_space(6.0);
            changed |= Self::show_section(ui, index, section, country_filter);
        }
        ui.add_space(16.0);

        changed
    }

    fn show_section(
        ui: &mut egui::Ui,
        index: usize,
        section: &Section,
        country_filter: &mut CountryFilterWidget,
    ) -> bool {
        ui.label(RichText::new(&section.title).size(20.0).strong());
        ui.add_space(6.0);

        let mut changed = false;
        if let Some(multiselect) = &section.multiselect {
            changed = country_filter.show(ui, multiselect);
            ui.add_space(6.0);
        }

        match &section.chart {
            Ok(chart) => ChartPlotter::draw(ui, &format!("section_{index}"), chart),
            Err(err) => ChartPlotter::draw_error(ui, err),
        }

        ui.add_space(6.0);
        markdown::show(ui, &section.note, 13.0);

        changed
    }
}
