//! Country Multiselect Widget
//! Search box, checkbox list and removable chips for the map filter.

use crate::data::CountryFilter;
use crate::page::CountryMultiSelect;
use egui::{Color32, RichText, ScrollArea};

/// Selection state of the country picker. Starts with nothing selected.
#[derive(Default)]
pub struct CountryFilterWidget {
    /// Selected countries in the order they were picked
    selected: Vec<String>,
    query: String,
}

impl CountryFilterWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// The filter the current selection stands for.
    pub fn filter(&self) -> CountryFilter {
        CountryFilter::from_selection(self.selected.iter().cloned())
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, country: &str) -> bool {
        self.selected.iter().any(|c| c == country)
    }

    pub fn toggle(&mut self, country: &str) {
        if let Some(pos) = self.selected.iter().position(|c| c == country) {
            self.selected.remove(pos);
        } else {
            self.selected.push(country.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Add every option matching the search text.
    pub fn select_matching(&mut self, options: &[String]) {
        let matching: Vec<String> = options
            .iter()
            .filter(|o| self.matches(o) && !self.is_selected(o))
            .cloned()
            .collect();
        self.selected.extend(matching);
    }

    fn matches(&self, option: &str) -> bool {
        let query = self.query.trim().to_lowercase();
        query.is_empty() || option.to_lowercase().contains(&query)
    }

    /// Draw the picker. Returns true if the selection changed.
    pub fn show(&mut self, ui: &mut egui::Ui, multiselect: &CountryMultiSelect) -> bool {
        let before = self.selected.clone();

        ui.label(RichText::new(&multiselect.label).size(13.0));
        ui.add_space(4.0);

        // Chips for the current selection
        ui.horizontal_wrapped(|ui| {
            if self.selected.is_empty() {
                ui.label(
                    RichText::new("No countries selected: showing all")
                        .size(12.0)
                        .color(Color32::GRAY),
                );
            }
            let mut removed = None;
            for country in self.selected() {
                if ui
                    .small_button(format!("{country} ✕"))
                    .on_hover_text("Remove")
                    .clicked()
                {
                    removed = Some(country.clone());
                }
            }
            if let Some(country) = removed {
                self.toggle(&country);
            }
        });

        ui.add_space(4.0);

        egui::CollapsingHeader::new("Choose countries")
            .id_salt("country_multiselect")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .hint_text("Search…")
                            .desired_width(200.0),
                    );
                    if ui.small_button("Select all").clicked() {
                        self.select_matching(&multiselect.options);
                    }
                    if ui.small_button("Clear").clicked() {
                        self.clear();
                    }
                });

                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(5.0)
                    .inner_margin(5.0)
                    .show(ui, |ui| {
                        ScrollArea::vertical().max_height(180.0).show(ui, |ui| {
                            for option in &multiselect.options {
                                if !self.matches(option) {
                                    continue;
                                }
                                let mut checked = self.is_selected(option);
                                if ui.checkbox(&mut checked, option).changed() {
                                    self.toggle(option);
                                }
                            }
                        });
                    });
            });

        self.selected != before
    }
}
