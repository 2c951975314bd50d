//! Dashboard Main Application
//! Scrollable page with a status bar.

use crate::charts::Chart;
use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::data::{CountryFilter, DataLoader};
use crate::gui::country_filter::CountryFilterWidget;
use crate::gui::page_view::PageView;
use crate::page::{is_load_failure, PageSettings, SectionKind};
use egui::{Color32, RichText, TopBottomPanel};
use tracing::info;

/// Main application window.
pub struct DashboardApp {
    dashboard: Dashboard,
    country_filter: CountryFilterWidget,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &DashboardConfig) -> Self {
        info!("Dashboard data source: {}", config.data_path.display());
        let settings = PageSettings {
            ranking_size: config.ranking_size,
        };

        Self {
            dashboard: Dashboard::new(DataLoader::new(&config.data_path), settings),
            country_filter: CountryFilterWidget::new(),
        }
    }

    fn show_status_bar(&mut self, ui: &mut egui::Ui, filter: &CountryFilter) {
        // Counters are read after this frame's render
        let page = self.dashboard.render(filter);
        let failed = is_load_failure(page);
        let on_map = page
            .section(SectionKind::WorldMap)
            .and_then(|s| s.chart.as_ref().ok())
            .and_then(|chart| match chart {
                Chart::Choropleth(map) => Some(map.regions.len()),
                _ => None,
            });

        let counters = self.dashboard.counters();
        let rows = self.dashboard.row_count();
        let path = self.dashboard.data_path().display().to_string();

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("📁 {path}")).size(11.0));
            ui.separator();
            match rows {
                Some(rows) if !failed => {
                    ui.label(RichText::new(format!("{rows} countries")).size(11.0));
                }
                _ => {
                    ui.label(
                        RichText::new("no data")
                            .size(11.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                }
            }
            if let Some(on_map) = on_map {
                ui.separator();
                ui.label(RichText::new(format!("{on_map} on map")).size(11.0));
            }
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "file reads: {} · page builds: {} · map rebuilds: {}",
                    counters.loads, counters.page_builds, counters.map_builds
                ))
                .size(11.0)
                .color(Color32::GRAY),
            );
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Builds once, then only the map when the filter moves
        let filter = self.country_filter.filter();

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.show_status_bar(ui, &filter);
        });

        let mut changed = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let page = self.dashboard.render(&filter);
                    changed = PageView::show(ui, page, &mut self.country_filter);
                });
        });

        if changed {
            ctx.request_repaint();
        }
    }
}
