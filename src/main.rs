//! Life Expectancy Dashboard
//!
//! Loads a per-country life expectancy table and shows it as an interactive
//! page: gender comparison, world map, gender gap ranking and model accuracy.

mod charts;
mod config;
mod dashboard;
mod data;
mod error;
mod gui;
mod page;
mod stats;

use anyhow::anyhow;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use gui::DashboardApp;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title("Global Life Expectancy"),
        ..Default::default()
    };

    eframe::run_native(
        "Global Life Expectancy",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, &config)))),
    )
    .map_err(|e| anyhow!("Window failed: {e}"))
}
