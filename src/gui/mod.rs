//! GUI module - User interface components

mod app;
mod country_filter;
mod markdown;
mod page_view;

pub use app::DashboardApp;
