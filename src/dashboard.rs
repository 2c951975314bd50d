//! Memoized page rendering.
//!
//! The front end calls `render` on every frame with the current filter. The
//! page is built once; afterwards only a changed filter does any work, and it
//! rebuilds the map section alone.

use crate::data::{CountryFilter, DataLoader};
use crate::page::{build_map_section, build_page, Page, PageSettings};
use tracing::{debug, info};

/// How much work rendering has done so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderCounters {
    /// File reads by the loader
    pub loads: usize,
    pub page_builds: usize,
    pub map_builds: usize,
}

pub struct Dashboard {
    loader: DataLoader,
    settings: PageSettings,
    page: Option<Page>,
    filter: CountryFilter,
    page_builds: usize,
    map_builds: usize,
}

impl Dashboard {
    pub fn new(loader: DataLoader, settings: PageSettings) -> Self {
        Self {
            loader,
            settings,
            page: None,
            filter: CountryFilter::All,
            page_builds: 0,
            map_builds: 0,
        }
    }

    /// The page for `filter`, rebuilding only what the filter affects.
    pub fn render(&mut self, filter: &CountryFilter) -> &Page {
        let data = self.loader.load();

        let mut built = false;
        let page = self.page.get_or_insert_with(|| {
            built = true;
            info!("Building dashboard page from {}", self.loader.path().display());
            build_page(&data, filter, &self.settings)
        });

        if built {
            self.page_builds += 1;
            self.filter = filter.clone();
        } else if self.filter != *filter {
            debug!("Country filter changed, rebuilding map: {:?}", filter);
            page.replace_section(build_map_section(&data, filter));
            self.map_builds += 1;
            self.filter = filter.clone();
        }

        page
    }

    pub fn data_path(&self) -> &std::path::Path {
        self.loader.path()
    }

    /// Rows in the loaded table, `None` if loading failed.
    pub fn row_count(&self) -> Option<usize> {
        self.loader.load().ok().map(|d| d.row_count())
    }

    pub fn counters(&self) -> RenderCounters {
        RenderCounters {
            loads: self.loader.load_count(),
            page_builds: self.page_builds,
            map_builds: self.map_builds,
        }
    }
}
