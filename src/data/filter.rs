//! Country selection state for the map section.

use std::collections::BTreeSet;

/// Which countries the map shows.
///
/// An empty multiselect means "show everything", never "show nothing", so the
/// two states are separate variants instead of an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CountryFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl CountryFilter {
    /// Build a filter from the widget's current selection.
    pub fn from_selection<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if selected.is_empty() {
            CountryFilter::All
        } else {
            CountryFilter::Only(selected)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CountryFilter::All)
    }

    pub fn allows(&self, country: &str) -> bool {
        match self {
            CountryFilter::All => true,
            CountryFilter::Only(selected) => selected.contains(country),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_means_no_filter() {
        let filter = CountryFilter::from_selection(Vec::<String>::new());
        assert!(filter.is_all());
        assert!(filter.allows("Anywhere"));
    }

    #[test]
    fn selection_only_allows_named_countries() {
        let filter = CountryFilter::from_selection(["Japan", "Chile", "Japan"]);
        assert!(!filter.is_all());
        assert!(filter.allows("Japan"));
        assert!(!filter.allows("Peru"));
        assert_eq!(filter, CountryFilter::from_selection(["Chile", "Japan"]));
    }
}
