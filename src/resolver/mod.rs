//! Result-set resolution for the storefront.
//!
//! Given the catalog and the current [`FilterState`], [`resolve`] decides which
//! dish lists the storefront shows and how each list is titled. It is a total,
//! pure function: the same inputs always give the same sections in the same
//! order. [`Resolver`] wraps it with a single-entry cache keyed on the filter
//! state so unrelated UI updates do not refilter the catalog.


use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalog, Dish};

pub const POPULAR_TITLE: &str = "Popular Dishes";
pub const ALL_TITLE: &str = "All Dishes";

/// How a search term is checked for emptiness and matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermPolicy {
    /// A blank term disables the search filter. Any other term is matched as typed.
    #[default]
    Trimmed,
    /// The term is used exactly as typed; only `""` disables the search filter.
    Literal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub search_term: String,
    pub category: Option<String>,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            search_term: search_term.into(),
            category: category.map(str::to_string),
        }
    }

    /// The term used for matching, or `None` if no search filter is active.
    /// The policy only decides emptiness; a returned term is never trimmed.
    pub fn active_term(&self, policy: TermPolicy) -> Option<&str> {
        let blank = match policy {
            TermPolicy::Trimmed => self.search_term.trim().is_empty(),
            TermPolicy::Literal => self.search_term.is_empty(),
        };
        (!blank).then_some(self.search_term.as_str())
    }

    /// An empty category string counts as no selection.
    pub fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A search term or category restricts the dishes shown.
    Filtered,
    /// No filter: popular dishes followed by the full catalog.
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub dishes: Vec<Arc<Dish>>,
}

impl Section {
    fn new(title: impl Into<String>, dishes: Vec<Arc<Dish>>) -> Self {
        Self {
            title: title.into(),
            dishes,
        }
    }
}

/// What the storefront renders for one filter state.
///
/// `Filtered` carries exactly one section; `Default` carries the popular
/// section followed by the all-dishes section.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub mode: Mode,
    pub sections: Vec<Section>,
}

impl Resolution {
    /// The single filtered list. `None` in default mode.
    pub fn display_list(&self) -> Option<&Section> {
        match self.mode {
            Mode::Filtered => self.sections.first(),
            Mode::Default => None,
        }
    }

    pub fn popular(&self) -> Option<&Section> {
        match self.mode {
            Mode::Default => self.sections.first(),
            Mode::Filtered => None,
        }
    }

    pub fn all(&self) -> Option<&Section> {
        match self.mode {
            Mode::Default => self.sections.get(1),
            Mode::Filtered => None,
        }
    }

    /// Dishes across all sections, in display order. Default mode lists
    /// popular dishes twice, once per section.
    pub fn dishes(&self) -> impl Iterator<Item = &Arc<Dish>> {
        self.sections.iter().flat_map(|s| s.dishes.iter())
    }
}

pub fn resolve(catalog: &[Arc<Dish>], filter: &FilterState, policy: TermPolicy) -> Resolution {
    let term = filter.active_term(policy);
    let category = filter.active_category();

    let title = match (term, category) {
        (None, None) => return default_resolution(catalog),
        (Some(term), _) => search_title(term),
        (None, Some(category)) => category_title(category),
    };

    Resolution {
        mode: Mode::Filtered,
        sections: vec![Section::new(title, filter_dishes(catalog, term, category))],
    }
}

fn default_resolution(catalog: &[Arc<Dish>]) -> Resolution {
    let popular = catalog.iter().filter(|d| d.is_popular).cloned().collect();
    Resolution {
        mode: Mode::Default,
        sections: vec![
            Section::new(POPULAR_TITLE, popular),
            Section::new(ALL_TITLE, catalog.to_vec()),
        ],
    }
}

/// Stable filter applying the search and category predicates conjunctively.
/// A `None` predicate always passes.
pub fn filter_dishes(
    catalog: &[Arc<Dish>],
    term: Option<&str>,
    category: Option<&str>,
) -> Vec<Arc<Dish>> {
    let needle = term.map(str::to_lowercase);
    let category = category.map(str::to_lowercase);
    catalog
        .iter()
        .filter(|d| needle.as_deref().is_none_or(|n| matches_search(d, n)))
        .filter(|d| category.as_deref().is_none_or(|c| matches_category(d, c)))
        .cloned()
        .collect()
}

/// `needle` must already be lowercased.
pub fn matches_search(dish: &Dish, needle: &str) -> bool {
    [&dish.name, &dish.description, &dish.restaurant]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// `category` must already be lowercased.
pub fn matches_category(dish: &Dish, category: &str) -> bool {
    dish.category.to_lowercase() == category
}

/// Case-insensitive category comparison, folded the same way as [`filter_dishes`].
pub fn same_category(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub fn search_title(term: &str) -> String {
    format!("Search results for \"{term}\"")
}

/// Upper-cases the first character only: `"burgers"` becomes `"Burgers Dishes"`.
pub fn category_title(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{} Dishes", first.to_uppercase(), chars.as_str()),
        None => " Dishes".to_string(),
    }
}

/// Memoizing wrapper around [`resolve`] for one immutable catalog.
#[derive(Debug)]
pub struct Resolver {
    catalog: Arc<Catalog>,
    policy: TermPolicy,
    cache: Option<(FilterState, Resolution)>,
    hits: u64,
    misses: u64,
}

impl Resolver {
    pub fn new(catalog: Arc<Catalog>, policy: TermPolicy) -> Self {
        Self {
            catalog,
            policy,
            cache: None,
            hits: 0,
            misses: 0,
        }
    }

    pub fn resolve(&mut self, filter: &FilterState) -> &Resolution {
        let entry = match self.cache.take() {
            Some((key, resolution)) if key == *filter => {
                self.hits += 1;
                debug!(hits = self.hits, "resolution cache hit");
                (key, resolution)
            }
            _ => {
                self.misses += 1;
                let resolution = resolve(self.catalog.dishes(), filter, self.policy);
                debug!(
                    term = %filter.search_term,
                    category = ?filter.category,
                    mode = ?resolution.mode,
                    shown = resolution.dishes().count(),
                    "resolved dishes"
                );
                (filter.clone(), resolution)
            }
        };
        &self.cache.insert(entry).1
    }

    /// (hits, misses) since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
