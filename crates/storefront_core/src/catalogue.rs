use std::sync::Arc;

use shared::{
    domain::{Product, SortKey},
    protocol::{CatalogueView, CategoryChip, ListingStatus, ALL_CATEGORIES_LABEL},
};
use tracing::debug;
use url::Url;

use crate::query_param;

pub const DEFAULT_PAGE_SIZE: usize = 8;
/// Query parameter that seeds the active category on the listing screen.
pub const CATEGORY_QUERY_PARAM: &str = "cat";

/// View state for one listing screen.
///
/// Every mutator changes one field, recomputes the filtered and sorted set,
/// and returns the fresh [`CatalogueView`]. Category, search and sort changes
/// restart pagination at page 1; `next_page` grows the visible window.
#[derive(Debug, Clone)]
pub struct CatalogueSession {
    products: Option<Arc<[Product]>>,
    categories: Vec<String>,
    sorted: Vec<Product>,
    active_category: Option<String>,
    search_term: String,
    sort_key: SortKey,
    page: u32,
    page_size: usize,
}

impl Default for CatalogueSession {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogueSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            products: None,
            categories: Vec::new(),
            sorted: Vec::new(),
            active_category: None,
            search_term: String::new(),
            sort_key: SortKey::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Seed the active category from a listing URL query string (`?cat=...`).
    pub fn from_query(query: &str, page_size: usize) -> Self {
        let mut session = Self::new(page_size);
        session.active_category = query_param(query, CATEGORY_QUERY_PARAM);
        session
    }

    pub fn from_url(url: &Url, page_size: usize) -> Self {
        Self::from_query(url.query().unwrap_or_default(), page_size)
    }

    /// Supply the loaded dataset. State chosen before the load is kept.
    pub fn attach(&mut self, products: Arc<[Product]>) -> CatalogueView {
        self.categories = query_engine::distinct_categories(&products);
        self.products = Some(products);
        self.recompute();
        self.view()
    }

    pub fn set_category(&mut self, category: Option<String>) -> CatalogueView {
        debug!(?category, "catalogue: set category");
        self.active_category = category;
        self.page = 1;
        self.recompute();
        self.view()
    }

    /// Callers are expected to debounce keystrokes; each call applies immediately.
    pub fn set_search(&mut self, term: &str) -> CatalogueView {
        debug!(term, "catalogue: set search");
        self.search_term = term.to_string();
        self.page = 1;
        self.recompute();
        self.view()
    }

    pub fn set_sort(&mut self, sort_key: SortKey) -> CatalogueView {
        debug!(%sort_key, "catalogue: set sort");
        self.sort_key = sort_key;
        self.page = 1;
        self.recompute();
        self.view()
    }

    /// Extend the visible window by one page. The window is clamped to the
    /// match count, so paging past the end leaves the visible slice as is.
    pub fn next_page(&mut self) -> CatalogueView {
        self.page = self.page.saturating_add(1);
        debug!(page = self.page, "catalogue: load more");
        self.view()
    }

    pub fn view(&self) -> CatalogueView {
        let status = match &self.products {
            None => ListingStatus::NotLoaded,
            Some(_) if self.sorted.is_empty() => ListingStatus::Empty,
            Some(_) => ListingStatus::Results,
        };

        CatalogueView {
            status,
            visible: self.visible().to_vec(),
            total_count: self.sorted.len(),
            has_more: self.has_more(),
            chips: self.chips(),
            active_category: self.active_category.clone(),
            search_term: self.search_term.clone(),
            sort_key: self.sort_key,
            page: self.page,
        }
    }

    pub fn visible(&self) -> &[Product] {
        query_engine::paginate(&self.sorted, self.page, self.page_size)
    }

    pub fn has_more(&self) -> bool {
        query_engine::has_more(self.sorted.len(), self.page, self.page_size)
    }

    pub fn is_loaded(&self) -> bool {
        self.products.is_some()
    }

    pub fn total_count(&self) -> usize {
        self.sorted.len()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn recompute(&mut self) {
        let Some(products) = &self.products else {
            return;
        };
        self.sorted = query_engine::filter_search_sort(
            products,
            self.active_category.as_deref(),
            &self.search_term,
            self.sort_key,
        );
    }

    fn chips(&self) -> Vec<CategoryChip> {
        let all = CategoryChip {
            label: ALL_CATEGORIES_LABEL.to_string(),
            category: None,
            active: self.active_category.is_none(),
        };
        std::iter::once(all)
            .chain(self.categories.iter().map(|category| CategoryChip {
                label: category.clone(),
                category: Some(category.clone()),
                active: self.active_category.as_deref() == Some(category.as_str()),
            }))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/catalogue_tests.rs"]
mod tests;
