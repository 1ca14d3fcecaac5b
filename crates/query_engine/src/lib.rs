//! Stateless catalogue queries over a loaded product snapshot.
//!
//! Every function takes a slice and returns a new sequence; inputs are never
//! reordered in place. The element type is anything that borrows as a
//! [`Product`], so callers can run the same pipeline over owned products or
//! over references into a shared snapshot.

use std::{borrow::Borrow, cmp::Reverse, collections::BTreeSet};

use shared::domain::{Product, SortKey};

mod collation;

pub use collation::locale_cmp;

/// Keep products whose category equals `category` exactly. `None` means no
/// filter and returns the input unchanged.
pub fn filter_by_category<T>(products: &[T], category: Option<&str>) -> Vec<T>
where
    T: Borrow<Product> + Clone,
{
    match category {
        None => products.to_vec(),
        Some(category) => products
            .iter()
            .filter(|p| (*p).borrow().category == category)
            .cloned()
            .collect(),
    }
}

/// Case-insensitive substring search over name, category and tags.
/// A blank term is no filter.
pub fn search<T>(term: &str, products: &[T]) -> Vec<T>
where
    T: Borrow<Product> + Clone,
{
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|p| matches_term((*p).borrow(), &needle))
        .cloned()
        .collect()
}

/// `needle` must already be trimmed and lowercased.
pub fn matches_term(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Stable ordering by `key`.
pub fn sort<T>(products: &[T], key: SortKey) -> Vec<T>
where
    T: Borrow<Product> + Clone,
{
    let mut sorted = products.to_vec();
    match key {
        SortKey::Featured => sorted.sort_by_key(|p| !p.borrow().featured),
        // Undated entries go last.
        SortKey::Newest => sorted.sort_by_cached_key(|p| {
            let created = p.borrow().created_at_utc();
            (created.is_none(), Reverse(created))
        }),
        SortKey::NameAsc => sorted.sort_by(|a, b| locale_cmp(&a.borrow().name, &b.borrow().name)),
    }
    sorted
}

/// Up to `limit` other products in the same category, in dataset order.
pub fn relate<'a, T>(product: &Product, products: &'a [T], limit: usize) -> Vec<&'a T>
where
    T: Borrow<Product>,
{
    products
        .iter()
        .filter(|candidate| {
            let candidate = (*candidate).borrow();
            candidate.category == product.category && candidate.id != product.id
        })
        .take(limit)
        .collect()
}

/// The accumulated "load more" window: the first `page * page_size` items.
/// Page 0 is treated as page 1.
pub fn paginate<T>(sorted: &[T], page: u32, page_size: usize) -> &[T] {
    let end = window_len(page, page_size).min(sorted.len());
    &sorted[..end]
}

/// Whether items remain beyond the current window.
pub fn has_more(total: usize, page: u32, page_size: usize) -> bool {
    window_len(page, page_size) < total
}

fn window_len(page: u32, page_size: usize) -> usize {
    (page.max(1) as usize).saturating_mul(page_size)
}

/// Distinct categories, sorted, without duplicates.
pub fn distinct_categories<T>(products: &[T]) -> Vec<String>
where
    T: Borrow<Product>,
{
    products
        .iter()
        .map(|p| p.borrow().category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn featured<T>(products: &[T]) -> Vec<T>
where
    T: Borrow<Product> + Clone,
{
    products
        .iter()
        .filter(|p| (*p).borrow().featured)
        .cloned()
        .collect()
}

/// The full listing pipeline: category filter, then search, then sort.
pub fn filter_search_sort<T>(
    products: &[T],
    category: Option<&str>,
    term: &str,
    key: SortKey,
) -> Vec<T>
where
    T: Borrow<Product> + Clone,
{
    let filtered = search(term, &filter_by_category(products, category));
    sort(&filtered, key)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
