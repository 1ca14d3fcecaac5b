//! Screen-scoped state for the storefront: the catalogue listing session,
//! the product gallery, and product-detail assembly.

pub mod catalogue;
pub mod config;
pub mod detail;
pub mod gallery;

pub use catalogue::{CatalogueSession, CATEGORY_QUERY_PARAM, DEFAULT_PAGE_SIZE};
pub use config::{load_settings, Settings};
pub use detail::{
    open_product_detail, open_product_detail_from_query, ProductDetail, ProductPage, RELATED_LIMIT,
    SLUG_QUERY_PARAM,
};
pub use gallery::{GallerySession, Thumbnail};

/// First value of `name` in a URL query string, percent-decoded and trimmed.
/// Blank values count as absent.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
