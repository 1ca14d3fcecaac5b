use catalog_store::Catalog;
use shared::domain::{ImageFit, Product};
use tracing::debug;

use crate::{gallery::GallerySession, query_param};

pub const RELATED_LIMIT: usize = 4;
pub const SLUG_QUERY_PARAM: &str = "slug";

const DEFAULT_AVAILABILITY: &str = "Available";

#[derive(Debug, Clone)]
pub enum ProductDetail {
    Found(Box<ProductPage>),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct ProductPage {
    pub product: Product,
    pub gallery: GallerySession,
    pub related: Vec<Product>,
}

impl ProductPage {
    pub fn page_title(&self, site_name: &str) -> String {
        format!("{} — {site_name}", self.product.name)
    }

    pub fn availability(&self) -> &str {
        self.product
            .availability
            .as_deref()
            .unwrap_or(DEFAULT_AVAILABILITY)
    }

    pub fn image_fit(&self) -> ImageFit {
        self.product.image_fit.unwrap_or_default()
    }
}

/// Resolve the product-detail screen for `slug`, with up to `related_limit`
/// products from the same category.
pub async fn open_product_detail(
    catalog: &Catalog,
    slug: &str,
    related_limit: usize,
) -> ProductDetail {
    let slug = slug.trim();
    if slug.is_empty() {
        return ProductDetail::NotFound;
    }

    let Some(product) = catalog.get_by_slug(slug).await else {
        debug!(slug, "product not found");
        return ProductDetail::NotFound;
    };

    let related = catalog.get_related(&product, related_limit).await;
    let gallery = GallerySession::for_product(&product);
    ProductDetail::Found(Box::new(ProductPage {
        product,
        gallery,
        related,
    }))
}

/// Same as [`open_product_detail`], reading the slug from a `?slug=` query.
pub async fn open_product_detail_from_query(
    catalog: &Catalog,
    query: &str,
    related_limit: usize,
) -> ProductDetail {
    match query_param(query, SLUG_QUERY_PARAM) {
        Some(slug) => open_product_detail(catalog, &slug, related_limit).await,
        None => ProductDetail::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_store::bundled_products;

    fn catalog() -> Catalog {
        Catalog::from_products(bundled_products().expect("bundled"))
    }

    #[tokio::test]
    async fn found_product_carries_gallery_and_related() {
        let detail = open_product_detail(&catalog(), "compact-toiletry-case", RELATED_LIMIT).await;
        let ProductDetail::Found(page) = detail else {
            panic!("expected product");
        };
        assert_eq!(page.product.name, "Luxury Toiletries Pouch - Medium");
        assert_eq!(page.gallery.len(), 4);
        assert_eq!(page.gallery.index(), Some(0));
        let related: Vec<_> = page.related.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(related, vec!["heritage-travel-bag", "premium-shaving-kit"]);
        assert_eq!(
            page.page_title("Golden Motif"),
            "Luxury Toiletries Pouch - Medium — Golden Motif"
        );
        assert_eq!(page.availability(), "Available");
        assert_eq!(page.image_fit(), ImageFit::Cover);
    }

    #[tokio::test]
    async fn related_respects_limit() {
        let detail = open_product_detail(&catalog(), "heritage-travel-bag", 1).await;
        let ProductDetail::Found(page) = detail else {
            panic!("expected product");
        };
        assert_eq!(page.related.len(), 1);
        assert_eq!(page.related[0].slug, "premium-shaving-kit");
    }

    #[tokio::test]
    async fn pass_through_fields_are_exposed() {
        let detail = open_product_detail(&catalog(), "wallet-clutch-for-ladies", RELATED_LIMIT).await;
        let ProductDetail::Found(page) = detail else {
            panic!("expected product");
        };
        assert_eq!(page.image_fit(), ImageFit::Contain);

        let detail = open_product_detail(&catalog(), "heritage-leather-jacket", RELATED_LIMIT).await;
        let ProductDetail::Found(page) = detail else {
            panic!("expected product");
        };
        assert_eq!(page.availability(), "Made to order");
        assert!(page.related.is_empty());
    }

    #[tokio::test]
    async fn unknown_or_blank_slug_is_not_found() {
        let catalog = catalog();
        assert!(matches!(
            open_product_detail(&catalog, "no-such-product", RELATED_LIMIT).await,
            ProductDetail::NotFound
        ));
        assert!(matches!(
            open_product_detail(&catalog, "  ", RELATED_LIMIT).await,
            ProductDetail::NotFound
        ));
        assert!(matches!(
            open_product_detail_from_query(&catalog, "?cat=Belts", RELATED_LIMIT).await,
            ProductDetail::NotFound
        ));
    }

    #[tokio::test]
    async fn slug_is_read_from_query() {
        let detail =
            open_product_detail_from_query(&catalog(), "?slug=mens-leather-wallet-black", 4).await;
        let ProductDetail::Found(page) = detail else {
            panic!("expected product");
        };
        assert_eq!(page.gallery.len(), 1);
        assert_eq!(page.related[0].slug, "executive-bifold-wallet");
    }
}
