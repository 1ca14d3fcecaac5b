use std::sync::Arc;

use async_trait::async_trait;
use catalog_store::{
    bundled_products, Catalog, CatalogError, DatasetSource, LoadSource,
};
use shared::domain::Product;

struct RejectingSource;

#[async_trait]
impl DatasetSource for RejectingSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        Err(CatalogError::Status { status: 500 })
    }

    fn describe(&self) -> String {
        "rejecting source".to_string()
    }
}

#[tokio::test]
async fn rejected_primary_returns_bundled_dataset_unchanged() {
    let catalog = Catalog::new(Arc::new(RejectingSource));
    let loaded = catalog.load().await;
    let bundled = bundled_products().expect("bundled");

    assert_eq!(loaded.len(), 13);
    assert_eq!(loaded.len(), bundled.len());
    for (got, expected) in loaded.iter().zip(&bundled) {
        assert_eq!(got, expected);
        assert_eq!(got.images.len(), expected.images.len());
    }
    assert_eq!(catalog.load_source(), Some(LoadSource::Fallback));

    let wallets = catalog.get_by_category(Some("Wallets")).await;
    let slugs: Vec<_> = wallets.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["executive-bifold-wallet", "mens-leather-wallet-black"]);
}
