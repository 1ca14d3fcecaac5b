//! Catalog repository: loads the product dataset once per lifetime, with a
//! bundled fallback, and answers read-only lookups over the loaded set.

use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::Product;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

pub mod error;
pub mod source;

pub use error::CatalogError;
pub use source::{
    bundled_products, decode_products, DatasetSource, FileDatasetSource, HttpDatasetSource,
    DATASET_PATH,
};

/// Which source ended up serving the loaded set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Primary,
    Fallback,
    /// Both sources failed; the set is empty.
    Unavailable,
}

#[derive(Debug)]
struct LoadedCatalog {
    products: Arc<[Product]>,
    source: LoadSource,
}

/// Serves the bundled copy of the dataset.
pub struct BundledDatasetSource;

#[async_trait]
impl DatasetSource for BundledDatasetSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        bundled_products()
    }

    fn describe(&self) -> String {
        "bundled dataset".to_string()
    }
}

/// A fixed product list, mostly useful for tests and embedding.
pub struct InMemoryDatasetSource {
    products: Vec<Product>,
}

impl InMemoryDatasetSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl DatasetSource for InMemoryDatasetSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory dataset ({} products)", self.products.len())
    }
}

/// Cloning a `Catalog` shares the same load: clones never fetch twice.
#[derive(Clone)]
pub struct Catalog {
    primary: Arc<dyn DatasetSource>,
    fallback: Arc<dyn DatasetSource>,
    state: Arc<OnceCell<LoadedCatalog>>,
}

impl Catalog {
    /// A catalog backed by `primary`, falling back to the bundled dataset.
    pub fn new(primary: Arc<dyn DatasetSource>) -> Self {
        Self::with_fallback(primary, Arc::new(BundledDatasetSource))
    }

    pub fn with_fallback(primary: Arc<dyn DatasetSource>, fallback: Arc<dyn DatasetSource>) -> Self {
        Self {
            primary,
            fallback,
            state: Arc::new(OnceCell::new()),
        }
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self::new(Arc::new(InMemoryDatasetSource::new(products)))
    }

    /// Resolve the dataset. The first caller triggers the fetch; callers
    /// arriving while it is in flight wait for that same result.
    pub async fn load(&self) -> Arc<[Product]> {
        self.state
            .get_or_init(|| self.fetch_with_fallback())
            .await
            .products
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.initialized()
    }

    /// `None` until the load has resolved.
    pub fn load_source(&self) -> Option<LoadSource> {
        self.state.get().map(|loaded| loaded.source)
    }

    /// The loaded set without waiting, if the load has resolved.
    pub fn snapshot(&self) -> Option<Arc<[Product]>> {
        self.state.get().map(|loaded| loaded.products.clone())
    }

    pub async fn get_all(&self) -> Arc<[Product]> {
        self.load().await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Option<Product> {
        self.load().await.iter().find(|p| p.slug == slug).cloned()
    }

    pub async fn get_by_category(&self, category: Option<&str>) -> Vec<Product> {
        query_engine::filter_by_category(&self.load().await, category)
    }

    pub async fn get_featured(&self) -> Vec<Product> {
        query_engine::featured(&self.load().await)
    }

    pub async fn get_categories(&self) -> Vec<String> {
        query_engine::distinct_categories(&self.load().await)
    }

    pub async fn get_related(&self, product: &Product, limit: usize) -> Vec<Product> {
        let products = self.load().await;
        query_engine::relate(product, &products, limit)
            .into_iter()
            .cloned()
            .collect()
    }

    async fn fetch_with_fallback(&self) -> LoadedCatalog {
        let primary = self.primary.describe();
        debug!(%primary, "loading catalog");

        match self.primary.fetch().await {
            Ok(products) => {
                info!(%primary, count = products.len(), "catalog loaded");
                return LoadedCatalog {
                    products: products.into(),
                    source: LoadSource::Primary,
                };
            }
            Err(error) => {
                warn!(%primary, %error, "primary dataset unavailable");
            }
        }

        let fallback = self.fallback.describe();
        match self.fallback.fetch().await {
            Ok(products) => {
                info!(%fallback, count = products.len(), "catalog loaded from fallback");
                LoadedCatalog {
                    products: products.into(),
                    source: LoadSource::Fallback,
                }
            }
            Err(error) => {
                error!(%fallback, %error, "fallback dataset unavailable; catalog is empty");
                LoadedCatalog {
                    products: Vec::new().into(),
                    source: LoadSource::Unavailable,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
