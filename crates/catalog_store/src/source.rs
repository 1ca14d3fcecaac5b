use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use reqwest::Client;
use shared::domain::Product;
use url::Url;

use crate::error::CatalogError;

/// Path of the dataset document relative to the site root.
pub const DATASET_PATH: &str = "data/products.json";

pub(crate) const BUNDLED_DATASET: &str = include_str!("../data/products.json");

/// Where the primary copy of the dataset comes from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

pub struct HttpDatasetSource {
    client: Client,
    url: Url,
}

impl HttpDatasetSource {
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    /// Resolve [`DATASET_PATH`] against a site base URL.
    pub fn for_site(base_url: &str) -> Result<Self, CatalogError> {
        let mut base = Url::parse(base_url)
            .map_err(|_| CatalogError::InvalidLocation(base_url.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let url = base
            .join(DATASET_PATH)
            .map_err(|_| CatalogError::InvalidLocation(base_url.to_string()))?;
        Ok(Self::new(url))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, CatalogError> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        decode_products(&body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DatasetSource for FileDatasetSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        decode_products(&raw)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Decode a product array and enforce slug and id uniqueness.
pub fn decode_products(raw: &[u8]) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> = serde_json::from_slice(raw)?;

    let mut slugs = HashSet::new();
    let mut ids = HashSet::new();
    for product in &products {
        if !slugs.insert(product.slug.as_str()) {
            return Err(CatalogError::DuplicateSlug(product.slug.clone()));
        }
        if !ids.insert(product.id) {
            return Err(CatalogError::DuplicateId(product.id.0));
        }
    }

    Ok(products)
}

/// The copy of the dataset shipped inside the binary.
pub fn bundled_products() -> Result<Vec<Product>, CatalogError> {
    decode_products(BUNDLED_DATASET.as_bytes()).map_err(|err| CatalogError::Bundled(Box::new(err)))
}
