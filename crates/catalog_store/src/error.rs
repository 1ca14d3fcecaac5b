use thiserror::Error;

/// Reasons a dataset source could not produce a usable product set.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("dataset request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("dataset request returned HTTP {status}")]
    Status { status: u16 },
    #[error("failed to read dataset file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("dataset is not a valid product array: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("duplicate product slug '{0}'")]
    DuplicateSlug(String),
    #[error("duplicate product id {0}")]
    DuplicateId(i64),
    #[error("invalid dataset location '{0}'")]
    InvalidLocation(String),
    #[error("bundled dataset is unusable: {0}")]
    Bundled(Box<CatalogError>),
}
