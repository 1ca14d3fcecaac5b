use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use catalog_store::{Catalog, DatasetSource, FileDatasetSource, HttpDatasetSource, DATASET_PATH};
use serde::Deserialize;
use tracing::warn;

use crate::{catalogue::DEFAULT_PAGE_SIZE, detail::RELATED_LIMIT};

pub const SETTINGS_FILE: &str = "catalogue.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Site root the dataset is fetched from; takes precedence over `dataset_path`.
    pub dataset_url: Option<String>,
    pub dataset_path: PathBuf,
    pub page_size: usize,
    pub related_limit: usize,
    pub site_name: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_url: None,
            dataset_path: PathBuf::from(DATASET_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            related_limit: RELATED_LIMIT,
            site_name: "Golden Motif".into(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    dataset_url: Option<String>,
    dataset_path: Option<PathBuf>,
    page_size: Option<usize>,
    related_limit: Option<usize>,
    site_name: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `catalogue.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, file_cfg),
            Err(error) => warn!(path = %path.display(), %error, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("CATALOGUE_DATASET_URL") {
        settings.dataset_url = Some(v);
    }
    if let Some(v) = env("APP__DATASET_URL") {
        settings.dataset_url = Some(v);
    }

    if let Some(v) = env("APP__DATASET_PATH") {
        settings.dataset_path = PathBuf::from(v);
    }

    if let Some(parsed) = env("APP__PAGE_SIZE").and_then(|v| v.parse::<usize>().ok()) {
        settings.page_size = parsed;
    }

    if let Some(parsed) = env("APP__RELATED_LIMIT").and_then(|v| v.parse::<usize>().ok()) {
        settings.related_limit = parsed;
    }

    if let Some(v) = env("APP__SITE_NAME") {
        settings.site_name = v;
    }

    if let Some(parsed) = env("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
        settings.request_timeout_secs = Some(parsed);
    }

    if settings.page_size == 0 {
        settings.page_size = DEFAULT_PAGE_SIZE;
    }
    settings.dataset_url = settings
        .dataset_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());

    settings
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.dataset_url {
        settings.dataset_url = Some(v);
    }
    if let Some(v) = file_cfg.dataset_path {
        settings.dataset_path = v;
    }
    if let Some(v) = file_cfg.page_size {
        settings.page_size = v;
    }
    if let Some(v) = file_cfg.related_limit {
        settings.related_limit = v;
    }
    if let Some(v) = file_cfg.site_name {
        settings.site_name = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
}

impl Settings {
    pub fn dataset_source(&self) -> anyhow::Result<Arc<dyn DatasetSource>> {
        let Some(base_url) = &self.dataset_url else {
            return Ok(Arc::new(FileDatasetSource::new(&self.dataset_path)));
        };

        let mut source = HttpDatasetSource::for_site(base_url)
            .with_context(|| format!("invalid dataset url '{base_url}'"))?;
        if let Some(secs) = self.request_timeout_secs {
            source = source
                .with_timeout(Duration::from_secs(secs))
                .context("failed to build dataset http client")?;
        }
        Ok(Arc::new(source))
    }

    pub fn build_catalog(&self) -> anyhow::Result<Catalog> {
        Ok(Catalog::new(self.dataset_source()?))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
