use serde::{Deserialize, Serialize};

use crate::domain::{Product, SortKey};

/// Label of the chip that clears the category filter.
pub const ALL_CATEGORIES_LABEL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// The dataset has not been attached yet.
    NotLoaded,
    /// The dataset is loaded but nothing matches the current filters.
    Empty,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChip {
    pub label: String,
    /// `None` for the "All" chip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub active: bool,
}

/// Everything a renderer needs after a listing state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueView {
    pub status: ListingStatus,
    pub visible: Vec<Product>,
    pub total_count: usize,
    pub has_more: bool,
    pub chips: Vec<CategoryChip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_category: Option<String>,
    pub search_term: String,
    pub sort_key: SortKey,
    pub page: u32,
}

impl CatalogueView {
    pub fn is_empty(&self) -> bool {
        self.status == ListingStatus::Empty
    }

    pub fn count_label(&self) -> String {
        match self.total_count {
            1 => "1 product".to_string(),
            n => format!("{n} products"),
        }
    }
}
