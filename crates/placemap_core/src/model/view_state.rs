//! Persisted view state: list criteria plus map camera.

use crate::map::MapCamera;
use crate::model::location::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// List ordering selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOption {
    #[default]
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
    #[serde(rename = "date-asc")]
    DateAsc,
    #[serde(rename = "date-desc")]
    DateDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::DateAsc,
        SortOption::DateDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::DateAsc => "date-asc",
            Self::DateDesc => "date-desc",
        }
    }

    /// Returns `None` for unknown values; callers treat that as "keep order".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            "date-asc" => Some(Self::DateAsc),
            "date-desc" => Some(Self::DateDesc),
            _ => None,
        }
    }

    /// Ukrainian label for the sort selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "За назвою (А-Я)",
            Self::NameDesc => "За назвою (Я-А)",
            Self::DateAsc => "Спочатку старі",
            Self::DateDesc => "Спочатку нові",
        }
    }
}

/// Everything that determines what the list and map currently show.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub search_query: String,
    pub selected_categories: BTreeSet<Category>,
    pub sort_option: SortOption,
    pub camera: MapCamera,
}
