//! Derived list view: category filter, text search, ordering.
//!
//! # Responsibility
//! - Turn the working collection plus user criteria into the displayed order.
//!
//! # Invariants
//! - Input is never mutated; the result borrows from it.
//! - Stages run in fixed order: category, text, sort.
//! - Sorting is stable; equal keys keep their input order.
//! - An empty category set or blank query means "no filter".

use crate::model::location::{Category, Location};
use crate::model::timestamp::parse_created_at;
use crate::model::view_state::{SortOption, ViewState};
use crate::view::collation::compare_names;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Fields the text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Case-insensitive substring match on `name`.
    #[default]
    NameOnly,
    /// Match on `name`, `description` or the category wire value.
    AllText,
}

/// Filter and sort criteria for [`compute_view`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewCriteria {
    pub search_query: String,
    pub selected_categories: BTreeSet<Category>,
    /// `None` keeps the input order.
    pub sort_option: Option<SortOption>,
    pub search_scope: SearchScope,
}

impl ViewCriteria {
    pub fn new(
        search_query: impl Into<String>,
        selected_categories: impl IntoIterator<Item = Category>,
        sort_option: Option<SortOption>,
    ) -> Self {
        Self {
            search_query: search_query.into(),
            selected_categories: selected_categories.into_iter().collect(),
            sort_option,
            search_scope: SearchScope::default(),
        }
    }

    /// Criteria described by a persisted view state.
    pub fn from_view_state(state: &ViewState) -> Self {
        Self {
            search_query: state.search_query.clone(),
            selected_categories: state.selected_categories.clone(),
            sort_option: Some(state.sort_option),
            search_scope: SearchScope::default(),
        }
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.search_scope = scope;
        self
    }
}

/// Computes the displayed subset and order of `locations`.
pub fn compute_view<'a>(locations: &'a [Location], criteria: &ViewCriteria) -> Vec<&'a Location> {
    let needle = criteria.search_query.trim().to_lowercase();

    let mut view: Vec<&Location> = locations
        .iter()
        .filter(|location| matches_categories(location, &criteria.selected_categories))
        .filter(|location| matches_query(location, &needle, criteria.search_scope))
        .collect();

    if let Some(sort_option) = criteria.sort_option {
        sort_view(&mut view, sort_option);
    }

    view
}

/// Returns whether any criterion differs from the reset state.
pub fn has_active_filters(criteria: &ViewCriteria) -> bool {
    !criteria.search_query.trim().is_empty()
        || !criteria.selected_categories.is_empty()
        || criteria.sort_option != Some(SortOption::NameAsc)
}

fn matches_categories(location: &Location, selected: &BTreeSet<Category>) -> bool {
    selected.is_empty() || selected.contains(&location.category)
}

fn matches_query(location: &Location, needle: &str, scope: SearchScope) -> bool {
    if needle.is_empty() {
        return true;
    }

    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
    match scope {
        SearchScope::NameOnly => contains(&location.name),
        SearchScope::AllText => {
            contains(&location.name)
                || location.description.as_deref().is_some_and(contains)
                || contains(location.category.as_str())
        }
    }
}

fn sort_view(view: &mut [&Location], sort_option: SortOption) {
    match sort_option {
        SortOption::NameAsc => view.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortOption::NameDesc => view.sort_by(|a, b| compare_names(&b.name, &a.name)),
        SortOption::DateAsc => sort_by_date(view, false),
        SortOption::DateDesc => sort_by_date(view, true),
    }
}

fn sort_by_date(view: &mut [&Location], descending: bool) {
    // Keys are parsed once; unparseable dates trail in both directions.
    let mut keyed: Vec<(Option<i64>, &Location)> = view
        .iter()
        .map(|location| {
            let key = parse_created_at(&location.created_at).map(|instant| instant.timestamp_millis());
            (key, *location)
        })
        .collect();

    keyed.sort_by(|(left, _), (right, _)| match (left, right) {
        (Some(left), Some(right)) if descending => right.cmp(left),
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    for (slot, (_, location)) in view.iter_mut().zip(keyed) {
        *slot = location;
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_view, has_active_filters, SearchScope, ViewCriteria};
    use crate::model::location::{Category, Coords, Location};
    use crate::model::view_state::SortOption;

    fn location(id: &str, name: &str, category: Category, created_at: &str) -> Location {
        Location {
            id: id.to_string(),
            name: name.to_string(),
            category,
            description: None,
            created_at: created_at.to_string(),
            coords: Coords::new(50.45, 30.52),
        }
    }

    fn ids(view: &[&Location]) -> Vec<String> {
        view.iter().map(|location| location.id.clone()).collect()
    }

    #[test]
    fn unknown_sort_keeps_input_order() {
        let locations = vec![
            location("1", "Б", Category::Food, "2024-01-02"),
            location("2", "А", Category::Food, "2024-01-01"),
        ];
        let view = compute_view(&locations, &ViewCriteria::new("", [], SortOption::parse("price")));
        assert_eq!(ids(&view), vec!["1", "2"]);
    }

    #[test]
    fn unparseable_dates_trail_in_both_directions() {
        let locations = vec![
            location("bad", "X", Category::Food, "someday"),
            location("old", "Y", Category::Food, "2023-05-01"),
            location("new", "Z", Category::Food, "2024-05-01T10:00:00.000Z"),
        ];
        let asc = compute_view(&locations, &ViewCriteria::new("", [], Some(SortOption::DateAsc)));
        assert_eq!(ids(&asc), vec!["old", "new", "bad"]);

        let desc = compute_view(&locations, &ViewCriteria::new("", [], Some(SortOption::DateDesc)));
        assert_eq!(ids(&desc), vec!["new", "old", "bad"]);
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let locations = vec![
            location("a", "Б", Category::Food, "2024-01-01"),
            location("b", "А", Category::Food, "2024-01-01"),
            location("c", "В", Category::Food, "2024-01-01"),
        ];
        let view = compute_view(&locations, &ViewCriteria::new("", [], Some(SortOption::DateDesc)));
        assert_eq!(ids(&view), vec!["a", "b", "c"]);
    }

    #[test]
    fn all_text_scope_matches_description_and_category() {
        let mut described = location("1", "Канапа", Category::Food, "2024-01-06");
        described.description = Some("Українська кухня".to_string());
        let locations = vec![described, location("2", "Софійський собор", Category::Museum, "2024-01-03")];

        let name_only = ViewCriteria::new("кухня", [], None);
        assert!(compute_view(&locations, &name_only).is_empty());

        let all_text = ViewCriteria::new("кухня", [], None).with_scope(SearchScope::AllText);
        assert_eq!(ids(&compute_view(&locations, &all_text)), vec!["1"]);

        let by_category = ViewCriteria::new("MUSEUM", [], None).with_scope(SearchScope::AllText);
        assert_eq!(ids(&compute_view(&locations, &by_category)), vec!["2"]);
    }

    #[test]
    fn active_filters_detection() {
        assert!(!has_active_filters(&ViewCriteria::new("  ", [], Some(SortOption::NameAsc))));
        assert!(has_active_filters(&ViewCriteria::new("парк", [], Some(SortOption::NameAsc))));
        assert!(has_active_filters(&ViewCriteria::new("", [Category::Shop], Some(SortOption::NameAsc))));
        assert!(has_active_filters(&ViewCriteria::new("", [], Some(SortOption::DateDesc))));
    }
}
