//! Location domain model.
//!
//! # Responsibility
//! - Define the canonical point-of-interest record shared with the API.
//! - Normalize categories so only the five known values ever circulate.
//!
//! # Invariants
//! - `id` is unique within one working collection.
//! - `category` is always one of [`Category::ALL`] after deserialization.
//! - `created_at` stays a string; it is parsed only for ordering/display.

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the backend or synthesized on import.
pub type LocationId = String;

/// Closed category set for locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Category {
    Food,
    Park,
    Museum,
    Shop,
    /// Fallback for missing or unrecognized values.
    #[default]
    Other,
}

impl Category {
    /// All categories in canonical display order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Park,
        Category::Museum,
        Category::Shop,
        Category::Other,
    ];

    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Park => "park",
            Self::Museum => "museum",
            Self::Shop => "shop",
            Self::Other => "other",
        }
    }

    /// Strict parse; `None` for anything outside the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "food" => Some(Self::Food),
            "park" => Some(Self::Park),
            "museum" => Some(Self::Museum),
            "shop" => Some(Self::Shop),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Lossy parse used at every ingestion boundary.
    pub fn normalize(value: &str) -> Self {
        Self::parse(value.trim()).unwrap_or_default()
    }

    /// Ukrainian label shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Їжа",
            Self::Park => "Парк",
            Self::Museum => "Музей",
            Self::Shop => "Магазин",
            Self::Other => "Інше",
        }
    }
}

impl From<Option<String>> for Category {
    /// `null` and unknown values both become [`Category::Other`].
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::normalize).unwrap_or_default()
    }
}

/// WGS-84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl Coords {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Canonical location record, wire-compatible with the API collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub coords: Coords,
}

impl Location {
    /// Builds a location from a backend- or import-assigned id and a creation payload.
    pub fn from_new(id: impl Into<LocationId>, new_location: NewLocation) -> Self {
        Self {
            id: id.into(),
            name: new_location.name,
            category: new_location.category,
            description: non_empty(new_location.description),
            created_at: new_location.created_at,
            coords: new_location.coords,
        }
    }

    /// Full replace from a draft.
    ///
    /// # Invariants
    /// - `id` and `created_at` are preserved.
    pub fn replaced_with(&self, draft: LocationDraft) -> Self {
        Self {
            id: self.id.clone(),
            name: draft.name,
            category: draft.category,
            description: non_empty(draft.description),
            created_at: self.created_at.clone(),
            coords: draft.coords,
        }
    }

    /// Projects this location back into an editable draft.
    pub fn to_draft(&self) -> LocationDraft {
        LocationDraft {
            name: self.name.clone(),
            category: self.category,
            description: self.description.clone().unwrap_or_default(),
            coords: self.coords,
        }
    }
}

/// Id-less location record produced by form submission or GeoJSON import.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationDraft {
    pub name: String,
    pub category: Category,
    /// Empty string when absent.
    pub description: String,
    pub coords: Coords,
}

impl LocationDraft {
    pub fn new(name: impl Into<String>, category: Category, coords: Coords) -> Self {
        Self {
            name: name.into(),
            category,
            description: String::new(),
            coords,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attaches a creation timestamp, producing the API create payload.
    pub fn into_new(self, created_at: impl Into<String>) -> NewLocation {
        NewLocation {
            name: self.name,
            category: self.category,
            description: self.description,
            created_at: created_at.into(),
            coords: self.coords,
        }
    }
}

/// Create payload sent to the API (a location without `id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub name: String,
    #[serde(default)]
    pub category: Category,
    pub description: String,
    pub created_at: String,
    pub coords: Coords,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Coords, Location, LocationDraft};
    use serde_json::json;

    #[test]
    fn normalize_falls_back_to_other() {
        assert_eq!(Category::normalize("museum"), Category::Museum);
        assert_eq!(Category::normalize(" park "), Category::Park);
        assert_eq!(Category::normalize("Museum"), Category::Other);
        assert_eq!(Category::normalize(""), Category::Other);
        assert_eq!(Category::normalize("bar"), Category::Other);
    }

    #[test]
    fn replaced_with_keeps_identity_fields() {
        let original = Location {
            id: "7".to_string(),
            name: "Гідропарк".to_string(),
            category: Category::Park,
            description: Some("Острів".to_string()),
            created_at: "2024-01-07".to_string(),
            coords: Coords::new(50.4649, 30.5763),
        };
        let draft = LocationDraft::new("Труханів острів", Category::Other, Coords::new(50.47, 30.54));

        let replaced = original.replaced_with(draft);
        assert_eq!(replaced.id, "7");
        assert_eq!(replaced.created_at, "2024-01-07");
        assert_eq!(replaced.name, "Труханів острів");
        assert_eq!(replaced.description, None);
    }

    #[test]
    fn api_records_with_missing_null_or_unknown_category_decode_as_other() {
        let payload = json!([
            {"id": "1", "name": "Без категорії", "createdAt": "2024-01-01", "coords": {"lat": 50.45, "lon": 30.52}},
            {"id": "2", "name": "Null", "category": null, "createdAt": "2024-01-02", "coords": {"lat": 50.45, "lon": 30.52}},
            {"id": "3", "name": "Бар", "category": "bar", "createdAt": "2024-01-03", "coords": {"lat": 50.45, "lon": 30.52}},
            {"id": "4", "name": "Музей", "category": "museum", "createdAt": "2024-01-04", "coords": {"lat": 50.45, "lon": 30.52}}
        ]);

        let locations: Vec<Location> = serde_json::from_value(payload).unwrap();

        let categories: Vec<Category> = locations.iter().map(|location| location.category).collect();
        assert_eq!(
            categories,
            vec![Category::Other, Category::Other, Category::Other, Category::Museum]
        );
    }

    #[test]
    fn category_serializes_as_lowercase_wire_value() {
        assert_eq!(serde_json::to_value(Category::Shop).unwrap(), json!("shop"));
    }
}
