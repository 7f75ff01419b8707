//! GeoJSON FeatureCollection -> location drafts -> materialized locations.
//!
//! # Invariants
//! - The document gate (`type == "FeatureCollection"`, `features` is an array)
//!   is checked before any feature is read.
//! - Default-fill rules live in [`PartialLocation::into_draft`] only.
//! - Conversion is all-or-nothing: one bad feature rejects the document.
//! - Coordinates are not bound-checked here.

use crate::codec::CodecError;
use crate::model::location::{Category, Coords, Location, LocationDraft, NewLocation};
use crate::model::timestamp::format_instant;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::path::Path;

/// Name given to features without a usable `name` property.
pub const IMPORTED_NAME_PLACEHOLDER: &str = "Imported Location";
/// Prefix of ids synthesized for imported locations.
pub const IMPORTED_ID_PREFIX: &str = "imported";

const SUPPORTED_EXTENSIONS: &[&str] = &["geojson", "json"];

/// Feature properties as found on the wire; every field may be missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialLocation {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub coords: Coords,
}

impl PartialLocation {
    /// Applies the import default-fill rules.
    pub fn into_draft(self) -> LocationDraft {
        LocationDraft {
            name: self
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| IMPORTED_NAME_PLACEHOLDER.to_string()),
            category: self
                .category
                .as_deref()
                .map(Category::normalize)
                .unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            coords: self.coords,
        }
    }
}

/// Identity stamp shared by every location of one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBatch {
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// `createdAt` given to every imported location.
    pub created_at: String,
}

impl ImportBatch {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            timestamp_ms: instant.timestamp_millis(),
            created_at: format_instant(instant),
        }
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Synthetic id of the feature at `index` within this batch.
    pub fn location_id(&self, index: usize) -> String {
        format!("{IMPORTED_ID_PREFIX}-{}-{index}", self.timestamp_ms)
    }
}

/// Validates a parsed document and converts every feature to a draft.
pub fn from_geojson(document: &Value) -> Result<Vec<LocationDraft>, CodecError> {
    let features = feature_array(document)?;
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| parse_feature(index, feature).map(PartialLocation::into_draft))
        .collect()
}

/// Assigns batch ids and `createdAt` to converted drafts.
pub fn materialize(drafts: Vec<LocationDraft>, batch: &ImportBatch) -> Vec<Location> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            let new_location: NewLocation = draft.into_new(batch.created_at.clone());
            Location::from_new(batch.location_id(index), new_location)
        })
        .collect()
}

/// Parses GeoJSON text and materializes it as one batch.
pub fn parse_import(text: &str, batch: &ImportBatch) -> Result<Vec<Location>, CodecError> {
    let document: Value = serde_json::from_str(text).map_err(CodecError::InvalidJson)?;
    let drafts = from_geojson(&document)?;
    Ok(materialize(drafts, batch))
}

/// Returns whether `path` has an importable extension (`.geojson` / `.json`).
pub fn is_supported_import_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| extension.eq_ignore_ascii_case(supported))
        })
}

fn feature_array(document: &Value) -> Result<&Vec<Value>, CodecError> {
    let object = document
        .as_object()
        .ok_or_else(|| CodecError::InvalidDocument("document is not a JSON object".to_string()))?;

    match object.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {}
        Some(other) => {
            return Err(CodecError::InvalidDocument(format!(
                "expected type `FeatureCollection`, found `{other}`"
            )));
        }
        None => {
            return Err(CodecError::InvalidDocument(
                "missing `type` member".to_string(),
            ));
        }
    }

    object
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| CodecError::InvalidDocument("`features` must be an array".to_string()))
}

fn parse_feature(index: usize, feature: &Value) -> Result<PartialLocation, CodecError> {
    let invalid = |reason: &str| CodecError::InvalidFeature {
        index,
        reason: reason.to_string(),
    };

    let feature = feature
        .as_object()
        .ok_or_else(|| invalid("feature is not a JSON object"))?;
    let coordinates = feature
        .get("geometry")
        .and_then(Value::as_object)
        .and_then(|geometry| geometry.get("coordinates"))
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("missing point coordinates"))?;

    let lon = coordinates.first().and_then(Value::as_f64);
    let lat = coordinates.get(1).and_then(Value::as_f64);
    let (Some(lon), Some(lat)) = (lon, lat) else {
        return Err(invalid("coordinates must start with numeric longitude and latitude"));
    };

    let empty = Map::new();
    let properties = feature
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    Ok(PartialLocation {
        name: string_property(properties, "name"),
        category: string_property(properties, "category"),
        description: string_property(properties, "description"),
        coords: Coords::new(lat, lon),
    })
}

fn string_property(properties: &Map<String, Value>, key: &str) -> Option<String> {
    properties
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{
        from_geojson, is_supported_import_file, ImportBatch, PartialLocation,
        IMPORTED_NAME_PLACEHOLDER,
    };
    use crate::codec::CodecError;
    use crate::model::location::{Category, Coords};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::path::Path;

    #[test]
    fn defaults_are_applied_once_at_ingestion() {
        let draft = PartialLocation {
            name: Some(String::new()),
            category: Some("bar".to_string()),
            description: None,
            coords: Coords::new(50.4, 30.5),
        }
        .into_draft();

        assert_eq!(draft.name, IMPORTED_NAME_PLACEHOLDER);
        assert_eq!(draft.category, Category::Other);
        assert_eq!(draft.description, "");
    }

    #[test]
    fn non_string_properties_count_as_absent() {
        let document = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [30.5, 50.4]},
                "properties": {"name": 42, "category": ["park"], "description": null}
            }]
        });

        let drafts = from_geojson(&document).unwrap();
        assert_eq!(drafts[0].name, IMPORTED_NAME_PLACEHOLDER);
        assert_eq!(drafts[0].category, Category::Other);
    }

    #[test]
    fn missing_properties_object_uses_defaults() {
        let document = json!({
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "geometry": {"type": "Point", "coordinates": [30.5, 50.4, 120.0]}}]
        });

        let drafts = from_geojson(&document).unwrap();
        assert_eq!(drafts[0].name, IMPORTED_NAME_PLACEHOLDER);
        assert_eq!(drafts[0].coords, Coords::new(50.4, 30.5));
    }

    #[test]
    fn feature_without_geometry_is_rejected_with_index() {
        let document = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [30.5, 50.4]}, "properties": {}},
                {"type": "Feature", "geometry": null, "properties": {"name": "broken"}}
            ]
        });

        let err = from_geojson(&document).unwrap_err();
        assert!(matches!(err, CodecError::InvalidFeature { index: 1, .. }));
    }

    #[test]
    fn batch_ids_follow_prefix_timestamp_index() {
        let batch = ImportBatch::at(Utc.timestamp_millis_opt(1_700_000_000_123).unwrap());
        assert_eq!(batch.location_id(0), "imported-1700000000123-0");
        assert_eq!(batch.location_id(12), "imported-1700000000123-12");
        assert_eq!(batch.created_at, "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn import_extensions() {
        assert!(is_supported_import_file(Path::new("export.geojson")));
        assert!(is_supported_import_file(Path::new("/tmp/Export.JSON")));
        assert!(!is_supported_import_file(Path::new("export.csv")));
        assert!(!is_supported_import_file(Path::new("geojson")));
    }
}
