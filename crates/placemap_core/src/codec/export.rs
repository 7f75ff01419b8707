//! Location collection -> GeoJSON FeatureCollection.

use crate::codec::CodecError;
use crate::model::location::Location;
use chrono::NaiveDate;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::Value as JsonValue;

/// Converts locations into one Point feature each, preserving input order.
///
/// Coordinates are written longitude first, as GeoJSON requires.
pub fn to_geojson(locations: &[Location]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: locations.iter().map(location_to_feature).collect(),
        foreign_members: None,
    }
}

/// Pretty-printed GeoJSON text for download.
pub fn to_geojson_string(locations: &[Location]) -> Result<String, CodecError> {
    serde_json::to_string_pretty(&to_geojson(locations)).map_err(CodecError::Serialize)
}

/// Download file name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("locations-{}.geojson", date.format("%Y-%m-%d"))
}

fn location_to_feature(location: &Location) -> Feature {
    let geometry = Geometry::new(Value::Point(vec![location.coords.lon, location.coords.lat]));

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), JsonValue::from(location.id.as_str()));
    properties.insert("name".to_string(), JsonValue::from(location.name.as_str()));
    properties.insert(
        "category".to_string(),
        JsonValue::from(location.category.as_str()),
    );
    if let Some(description) = &location.description {
        properties.insert(
            "description".to_string(),
            JsonValue::from(description.as_str()),
        );
    }
    properties.insert(
        "createdAt".to_string(),
        JsonValue::from(location.created_at.as_str()),
    );

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, to_geojson};
    use crate::model::location::{Category, Coords, Location};
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn writes_longitude_first_and_all_properties() {
        let locations = vec![Location {
            id: "1".to_string(),
            name: "Майдан Незалежності".to_string(),
            category: Category::Other,
            description: Some("Головна площа України".to_string()),
            created_at: "2024-01-01".to_string(),
            coords: Coords::new(50.4501, 30.5234),
        }];

        let value = serde_json::to_value(to_geojson(&locations)).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        let feature = &value["features"][0];
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"], json!({"type": "Point", "coordinates": [30.5234, 50.4501]}));
        assert_eq!(
            feature["properties"],
            json!({
                "id": "1",
                "name": "Майдан Незалежності",
                "category": "other",
                "description": "Головна площа України",
                "createdAt": "2024-01-01"
            })
        );
    }

    #[test]
    fn empty_collection_exports_empty_features() {
        let value = serde_json::to_value(to_geojson(&[])).unwrap();
        assert_eq!(value["features"], json!([]));
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_file_name(date), "locations-2024-03-09.geojson");
    }
}
