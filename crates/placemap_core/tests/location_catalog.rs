use chrono::{TimeZone, Utc};
use placemap_core::service::location_catalog::is_imported_id;
use placemap_core::seed::sample_locations;
use placemap_core::{
    Category, Coords, InMemoryLocationRepository, Location, LocationCatalog, LocationDraft,
    LocationRepository, NewLocation, RepoError, RepoResult, ServiceError, SortOption,
    ValidationError, ViewCriteria,
};
use std::cell::Cell;

const TWO_FEATURES: &str = r#"{"type":"FeatureCollection","features":[
    {"type":"Feature","geometry":{"type":"Point","coordinates":[30.52,50.45]},"properties":{"name":"Перша","category":"food"}},
    {"type":"Feature","geometry":{"type":"Point","coordinates":[30.53,50.46]},"properties":{"name":"Друга"}}
]}"#;

/// Backend that fails every call and counts them.
#[derive(Default)]
struct FailingRepository {
    calls: Cell<usize>,
}

impl FailingRepository {
    fn fail<T>(&self) -> RepoResult<T> {
        self.calls.set(self.calls.get() + 1);
        Err(RepoError::Transport("connection refused".to_string()))
    }
}

impl LocationRepository for FailingRepository {
    fn list_locations(&self) -> RepoResult<Vec<Location>> {
        self.fail()
    }

    fn create_location(&self, _location: &NewLocation) -> RepoResult<Location> {
        self.fail()
    }

    fn update_location(&self, _location: &Location) -> RepoResult<Location> {
        self.fail()
    }

    fn delete_location(&self, _id: &str) -> RepoResult<()> {
        self.fail()
    }
}

fn seeded_catalog() -> LocationCatalog<InMemoryLocationRepository> {
    let mut catalog =
        LocationCatalog::new(InMemoryLocationRepository::with_locations(sample_locations()));
    catalog.load().unwrap();
    catalog
}

fn draft(name: &str) -> LocationDraft {
    LocationDraft::new(name, Category::Park, Coords::new(50.44, 30.51)).with_description("опис")
}

#[test]
fn load_fills_working_collection() {
    let catalog = seeded_catalog();
    assert_eq!(catalog.locations().len(), 10);
    assert_eq!(catalog.get("5").unwrap().name, "ЦУМ");
}

#[test]
fn failed_load_yields_empty_collection() {
    let mut catalog = LocationCatalog::new(FailingRepository::default());
    catalog.import_geojson_str(TWO_FEATURES).unwrap();

    let err = catalog.load().unwrap_err();

    assert!(matches!(err, ServiceError::Repo(RepoError::Transport(_))));
    assert!(catalog.locations().is_empty());
}

#[test]
fn create_assigns_backend_id_and_todays_date() {
    let mut catalog = seeded_catalog();
    let now = Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap();

    let created = catalog.create_at(draft("Ботанічний сад"), now).unwrap().clone();

    assert_eq!(created.id, "location_11");
    assert_eq!(created.created_at, "2024-03-09");
    assert_eq!(created.description.as_deref(), Some("опис"));
    assert_eq!(catalog.locations().len(), 11);
    assert_eq!(catalog.repository().len(), 11);
}

#[test]
fn invalid_draft_reports_every_problem_without_calling_backend() {
    let mut catalog = LocationCatalog::new(FailingRepository::default());
    let bad = LocationDraft::new("", Category::Food, Coords::new(0.0, 0.0));

    match catalog.create(bad).unwrap_err() {
        ServiceError::Validation(errors) => {
            assert_eq!(errors, vec![ValidationError::EmptyName, ValidationError::ZeroCoordinates]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(catalog.repository().calls.get(), 0);
}

#[test]
fn update_is_a_full_replace_that_keeps_id_and_created_at() {
    let mut catalog = seeded_catalog();

    let updated = catalog
        .update("2", LocationDraft::new("Золоті ворота", Category::Other, Coords::new(50.4487, 30.5131)))
        .unwrap()
        .clone();

    assert_eq!(updated.id, "2");
    assert_eq!(updated.created_at, "2024-01-02");
    assert_eq!(updated.category, Category::Other);
    assert_eq!(updated.description, None);
    assert_eq!(catalog.repository().list_locations().unwrap()[1], updated);
}

#[test]
fn failed_backend_calls_leave_collection_untouched() {
    let mut catalog = LocationCatalog::new(FailingRepository::default());
    catalog.import_geojson_str(TWO_FEATURES).unwrap();
    let before = catalog.locations().to_vec();

    assert!(matches!(catalog.create(draft("Нова")), Err(ServiceError::Repo(_))));
    assert_eq!(catalog.locations(), before.as_slice());
}

#[test]
fn delete_removes_from_backend_and_collection() {
    let mut catalog = seeded_catalog();

    let removed = catalog.delete("7").unwrap();

    assert_eq!(removed.name, "Гідропарк");
    assert!(catalog.get("7").is_none());
    assert_eq!(catalog.repository().len(), 9);
    assert!(matches!(catalog.delete("7"), Err(ServiceError::NotFound(id)) if id == "7"));
}

#[test]
fn imported_locations_are_edited_locally_only() {
    let mut catalog = LocationCatalog::new(FailingRepository::default());
    catalog.import_geojson_str(TWO_FEATURES).unwrap();
    let id = catalog.locations()[0].id.clone();
    assert!(is_imported_id(&id));

    catalog.update(&id, draft("Перейменована")).unwrap();
    assert_eq!(catalog.get(&id).unwrap().name, "Перейменована");

    catalog.delete(&id).unwrap();
    assert_eq!(catalog.locations().len(), 1);
    assert_eq!(catalog.repository().calls.get(), 0);
}

#[test]
fn import_is_all_or_nothing() {
    let mut catalog = seeded_catalog();
    let broken = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","geometry":{"type":"Point","coordinates":[30.52,50.45]},"properties":{"name":"Добра"}},
        {"type":"Feature","geometry":{"type":"Point","coordinates":["x"]},"properties":{"name":"Погана"}}
    ]}"#;

    let err = catalog.import_geojson_str(broken).unwrap_err();
    assert!(matches!(err, ServiceError::Format(_)));
    assert_eq!(err.user_message(), "Помилка імпорту GeoJSON файлу");
    assert_eq!(catalog.locations().len(), 10);

    let err = catalog.import_geojson_str(r#"{"type":"Topology"}"#).unwrap_err();
    assert_eq!(err.user_message(), "Невірний формат GeoJSON файлу");
    assert_eq!(catalog.locations().len(), 10);
}

#[test]
fn consecutive_imports_never_reuse_ids() {
    let mut catalog = seeded_catalog();
    let instant = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    catalog.import_geojson_str_at(TWO_FEATURES, instant).unwrap();
    catalog.import_geojson_str_at(TWO_FEATURES, instant).unwrap();

    let ids: Vec<&str> = catalog.locations()[10..]
        .iter()
        .map(|location| location.id.as_str())
        .collect();
    let ms = instant.timestamp_millis();
    assert_eq!(
        ids,
        vec![
            format!("imported-{ms}-0"),
            format!("imported-{ms}-1"),
            format!("imported-{}-0", ms + 1),
            format!("imported-{}-1", ms + 1),
        ]
    );
}

#[test]
fn import_file_checks_extension_and_reads_content() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = seeded_catalog();

    let csv = dir.path().join("places.csv");
    std::fs::write(&csv, TWO_FEATURES).unwrap();
    assert!(matches!(
        catalog.import_geojson_file(&csv),
        Err(ServiceError::UnsupportedFile(_))
    ));

    let geojson = dir.path().join("places.GeoJSON");
    std::fs::write(&geojson, TWO_FEATURES).unwrap();
    assert_eq!(catalog.import_geojson_file(&geojson).unwrap(), 2);

    let missing = dir.path().join("missing.json");
    assert!(matches!(catalog.import_geojson_file(&missing), Err(ServiceError::Io(_))));
}

#[test]
fn export_writes_dated_file_that_imports_back() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = seeded_catalog();
    let now = Utc.with_ymd_and_hms(2024, 1, 31, 23, 0, 0).unwrap();

    let path = catalog.export_to_dir(dir.path(), now).unwrap();
    assert_eq!(path.file_name().unwrap(), "locations-2024-01-31.geojson");

    let mut restored = LocationCatalog::new(InMemoryLocationRepository::new());
    assert_eq!(restored.import_geojson_file(&path).unwrap(), 10);
    let names = |catalog_locations: &[Location]| -> Vec<String> {
        catalog_locations.iter().map(|location| location.name.clone()).collect()
    };
    assert_eq!(names(restored.locations()), names(catalog.locations()));
}

#[test]
fn view_reads_from_working_collection() {
    let catalog = seeded_catalog();
    let criteria = ViewCriteria::new("", [Category::Food], Some(SortOption::DateDesc));

    let ids: Vec<&str> = catalog
        .view(&criteria)
        .iter()
        .map(|location| location.id.as_str())
        .collect();
    assert_eq!(ids, vec!["8", "6"]);
}
