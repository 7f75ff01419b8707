//! Core logic for the city location map.
//! The UI shell renders from the state owned here and calls back on every user action.

pub mod codec;
pub mod config;
pub mod db;
pub mod display;
pub mod logging;
pub mod map;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod validation;
pub mod view;

pub use codec::{from_geojson, parse_import, to_geojson, to_geojson_string, CodecError, ImportBatch};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::location::{Category, Coords, Location, LocationDraft, LocationId, NewLocation};
pub use model::view_state::{SortOption, ViewState};
pub use repo::http_location_repo::HttpLocationRepository;
pub use repo::location_repo::{LocationRepository, RepoError, RepoResult};
pub use repo::memory_location_repo::InMemoryLocationRepository;
pub use repo::view_state_repo::{SqliteViewStateRepository, ViewStateError, ViewStateRepository};
pub use service::{LocationCatalog, ServiceError, ServiceResult, ViewStateService};
pub use validation::{validate_draft, ValidationError};
pub use view::filter::{compute_view, has_active_filters, SearchScope, ViewCriteria};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
