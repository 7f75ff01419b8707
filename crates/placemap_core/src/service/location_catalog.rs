//! Working location collection controller.
//!
//! # Responsibility
//! - Load, create, update and delete locations through a [`LocationRepository`].
//! - Import and export GeoJSON against the working collection.
//!
//! # Invariants
//! - A failed backend call leaves the working collection untouched.
//! - A failed initial load leaves the working collection empty.
//! - Imports are all-or-nothing; batch timestamps strictly increase per catalog.
//! - Imported locations (`imported-<ts>-<idx>`) exist only locally; update and
//!   delete never send them to the backend.

use crate::codec::{
    export_file_name, is_supported_import_file, parse_import, to_geojson_string, ImportBatch,
};
use crate::model::location::{Location, LocationDraft};
use crate::model::timestamp::{format_date_only, format_instant};
use crate::repo::location_repo::LocationRepository;
use crate::service::{ServiceError, ServiceResult};
use crate::validation::validate_draft;
use crate::view::filter::{compute_view, ViewCriteria};
use chrono::{DateTime, Utc};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static IMPORTED_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^imported-\d+-\d+$").expect("valid imported id regex"));

/// Returns whether `id` was synthesized by a GeoJSON import.
pub fn is_imported_id(id: &str) -> bool {
    IMPORTED_ID_RE.is_match(id)
}

pub struct LocationCatalog<R: LocationRepository> {
    repo: R,
    locations: Vec<Location>,
    last_import_ms: Option<i64>,
}

impl<R: LocationRepository> LocationCatalog<R> {
    /// Empty catalog; call [`Self::load`] to fetch from the backend.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            locations: Vec::new(),
            last_import_ms: None,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    /// Replaces the working collection with the backend's list.
    ///
    /// On failure the collection is cleared and the error returned.
    pub fn load(&mut self) -> ServiceResult<usize> {
        match self.repo.list_locations() {
            Ok(locations) => {
                self.locations = locations;
                info!(
                    "event=catalog_load module=service status=ok count={}",
                    self.locations.len()
                );
                Ok(self.locations.len())
            }
            Err(err) => {
                self.locations.clear();
                warn!("event=catalog_load module=service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Validates `draft`, creates it in the backend with today's date and appends it.
    pub fn create(&mut self, draft: LocationDraft) -> ServiceResult<&Location> {
        self.create_at(draft, Utc::now())
    }

    pub fn create_at(&mut self, draft: LocationDraft, now: DateTime<Utc>) -> ServiceResult<&Location> {
        ensure_valid(&draft)?;
        let payload = draft.into_new(format_date_only(now));
        let created = self.repo.create_location(&payload).map_err(|err| {
            warn!("event=location_create module=service status=error error={err}");
            ServiceError::from(err)
        })?;
        info!("event=location_create module=service status=ok id={}", created.id);

        self.locations.push(created);
        let index = self.locations.len() - 1;
        Ok(&self.locations[index])
    }

    /// Full replace of the location `id`, keeping its id and `createdAt`.
    pub fn update(&mut self, id: &str, draft: LocationDraft) -> ServiceResult<&Location> {
        ensure_valid(&draft)?;
        let index = self.index_of(id)?;
        let replaced = self.locations[index].replaced_with(draft);

        let stored = if is_imported_id(id) {
            replaced
        } else {
            self.repo.update_location(&replaced).map_err(|err| {
                warn!("event=location_update module=service status=error id={id} error={err}");
                ServiceError::from(err)
            })?
        };
        info!("event=location_update module=service status=ok id={id}");

        self.locations[index] = stored;
        Ok(&self.locations[index])
    }

    /// Removes the location `id` and returns it.
    pub fn delete(&mut self, id: &str) -> ServiceResult<Location> {
        let index = self.index_of(id)?;
        if !is_imported_id(id) {
            self.repo.delete_location(id).map_err(|err| {
                warn!("event=location_delete module=service status=error id={id} error={err}");
                ServiceError::from(err)
            })?;
        }
        info!("event=location_delete module=service status=ok id={id}");
        Ok(self.locations.remove(index))
    }

    /// Appends every feature of `text` as one import batch.
    pub fn import_geojson_str(&mut self, text: &str) -> ServiceResult<usize> {
        self.import_geojson_str_at(text, Utc::now())
    }

    pub fn import_geojson_str_at(&mut self, text: &str, now: DateTime<Utc>) -> ServiceResult<usize> {
        let batch = self.next_batch(now);
        let imported = parse_import(text, &batch).map_err(|err| {
            warn!("event=geojson_import module=service status=error error={err}");
            ServiceError::from(err)
        })?;

        let count = imported.len();
        self.locations.extend(imported);
        self.last_import_ms = Some(batch.timestamp_ms);
        info!(
            "event=geojson_import module=service status=ok batch={} count={count}",
            batch.timestamp_ms
        );
        Ok(count)
    }

    /// Reads and imports a `.geojson` / `.json` file.
    pub fn import_geojson_file(&mut self, path: &Path) -> ServiceResult<usize> {
        if !is_supported_import_file(path) {
            warn!(
                "event=geojson_import module=service status=rejected reason=extension path={}",
                path.display()
            );
            return Err(ServiceError::UnsupportedFile(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        self.import_geojson_str(&text)
    }

    /// Pretty GeoJSON of the whole working collection, in collection order.
    pub fn export_geojson(&self) -> ServiceResult<String> {
        Ok(to_geojson_string(&self.locations)?)
    }

    /// Writes `locations-YYYY-MM-DD.geojson` into `dir` and returns its path.
    pub fn export_to_dir(&self, dir: &Path, now: DateTime<Utc>) -> ServiceResult<PathBuf> {
        let text = self.export_geojson()?;
        let path = dir.join(export_file_name(now.date_naive()));
        std::fs::write(&path, text)?;
        info!(
            "event=geojson_export module=service status=ok count={} path={}",
            self.locations.len(),
            path.display()
        );
        Ok(path)
    }

    /// Filtered, ordered view over the working collection.
    pub fn view(&self, criteria: &ViewCriteria) -> Vec<&Location> {
        compute_view(&self.locations, criteria)
    }

    fn index_of(&self, id: &str) -> ServiceResult<usize> {
        self.locations
            .iter()
            .position(|location| location.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    fn next_batch(&self, now: DateTime<Utc>) -> ImportBatch {
        let now_ms = now.timestamp_millis();
        let timestamp_ms = match self.last_import_ms {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        ImportBatch {
            timestamp_ms,
            created_at: format_instant(now),
        }
    }
}

fn ensure_valid(draft: &LocationDraft) -> ServiceResult<()> {
    let errors = validate_draft(draft);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}
