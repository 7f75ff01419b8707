//! View-state store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist search text, category selection, sort option and map camera.
//!
//! # Invariants
//! - Each key is read independently; a missing or malformed key falls back
//!   to its default without affecting the others.
//! - Values are stored as JSON text.

use crate::db::DbError;
use crate::map::MapCamera;
use crate::model::location::{Category, Coords};
use crate::model::view_state::{SortOption, ViewState};
use log::warn;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const KEY_SEARCH_QUERY: &str = "searchQuery";
pub const KEY_SELECTED_CATEGORIES: &str = "selectedCategories";
pub const KEY_SORT_OPTION: &str = "sortOption";
pub const KEY_MAP_CENTER: &str = "mapCenter";
pub const KEY_MAP_ZOOM: &str = "mapZoom";

pub type ViewStateResult<T> = Result<T, ViewStateError>;

#[derive(Debug)]
pub enum ViewStateError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for ViewStateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode view state: {err}"),
        }
    }
}

impl Error for ViewStateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for ViewStateError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for ViewStateError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for ViewStateError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Persistent store for [`ViewState`].
pub trait ViewStateRepository {
    fn load_view_state(&self) -> ViewStateResult<ViewState>;
    fn save_view_state(&self, state: &ViewState) -> ViewStateResult<()>;
}

/// SQLite-backed key/value view-state store.
pub struct SqliteViewStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteViewStateRepository<'conn> {
    /// `conn` must come from [`crate::db::open_db`] or [`crate::db::open_db_in_memory`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_all(&self) -> ViewStateResult<HashMap<String, String>> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM view_state;")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
        let mut values = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            values.insert(key, value);
        }
        Ok(values)
    }
}

impl ViewStateRepository for SqliteViewStateRepository<'_> {
    fn load_view_state(&self) -> ViewStateResult<ViewState> {
        let values = self.read_all()?;
        let defaults = ViewState::default();

        let search_query = decode_key::<String>(&values, KEY_SEARCH_QUERY)
            .unwrap_or(defaults.search_query);
        let selected_categories = decode_key::<Vec<String>>(&values, KEY_SELECTED_CATEGORIES)
            .map(|stored| stored.iter().filter_map(|value| Category::parse(value)).collect())
            .unwrap_or(defaults.selected_categories);
        let sort_option = decode_key::<String>(&values, KEY_SORT_OPTION)
            .and_then(|value| SortOption::parse(&value))
            .unwrap_or(defaults.sort_option);
        let center = decode_key::<[f64; 2]>(&values, KEY_MAP_CENTER)
            .map(|[lat, lon]| Coords::new(lat, lon))
            .unwrap_or(defaults.camera.center);
        let zoom = decode_key::<u8>(&values, KEY_MAP_ZOOM).unwrap_or(defaults.camera.zoom);

        Ok(ViewState {
            search_query,
            selected_categories,
            sort_option,
            camera: MapCamera::clamped(center, zoom),
        })
    }

    fn save_view_state(&self, state: &ViewState) -> ViewStateResult<()> {
        let categories: Vec<&str> = state
            .selected_categories
            .iter()
            .map(|category| category.as_str())
            .collect();
        let entries = [
            (KEY_SEARCH_QUERY, serde_json::to_string(&state.search_query)?),
            (KEY_SELECTED_CATEGORIES, serde_json::to_string(&categories)?),
            (KEY_SORT_OPTION, serde_json::to_string(state.sort_option.as_str())?),
            (
                KEY_MAP_CENTER,
                serde_json::to_string(&[state.camera.center.lat, state.camera.center.lon])?,
            ),
            (KEY_MAP_ZOOM, serde_json::to_string(&state.camera.zoom)?),
        ];

        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in &entries {
            tx.execute(
                "INSERT INTO view_state (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn decode_key<T: DeserializeOwned>(values: &HashMap<String, String>, key: &str) -> Option<T> {
    let raw = values.get(key)?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("event=view_state_load module=repo status=fallback key={key} error={err}");
            None
        }
    }
}
