//! GeoJSON import/export for the location collection.
//!
//! # Responsibility
//! - Convert locations to a FeatureCollection of Point features and back.
//! - Validate imported documents before anything reaches the working collection.
//!
//! # Invariants
//! - Wire coordinates are `[lon, lat]`; the model is `{lat, lon}`.
//! - Codec functions are pure; file access and logging belong to callers.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod export;
pub mod import;

pub use export::{export_file_name, to_geojson, to_geojson_string};
pub use import::{
    from_geojson, is_supported_import_file, materialize, parse_import, ImportBatch,
    PartialLocation, IMPORTED_ID_PREFIX, IMPORTED_NAME_PLACEHOLDER,
};

/// Malformed or structurally invalid GeoJSON.
#[derive(Debug)]
pub enum CodecError {
    /// Input text is not JSON.
    InvalidJson(serde_json::Error),
    /// Document fails the FeatureCollection gate.
    InvalidDocument(String),
    /// One feature cannot be converted; the whole document is rejected.
    InvalidFeature { index: usize, reason: String },
    Serialize(serde_json::Error),
}

impl CodecError {
    /// Ukrainian notice shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidDocument(_) => "Невірний формат GeoJSON файлу",
            Self::InvalidJson(_) | Self::InvalidFeature { .. } => "Помилка імпорту GeoJSON файлу",
            Self::Serialize(_) => "Помилка експорту GeoJSON файлу",
        }
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "malformed JSON: {err}"),
            Self::InvalidDocument(details) => write!(f, "invalid GeoJSON: {details}"),
            Self::InvalidFeature { index, reason } => {
                write!(f, "invalid GeoJSON feature #{index}: {reason}")
            }
            Self::Serialize(err) => write!(f, "failed to serialize GeoJSON: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) | Self::Serialize(err) => Some(err),
            Self::InvalidDocument(_) | Self::InvalidFeature { .. } => None,
        }
    }
}
