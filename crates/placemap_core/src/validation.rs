//! Form-level validation for location drafts.
//!
//! # Responsibility
//! - Own the single coordinate bound check used by every write path.
//! - Report all problems of a draft at once, in field order.
//!
//! # Invariants
//! - Exact `0,0` is reported as [`ValidationError::ZeroCoordinates`] only.
//! - Each error kind has exactly one message.

use crate::map::{MapBounds, CITY_BOUNDS};
use crate::model::location::{Coords, LocationDraft};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Draft validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyName,
    /// `0,0` is what an untouched coordinate input submits.
    ZeroCoordinates,
    OutOfBounds {
        coords: Coords,
        bounds: MapBounds,
    },
}

impl ValidationError {
    /// Ukrainian message rendered inline under the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyName => "Назва локації є обов'язковою".to_string(),
            Self::ZeroCoordinates => {
                "Координати не можуть бути 0,0. Оберіть точку на карті або введіть валідні координати"
                    .to_string()
            }
            Self::OutOfBounds { bounds, .. } => format!(
                "Координати повинні бути в межах доступної області карти ({} - {}, {} - {})",
                bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
            ),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "location name must not be empty"),
            Self::ZeroCoordinates => write!(f, "coordinates must not be 0,0"),
            Self::OutOfBounds { coords, bounds } => write!(
                f,
                "coordinates ({}, {}) are outside the map area (lat {}..={}, lon {}..={})",
                coords.lat, coords.lon, bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
            ),
        }
    }
}

impl Error for ValidationError {}

/// Returns whether `coords` lie inside the city map area.
pub fn is_within_bounds(coords: Coords) -> bool {
    CITY_BOUNDS.contains(coords)
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

pub fn validate_coordinates(coords: Coords) -> Result<(), ValidationError> {
    if coords.lat == 0.0 && coords.lon == 0.0 {
        return Err(ValidationError::ZeroCoordinates);
    }
    if !is_within_bounds(coords) {
        return Err(ValidationError::OutOfBounds {
            coords,
            bounds: CITY_BOUNDS,
        });
    }
    Ok(())
}

/// Validates a whole draft; an empty vector means the draft is acceptable.
pub fn validate_draft(draft: &LocationDraft) -> Vec<ValidationError> {
    [validate_name(&draft.name), validate_coordinates(draft.coords)]
        .into_iter()
        .filter_map(Result::err)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{validate_coordinates, validate_draft, ValidationError};
    use crate::model::location::{Category, Coords, LocationDraft};

    #[test]
    fn zero_coordinates_report_only_zero_error() {
        let err = validate_coordinates(Coords::new(0.0, 0.0)).unwrap_err();
        assert_eq!(err, ValidationError::ZeroCoordinates);
    }

    #[test]
    fn boundary_values_are_inside() {
        assert!(validate_coordinates(Coords::new(50.2133, 30.2394)).is_ok());
        assert!(validate_coordinates(Coords::new(50.59, 30.825)).is_ok());
    }

    #[test]
    fn nan_is_out_of_bounds() {
        let err = validate_coordinates(Coords::new(f64::NAN, 30.5)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfBounds { .. }));
    }

    #[test]
    fn draft_collects_every_error_in_field_order() {
        let draft = LocationDraft::new("   ", Category::Food, Coords::new(48.0, 30.5));
        let errors = validate_draft(&draft);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], ValidationError::EmptyName);
        assert!(matches!(errors[1], ValidationError::OutOfBounds { .. }));
        assert!(errors[1].user_message().contains("50.2133 - 50.59"));
    }
}
