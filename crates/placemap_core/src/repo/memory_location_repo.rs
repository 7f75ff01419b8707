//! In-process location store for offline sessions and tests.

use crate::model::location::{Location, NewLocation};
use crate::repo::location_repo::{LocationRepository, RepoError, RepoResult};
use std::cell::{Cell, RefCell};

/// Location store kept in memory; ids are `location_<n>`.
#[derive(Debug, Default)]
pub struct InMemoryLocationRepository {
    locations: RefCell<Vec<Location>>,
    next_id: Cell<u64>,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `locations` (ids kept as given).
    pub fn with_locations(locations: Vec<Location>) -> Self {
        Self {
            next_id: Cell::new(locations.len() as u64),
            locations: RefCell::new(locations),
        }
    }

    pub fn len(&self) -> usize {
        self.locations.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.borrow().is_empty()
    }

    fn allocate_id(&self) -> String {
        loop {
            let candidate = self.next_id.get() + 1;
            self.next_id.set(candidate);
            let id = format!("location_{candidate}");
            if !self.locations.borrow().iter().any(|location| location.id == id) {
                return id;
            }
        }
    }
}

impl LocationRepository for InMemoryLocationRepository {
    fn list_locations(&self) -> RepoResult<Vec<Location>> {
        Ok(self.locations.borrow().clone())
    }

    fn create_location(&self, location: &NewLocation) -> RepoResult<Location> {
        let created = Location::from_new(self.allocate_id(), location.clone());
        self.locations.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_location(&self, location: &Location) -> RepoResult<Location> {
        let mut locations = self.locations.borrow_mut();
        let slot = locations
            .iter_mut()
            .find(|stored| stored.id == location.id)
            .ok_or_else(|| RepoError::NotFound(location.id.clone()))?;
        *slot = location.clone();
        Ok(location.clone())
    }

    fn delete_location(&self, id: &str) -> RepoResult<()> {
        let mut locations = self.locations.borrow_mut();
        let before = locations.len();
        locations.retain(|location| location.id != id);
        if locations.len() == before {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
