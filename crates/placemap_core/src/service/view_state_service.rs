//! View-state controller.
//!
//! # Invariants
//! - Every mutation is applied in memory first, then persisted.
//! - A persistence failure is logged and returned; the in-memory change stays.
//! - A failed load yields the default state.

use crate::map::MapCamera;
use crate::model::location::Category;
use crate::model::view_state::{SortOption, ViewState};
use crate::repo::view_state_repo::ViewStateRepository;
use crate::service::ServiceResult;
use crate::view::filter::{has_active_filters, SearchScope, ViewCriteria};
use log::{debug, warn};
use std::collections::BTreeSet;

pub struct ViewStateService<S: ViewStateRepository> {
    store: S,
    state: ViewState,
    search_scope: SearchScope,
}

impl<S: ViewStateRepository> ViewStateService<S> {
    /// Restores the persisted state, or the default one when the store fails.
    pub fn load(store: S) -> Self {
        let state = match store.load_view_state() {
            Ok(state) => state,
            Err(err) => {
                warn!("event=view_state_load module=service status=fallback error={err}");
                ViewState::default()
            }
        };
        Self {
            store,
            state,
            search_scope: SearchScope::default(),
        }
    }

    pub fn with_search_scope(mut self, scope: SearchScope) -> Self {
        self.search_scope = scope;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn criteria(&self) -> ViewCriteria {
        ViewCriteria::from_view_state(&self.state).with_scope(self.search_scope)
    }

    pub fn has_active_filters(&self) -> bool {
        has_active_filters(&self.criteria())
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) -> ServiceResult<()> {
        self.state.search_query = query.into();
        self.persist("search_query")
    }

    /// Adds `category` to the filter, or removes it when already selected.
    pub fn toggle_category(&mut self, category: Category) -> ServiceResult<()> {
        if !self.state.selected_categories.remove(&category) {
            self.state.selected_categories.insert(category);
        }
        self.persist("selected_categories")
    }

    pub fn set_selected_categories(
        &mut self,
        categories: impl IntoIterator<Item = Category>,
    ) -> ServiceResult<()> {
        self.state.selected_categories = categories.into_iter().collect::<BTreeSet<_>>();
        self.persist("selected_categories")
    }

    pub fn set_sort_option(&mut self, sort_option: SortOption) -> ServiceResult<()> {
        self.state.sort_option = sort_option;
        self.persist("sort_option")
    }

    /// Clears query and categories and restores name-ascending sort; the camera is kept.
    pub fn reset_filters(&mut self) -> ServiceResult<()> {
        self.state.search_query.clear();
        self.state.selected_categories.clear();
        self.state.sort_option = SortOption::default();
        self.persist("reset_filters")
    }

    /// Stores the camera after clamping it to the allowed area and zoom range.
    pub fn set_camera(&mut self, camera: MapCamera) -> ServiceResult<()> {
        self.state.camera = MapCamera::clamped(camera.center, camera.zoom);
        self.persist("camera")
    }

    fn persist(&self, change: &str) -> ServiceResult<()> {
        match self.store.save_view_state(&self.state) {
            Ok(()) => {
                debug!("event=view_state_save module=service status=ok change={change}");
                Ok(())
            }
            Err(err) => {
                warn!("event=view_state_save module=service status=error change={change} error={err}");
                Err(err.into())
            }
        }
    }
}
