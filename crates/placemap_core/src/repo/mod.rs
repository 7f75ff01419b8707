//! Ports to external collaborators and their adapters.
//!
//! # Responsibility
//! - Define the location API contract used by the catalog service.
//! - Define the view-state store contract (local-storage analogue).
//! - Keep transport/SQL details out of services.
//!
//! # Invariants
//! - Adapters return semantic errors (`NotFound`) in addition to transport errors.

pub mod http_location_repo;
pub mod location_repo;
pub mod memory_location_repo;
pub mod view_state_repo;
