//! Domain model for the location catalogue.
//!
//! # Responsibility
//! - Define canonical data structures shared by engines, adapters and services.
//! - Keep wire naming (`createdAt`, lowercase categories) in one place.
//!
//! # Invariants
//! - Categories are normalized at deserialization time.
//! - Model types carry no I/O.

pub mod location;
pub mod timestamp;
pub mod view_state;
