//! List view derivation (filtering, search, ordering).
//!
//! # Responsibility
//! - Provide pure, stateless functions the shell calls on every state change.
//! - Own locale-aware name ordering.

pub mod collation;
pub mod filter;
