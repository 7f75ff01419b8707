//! Location API contract.

use crate::model::location::{Location, LocationId, NewLocation};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure talking to the location backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Connection, DNS, TLS or timeout failure.
    Transport(String),
    /// Backend answered with a non-success status.
    Status { code: u16 },
    /// Response body does not match the expected shape.
    Decode(String),
    NotFound(LocationId),
    /// Id cannot be placed in a request path.
    InvalidId(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "location API unreachable: {message}"),
            Self::Status { code } => write!(f, "location API returned status {code}"),
            Self::Decode(message) => write!(f, "invalid location API response: {message}"),
            Self::NotFound(id) => write!(f, "location not found: {id}"),
            Self::InvalidId(id) => write!(f, "invalid location id `{id}`"),
        }
    }
}

impl Error for RepoError {}

/// Remote location store.
pub trait LocationRepository {
    fn list_locations(&self) -> RepoResult<Vec<Location>>;
    /// Returns the stored location with its backend-assigned id.
    fn create_location(&self, location: &NewLocation) -> RepoResult<Location>;
    /// Full replace; returns the stored location.
    fn update_location(&self, location: &Location) -> RepoResult<Location>;
    fn delete_location(&self, id: &str) -> RepoResult<()>;
}
