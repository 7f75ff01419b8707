//! Controller services owning the working collection and view state.
//!
//! # Responsibility
//! - Hold the canonical state the UI shell renders from.
//! - Invoke persistence and the backend only at transition boundaries.
//!
//! # Invariants
//! - Pure engines (`view`, `codec`) are called with snapshots; they never see a repository.
//! - Every failure surfaces as a [`ServiceError`] with a Ukrainian `user_message()`.

use crate::codec::CodecError;
use crate::repo::location_repo::RepoError;
use crate::repo::view_state_repo::ViewStateError;
use crate::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod location_catalog;
pub mod view_state_service;

pub use location_catalog::LocationCatalog;
pub use view_state_service::ViewStateService;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Form input rejected; every failed rule is listed.
    Validation(Vec<ValidationError>),
    /// GeoJSON could not be imported or exported.
    Format(CodecError),
    /// Location backend call failed.
    Repo(RepoError),
    /// No location with this id in the working collection.
    NotFound(String),
    /// Import file does not have a `.geojson` or `.json` extension.
    UnsupportedFile(PathBuf),
    Io(std::io::Error),
    /// View state could not be persisted.
    ViewState(ViewStateError),
}

impl ServiceError {
    /// Message for the dismissible notice shown by the UI shell.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors
                .iter()
                .map(ValidationError::user_message)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Format(err) => err.user_message().to_string(),
            Self::Repo(_) => "Не вдалося зв'язатися з сервером. Спробуйте пізніше".to_string(),
            Self::NotFound(_) => "Локацію не знайдено".to_string(),
            Self::UnsupportedFile(_) => {
                "Будь ласка, виберіть файл формату .geojson або .json".to_string()
            }
            Self::Io(_) => "Не вдалося прочитати або записати файл".to_string(),
            Self::ViewState(_) => "Не вдалося зберегти налаштування перегляду".to_string(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => {
                let joined = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "validation failed: {joined}")
            }
            Self::Format(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "location not found in working collection: {id}"),
            Self::UnsupportedFile(path) => {
                write!(f, "unsupported import file `{}`", path.display())
            }
            Self::Io(err) => write!(f, "file access failed: {err}"),
            Self::ViewState(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::ViewState(err) => Some(err),
            Self::Validation(_) | Self::NotFound(_) | Self::UnsupportedFile(_) => None,
        }
    }
}

impl From<CodecError> for ServiceError {
    fn from(value: CodecError) -> Self {
        Self::Format(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ViewStateError> for ServiceError {
    fn from(value: ViewStateError) -> Self {
        Self::ViewState(value)
    }
}
