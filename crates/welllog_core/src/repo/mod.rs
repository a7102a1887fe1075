//! Repository layer abstractions and store-backed implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for entries and the
//!   definition catalog.
//! - Isolate row mapping and filter construction from the command handler.
//!
//! # Invariants
//! - Repository writes validate keys before any store call.
//! - Adapter errors are propagated unchanged; there is no retry or masking.
//! - A missing row on point lookup is an absence (`Ok(None)`), not an error.

use crate::model::entry::KeyValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod definition_repo;
pub mod entry_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(KeyValidationError),
    Store(StoreError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<KeyValidationError> for RepoError {
    fn from(value: KeyValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
