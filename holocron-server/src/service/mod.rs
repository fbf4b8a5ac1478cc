//! Application services between the HTTP handlers and the `Store`
//!
//! - catalog: read-only listing and lookup of people, planets and users
//! - favorites: add/remove/list favorites for an acting user

pub mod catalog;
pub mod favorites;

use crate::db::DbError;

pub use catalog::CatalogEntity;
pub use favorites::FavoriteService;

/// Service-level error, independent of transport
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// Listing found no rows
    #[error("no {collection} found")]
    Empty { collection: &'static str },

    #[error("{resource} {id} already in favorites")]
    Conflict { resource: &'static str, id: String },

    #[error(transparent)]
    Storage(DbError),
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { resource, id } => Self::Conflict { resource, id },
            other => Self::Storage(other),
        }
    }
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_keep_their_meaning() {
        let err: ServiceError = DbError::conflict("planet", 3).into();
        assert_eq!(err.to_string(), "planet 3 already in favorites");

        let err: ServiceError = DbError::not_found("user", 1).into();
        assert!(matches!(err, ServiceError::NotFound { resource: "user", .. }));

        let err: ServiceError = DbError::Unavailable("gone".into()).into();
        assert!(matches!(err, ServiceError::Storage(_)));
    }
}
