//! Catalog queries: people, planets and users
//!
//! Listing an empty table is reported as `ServiceError::Empty` (HTTP 404),
//! unlike the favorites list where empty is a normal 200.

use std::fmt::Display;

use async_trait::async_trait;
use serde::Serialize;

use crate::db::{DbError, Store};
use crate::models::{Person, PersonId, Planet, PlanetId, User, UserId};

use super::ServiceError;

/// A record kind that can be listed and fetched by id
#[async_trait]
pub trait CatalogEntity: Serialize + Send + Sync + Sized + 'static {
    type Id: Copy + Display + From<i32> + Send + Sync + 'static;

    /// Singular name used in not-found messages
    const RESOURCE: &'static str;
    /// Plural name used in empty-listing messages
    const COLLECTION: &'static str;

    async fn fetch_all(store: &dyn Store) -> Result<Vec<Self>, DbError>;

    async fn fetch_one(store: &dyn Store, id: Self::Id) -> Result<Option<Self>, DbError>;
}

#[async_trait]
impl CatalogEntity for Planet {
    type Id = PlanetId;
    const RESOURCE: &'static str = "planet";
    const COLLECTION: &'static str = "planets";

    async fn fetch_all(store: &dyn Store) -> Result<Vec<Self>, DbError> {
        store.list_planets().await
    }

    async fn fetch_one(store: &dyn Store, id: PlanetId) -> Result<Option<Self>, DbError> {
        store.get_planet(id).await
    }
}

#[async_trait]
impl CatalogEntity for Person {
    type Id = PersonId;
    const RESOURCE: &'static str = "person";
    const COLLECTION: &'static str = "people";

    async fn fetch_all(store: &dyn Store) -> Result<Vec<Self>, DbError> {
        store.list_people().await
    }

    async fn fetch_one(store: &dyn Store, id: PersonId) -> Result<Option<Self>, DbError> {
        store.get_person(id).await
    }
}

#[async_trait]
impl CatalogEntity for User {
    type Id = UserId;
    const RESOURCE: &'static str = "user";
    const COLLECTION: &'static str = "users";

    async fn fetch_all(store: &dyn Store) -> Result<Vec<Self>, DbError> {
        store.list_users().await
    }

    async fn fetch_one(store: &dyn Store, id: UserId) -> Result<Option<Self>, DbError> {
        store.get_user(id).await
    }
}

/// Every record of kind `E`; `Empty` when there are none.
pub async fn list_all<E: CatalogEntity>(store: &dyn Store) -> Result<Vec<E>, ServiceError> {
    let records = E::fetch_all(store).await?;

    if records.is_empty() {
        return Err(ServiceError::Empty {
            collection: E::COLLECTION,
        });
    }

    Ok(records)
}

/// A single record of kind `E`.
pub async fn get_by_id<E: CatalogEntity>(store: &dyn Store, id: E::Id) -> Result<E, ServiceError> {
    E::fetch_one(store, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(E::RESOURCE, id))
}
