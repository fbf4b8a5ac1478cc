//! Repository interface injected into request handlers
//!
//! Handlers and services only ever see `dyn Store`. `PgStore` backs it with
//! PostgreSQL, `MemoryStore` with in-process tables.

use async_trait::async_trait;

use crate::models::{
    FavoriteDetail, FavoriteTarget, NewPerson, NewPlanet, NewUser, Person, PersonId, Planet,
    PlanetId, User, UserId,
};

use super::DbError;

#[async_trait]
pub trait Store: Send + Sync {
    /// All planets, ordered by id.
    async fn list_planets(&self) -> Result<Vec<Planet>, DbError>;

    async fn get_planet(&self, id: PlanetId) -> Result<Option<Planet>, DbError>;

    /// All people, ordered by id.
    async fn list_people(&self) -> Result<Vec<Person>, DbError>;

    async fn get_person(&self, id: PersonId) -> Result<Option<Person>, DbError>;

    /// All users, ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, DbError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, DbError>;

    /// A user's favorites with their targets attached, ordered by favorite id.
    async fn list_favorites(&self, user: UserId) -> Result<Vec<FavoriteDetail>, DbError>;

    /// Link `user` to `target` in a single transaction.
    ///
    /// # Errors
    ///
    /// - `DbError::Conflict` if the user already has this favorite
    /// - `DbError::NotFound` if the user or target row does not exist
    /// - any other variant means the write was rolled back
    async fn insert_favorite(
        &self,
        user: UserId,
        target: FavoriteTarget,
    ) -> Result<FavoriteDetail, DbError>;

    /// Remove the link between `user` and `target`.
    ///
    /// Returns `false` when there was nothing to delete.
    async fn delete_favorite(&self, user: UserId, target: FavoriteTarget) -> Result<bool, DbError>;

    /// Insert a user, or return the existing one with the same email.
    async fn upsert_user(&self, user: NewUser) -> Result<User, DbError>;

    /// Insert a planet, or return the existing one with the same name.
    async fn upsert_planet(&self, planet: NewPlanet) -> Result<Planet, DbError>;

    /// Insert a person, or return the existing one with the same name.
    async fn upsert_person(&self, person: NewPerson) -> Result<Person, DbError>;
}
