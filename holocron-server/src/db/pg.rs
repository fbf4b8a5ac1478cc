//! `Store` backed by PostgreSQL

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{
    FavoriteDetail, FavoriteTarget, NewPerson, NewPlanet, NewUser, Person, PersonId, Planet,
    PlanetId, User, UserId,
};

use super::repos::{FavoriteRepo, PersonRepo, PlanetRepo, UserRepo};
use super::{DbError, Store};

/// PostgreSQL store, delegating to the per-table repositories
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_planets(&self) -> Result<Vec<Planet>, DbError> {
        PlanetRepo::new(&self.pool).list().await
    }

    async fn get_planet(&self, id: PlanetId) -> Result<Option<Planet>, DbError> {
        PlanetRepo::new(&self.pool).get(id).await
    }

    async fn list_people(&self) -> Result<Vec<Person>, DbError> {
        PersonRepo::new(&self.pool).list().await
    }

    async fn get_person(&self, id: PersonId) -> Result<Option<Person>, DbError> {
        PersonRepo::new(&self.pool).get(id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        UserRepo::new(&self.pool).list().await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, DbError> {
        UserRepo::new(&self.pool).get(id).await
    }

    async fn list_favorites(&self, user: UserId) -> Result<Vec<FavoriteDetail>, DbError> {
        FavoriteRepo::new(&self.pool).list_for_user(user).await
    }

    async fn insert_favorite(
        &self,
        user: UserId,
        target: FavoriteTarget,
    ) -> Result<FavoriteDetail, DbError> {
        FavoriteRepo::new(&self.pool).insert(user, target).await
    }

    async fn delete_favorite(&self, user: UserId, target: FavoriteTarget) -> Result<bool, DbError> {
        FavoriteRepo::new(&self.pool).delete(user, target).await
    }

    async fn upsert_user(&self, user: NewUser) -> Result<User, DbError> {
        UserRepo::new(&self.pool).upsert(user).await
    }

    async fn upsert_planet(&self, planet: NewPlanet) -> Result<Planet, DbError> {
        PlanetRepo::new(&self.pool).upsert(planet).await
    }

    async fn upsert_person(&self, person: NewPerson) -> Result<Person, DbError> {
        PersonRepo::new(&self.pool).upsert(person).await
    }
}
