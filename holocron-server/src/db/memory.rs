//! `Store` backed by in-process tables
//!
//! Used by `serve --memory` and the router tests. Every write takes the
//! single write lock, so the duplicate check and the insert are atomic and
//! a failed write leaves the tables untouched.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{
    Favorite, FavoriteDetail, FavoriteId, FavoriteSubject, FavoriteTarget, NewPerson, NewPlanet,
    NewUser, Person, PersonId, Planet, PlanetId, User, UserId,
};

use super::{DbError, Store};

#[derive(Debug, Default)]
struct Sequences {
    user: i32,
    planet: i32,
    person: i32,
    favorite: i32,
}

fn next(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    planets: BTreeMap<PlanetId, Planet>,
    people: BTreeMap<PersonId, Person>,
    favorites: BTreeMap<FavoriteId, Favorite>,
    seq: Sequences,
}

impl Tables {
    fn target_exists(&self, target: FavoriteTarget) -> bool {
        match target {
            FavoriteTarget::Planet(id) => self.planets.contains_key(&id),
            FavoriteTarget::Person(id) => self.people.contains_key(&id),
        }
    }

    fn find_favorite(&self, user: UserId, target: FavoriteTarget) -> Option<FavoriteId> {
        self.favorites
            .values()
            .find(|fav| fav.user_id == user && fav.target == target)
            .map(|fav| fav.id)
    }

    fn resolve(&self, fav: &Favorite) -> Result<FavoriteDetail, DbError> {
        let subject = match fav.target {
            FavoriteTarget::Planet(id) => self.planets.get(&id).cloned().map(FavoriteSubject::Planet),
            FavoriteTarget::Person(id) => self.people.get(&id).cloned().map(FavoriteSubject::Person),
        }
        .ok_or_else(|| {
            DbError::Integrity(format!(
                "favorite {} points at missing {}",
                fav.id,
                fav.target.resource()
            ))
        })?;

        Ok(FavoriteDetail {
            id: fav.id,
            user_id: fav.user_id,
            subject,
        })
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    #[cfg(test)]
    fail_writes: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following favorite write fail as if the commit was lost.
    #[cfg(test)]
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[cfg(test)]
    fn check_writable(&self) -> Result<(), DbError> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(DbError::Unavailable("simulated commit failure".into()));
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn check_writable(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_planets(&self) -> Result<Vec<Planet>, DbError> {
        Ok(self.tables.read().await.planets.values().cloned().collect())
    }

    async fn get_planet(&self, id: PlanetId) -> Result<Option<Planet>, DbError> {
        Ok(self.tables.read().await.planets.get(&id).cloned())
    }

    async fn list_people(&self) -> Result<Vec<Person>, DbError> {
        Ok(self.tables.read().await.people.values().cloned().collect())
    }

    async fn get_person(&self, id: PersonId) -> Result<Option<Person>, DbError> {
        Ok(self.tables.read().await.people.get(&id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, DbError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn list_favorites(&self, user: UserId) -> Result<Vec<FavoriteDetail>, DbError> {
        let tables = self.tables.read().await;
        tables
            .favorites
            .values()
            .filter(|fav| fav.user_id == user)
            .map(|fav| tables.resolve(fav))
            .collect()
    }

    async fn insert_favorite(
        &self,
        user: UserId,
        target: FavoriteTarget,
    ) -> Result<FavoriteDetail, DbError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&user) {
            return Err(DbError::not_found("user", user));
        }
        if !tables.target_exists(target) {
            return Err(DbError::not_found(target.resource(), target.raw_id()));
        }
        if tables.find_favorite(user, target).is_some() {
            return Err(DbError::conflict(target.resource(), target.raw_id()));
        }
        self.check_writable()?;

        let fav = Favorite {
            id: FavoriteId(next(&mut tables.seq.favorite)),
            user_id: user,
            target,
        };
        let detail = tables.resolve(&fav)?;
        tables.favorites.insert(fav.id, fav);

        Ok(detail)
    }

    async fn delete_favorite(&self, user: UserId, target: FavoriteTarget) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;

        let Some(id) = tables.find_favorite(user, target) else {
            return Ok(false);
        };
        self.check_writable()?;

        tables.favorites.remove(&id);
        Ok(true)
    }

    async fn upsert_user(&self, user: NewUser) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.users.values().find(|u| u.email == user.email) {
            return Ok(existing.clone());
        }

        let user = user.with_id(UserId(next(&mut tables.seq.user)));
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn upsert_planet(&self, planet: NewPlanet) -> Result<Planet, DbError> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.planets.values().find(|p| p.name == planet.name) {
            return Ok(existing.clone());
        }

        let planet = planet.with_id(PlanetId(next(&mut tables.seq.planet)));
        tables.planets.insert(planet.id, planet.clone());
        Ok(planet)
    }

    async fn upsert_person(&self, person: NewPerson) -> Result<Person, DbError> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.people.values().find(|p| p.name == person.name) {
            return Ok(existing.clone());
        }

        let person = person.with_id(PersonId(next(&mut tables.seq.person)));
        tables.people.insert(person.id, person.clone());
        Ok(person)
    }
}
