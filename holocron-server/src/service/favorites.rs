//! Favorite management for an acting user
//!
//! Existence of the user and the target is checked up front so callers get
//! a precise not-found. Duplicate detection is left to the store, which
//! rejects it atomically.

use crate::db::Store;
use crate::models::{FavoriteDetail, FavoriteTarget, PersonId, PlanetId, UserId};

use super::ServiceError;

/// Favorite service
pub struct FavoriteService<'a> {
    store: &'a dyn Store,
}

impl<'a> FavoriteService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// The user's favorites. An empty list is not an error.
    pub async fn list(&self, user: UserId) -> Result<Vec<FavoriteDetail>, ServiceError> {
        self.require_user(user).await?;
        Ok(self.store.list_favorites(user).await?)
    }

    /// Link `user` to `target`.
    pub async fn add(
        &self,
        user: UserId,
        target: FavoriteTarget,
    ) -> Result<FavoriteDetail, ServiceError> {
        self.require_user(user).await?;
        self.require_target(target).await?;

        let favorite = self.store.insert_favorite(user, target).await.map_err(|err| {
            tracing::debug!(%user, target_id = target.raw_id(), error = %err, "favorite insert rejected");
            ServiceError::from(err)
        })?;

        tracing::info!(
            %user,
            favorite = %favorite.id,
            resource = target.resource(),
            target_id = target.raw_id(),
            "favorite added"
        );
        Ok(favorite)
    }

    /// Unlink `user` from `target`.
    pub async fn remove(&self, user: UserId, target: FavoriteTarget) -> Result<(), ServiceError> {
        if !self.store.delete_favorite(user, target).await? {
            return Err(ServiceError::not_found(
                target.favorite_resource(),
                target.raw_id(),
            ));
        }

        tracing::info!(
            %user,
            resource = target.resource(),
            target_id = target.raw_id(),
            "favorite removed"
        );
        Ok(())
    }

    pub async fn add_planet(
        &self,
        user: UserId,
        planet: PlanetId,
    ) -> Result<FavoriteDetail, ServiceError> {
        self.add(user, FavoriteTarget::Planet(planet)).await
    }

    pub async fn add_person(
        &self,
        user: UserId,
        person: PersonId,
    ) -> Result<FavoriteDetail, ServiceError> {
        self.add(user, FavoriteTarget::Person(person)).await
    }

    pub async fn remove_planet(&self, user: UserId, planet: PlanetId) -> Result<(), ServiceError> {
        self.remove(user, FavoriteTarget::Planet(planet)).await
    }

    pub async fn remove_person(&self, user: UserId, person: PersonId) -> Result<(), ServiceError> {
        self.remove(user, FavoriteTarget::Person(person)).await
    }

    async fn require_user(&self, user: UserId) -> Result<(), ServiceError> {
        match self.store.get_user(user).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("user", user)),
        }
    }

    async fn require_target(&self, target: FavoriteTarget) -> Result<(), ServiceError> {
        let exists = match target {
            FavoriteTarget::Planet(id) => self.store.get_planet(id).await?.is_some(),
            FavoriteTarget::Person(id) => self.store.get_person(id).await?.is_some(),
        };

        if exists {
            Ok(())
        } else {
            Err(ServiceError::not_found(target.resource(), target.raw_id()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{FavoriteSubject, NewPerson, NewPlanet, NewUser};

    async fn seeded() -> (MemoryStore, UserId, PlanetId, PersonId) {
        let store = MemoryStore::new();
        let user = store
            .upsert_user(NewUser {
                email: "luke@rebellion.org".into(),
                password: "x".into(),
                is_active: true,
            })
            .await
            .unwrap();
        let planet = store
            .upsert_planet(NewPlanet {
                name: "Dagobah".into(),
                population: None,
                terrain: Some("swamp, jungles".into()),
                climate: Some("murky".into()),
            })
            .await
            .unwrap();
        let person = store
            .upsert_person(NewPerson {
                name: "Yoda".into(),
                height: Some(66),
                mass: Some(17),
                hair_color: Some("white".into()),
                skin_color: Some("green".into()),
                eye_color: Some("brown".into()),
                birth_year: Some("896BBY".into()),
                gender: Some("male".into()),
            })
            .await
            .unwrap();
        (store, user.id, planet.id, person.id)
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let (store, _, planet, _) = seeded().await;
        let service = FavoriteService::new(&store);

        let err = service.list(UserId(2)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { resource: "user", .. }));

        let err = service.add_planet(UserId(2), planet).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { resource: "user", .. }));
    }

    #[tokio::test]
    async fn empty_favorites_is_ok() {
        let (store, user, _, _) = seeded().await;
        let favorites = FavoriteService::new(&store).list(user).await.unwrap();
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn add_twice_conflicts() {
        let (store, user, planet, _) = seeded().await;
        let service = FavoriteService::new(&store);

        service.add_planet(user, planet).await.unwrap();
        let err = service.add_planet(user, planet).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict { resource: "planet", .. }));
    }

    #[tokio::test]
    async fn planet_and_person_are_independent() {
        let (store, user, planet, person) = seeded().await;
        let service = FavoriteService::new(&store);

        // Same numeric id, different tables
        assert_eq!(planet.get(), person.get());
        service.add_planet(user, planet).await.unwrap();
        let fav = service.add_person(user, person).await.unwrap();
        assert!(matches!(fav.subject, FavoriteSubject::Person(ref p) if p.name == "Yoda"));

        service.remove_planet(user, planet).await.unwrap();
        let remaining = service.list(user).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].target(), FavoriteTarget::Person(person));
    }

    #[tokio::test]
    async fn removing_unknown_favorite_is_not_found() {
        let (store, user, _, person) = seeded().await;

        let err = FavoriteService::new(&store)
            .remove_person(user, person)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "favorite person 1 not found");
    }

    #[tokio::test]
    async fn missing_target_is_not_found() {
        let (store, user, _, _) = seeded().await;

        let err = FavoriteService::new(&store)
            .add_person(user, PersonId(77))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "person 77 not found");
    }
}
