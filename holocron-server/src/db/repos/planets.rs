//! Planet repository
//!
//! - list/get: plain SELECTs ordered by id
//! - upsert: INSERT with ON CONFLICT on the unique name (idempotent)

use sqlx::PgPool;

use crate::models::{NewPlanet, Planet, PlanetId};
use super::DbError;

/// Planet repository
pub struct PlanetRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PlanetRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Planet>, DbError> {
        let planets = sqlx::query_as::<_, Planet>(
            r#"
            SELECT id, name, population, terrain, climate
            FROM planets
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(planets)
    }

    pub async fn get(&self, id: PlanetId) -> Result<Option<Planet>, DbError> {
        let planet = sqlx::query_as::<_, Planet>(
            r#"
            SELECT id, name, population, terrain, climate
            FROM planets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(planet)
    }

    /// Insert a planet, returning the existing row on name conflict.
    pub async fn upsert(&self, planet: NewPlanet) -> Result<Planet, DbError> {
        let planet = sqlx::query_as::<_, Planet>(
            r#"
            INSERT INTO planets (name, population, terrain, climate)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, population, terrain, climate
            "#,
        )
        .bind(&planet.name)
        .bind(planet.population)
        .bind(&planet.terrain)
        .bind(&planet.climate)
        .fetch_one(self.pool)
        .await?;

        Ok(planet)
    }
}
